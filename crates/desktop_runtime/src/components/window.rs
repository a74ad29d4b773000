use super::*;
use crate::{
    apps::WindowView,
    icons::{app_icon_name, FluentIcon, IconName, IconSize},
    model::WindowId,
    reducer::DesktopAction,
    session::DesktopSession,
    window_manager::rendered_geometry,
};
use desktop_app_portal::LoadingSpinner;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct WindowFrame {
    class: String,
    style: String,
}

impl WindowFrame {
    fn of(session: &DesktopSession, window_id: WindowId) -> Option<Self> {
        let window = session.state().window(window_id)?;
        let geometry = rendered_geometry(window, session.viewport());
        let mut class = String::from("desktop-window");
        if session.state().active_window_id == Some(window_id) {
            class.push_str(" active");
        }
        if window.maximized {
            class.push_str(" maximized");
        }
        if let Some(chrome) = session.chrome(window_id) {
            if let Some(transition) = chrome.transition().css_class() {
                class.push(' ');
                class.push_str(transition);
            }
            if chrome.interaction().is_dragging() {
                class.push_str(" dragging");
            }
            if chrome.interaction().is_resizing() {
                class.push_str(" resizing");
            }
        }
        Some(Self {
            class,
            style: format!(
                "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                geometry.position.x,
                geometry.position.y,
                geometry.size.width,
                geometry.size.height,
                window.z_index
            ),
        })
    }
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let session = runtime.session;

    let frame = create_memo(move |_| session.with(|s| WindowFrame::of(s, window_id)));
    let header = create_memo(move |_| {
        session.with(|s| {
            s.state()
                .window(window_id)
                .map(|w| (w.title.clone(), w.icon_id.clone(), w.maximized))
        })
    });
    let maximized = move || header.get().map(|(_, _, maximized)| maximized).unwrap_or(false);

    let focus = move |_| {
        let is_active = session.with_untracked(|s| s.state().active_window_id == Some(window_id));
        if !is_active {
            runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        }
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_command(ShellCommand::HeaderPointerDown {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let header_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_command(ShellCommand::ToggleMaximize { window_id });
    };

    view! {
        <Show when=move || frame.get().is_some() fallback=|| ()>
            <section
                class=move || frame.get().map(|f| f.class).unwrap_or_default()
                style=move || frame.get().map(|f| f.style).unwrap_or_default()
                data-window-id=window_id.to_string()
                on:pointerdown=focus
                role="dialog"
                aria-label=move || header.get().map(|(title, _, _)| title).unwrap_or_default()
            >
                <header
                    class="titlebar"
                    on:pointerdown=begin_move
                    on:dblclick=header_double_click
                >
                    <div class="titlebar-title">
                        <span class="titlebar-app-icon" aria-hidden="true">
                            {move || {
                                header
                                    .get()
                                    .map(|(_, icon_id, _)| {
                                        view! { <FluentIcon icon=app_icon_name(&icon_id) size=IconSize::Sm /> }
                                    })
                            }}
                        </span>
                        <span>{move || header.get().map(|(title, _, _)| title)}</span>
                    </div>
                    <div class="titlebar-controls" on:dblclick=move |ev| stop_mouse_event(&ev)>
                        <WindowControlButton
                            label=Signal::derive(|| "Minimize window")
                            icon=Signal::derive(|| IconName::WindowMinimize)
                            on_press=Callback::new(move |_| {
                                runtime.dispatch_command(ShellCommand::RequestMinimize { window_id })
                            })
                        />
                        <WindowControlButton
                            label=Signal::derive(move || {
                                if maximized() { "Restore window" } else { "Maximize window" }
                            })
                            icon=Signal::derive(move || {
                                if maximized() { IconName::WindowRestore } else { IconName::WindowMaximize }
                            })
                            on_press=Callback::new(move |_| {
                                runtime.dispatch_command(ShellCommand::ToggleMaximize { window_id })
                            })
                        />
                        <WindowControlButton
                            label=Signal::derive(|| "Close window")
                            icon=Signal::derive(|| IconName::Dismiss)
                            on_press=Callback::new(move |_| {
                                runtime.dispatch_command(ShellCommand::RequestClose { window_id })
                            })
                        />
                    </div>
                </header>
                <div class="window-body">
                    <WindowBody window_id=window_id />
                </div>
                <Show when=move || !maximized() fallback=|| ()>
                    <WindowResizeHandle window_id=window_id />
                </Show>
            </section>
        </Show>
    }
}

#[component]
fn WindowControlButton(
    label: Signal<&'static str>,
    icon: Signal<IconName>,
    on_press: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            class="control-button"
            aria-label=move || label.get()
            on:pointerdown=move |ev: web_sys::PointerEvent| {
                ev.prevent_default();
                ev.stop_propagation();
            }
            on:mousedown=move |ev| stop_mouse_event(&ev)
            on:click=move |ev| {
                stop_mouse_event(&ev);
                on_press.call(());
            }
        >
            {move || view! { <FluentIcon icon=icon.get() size=IconSize::Xs /> }}
        </button>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_command(ShellCommand::ResizePointerDown {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class="window-resize-handle"
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let resolved = runtime.session.with_untracked(|s| {
        s.state()
            .window(window_id)
            .map(|window| s.catalog().window_view(window))
    });

    let contents = match resolved {
        Some(WindowView::Ready { module, context }) => {
            let mounted = module.mount(context);
            view! {
                <ErrorBoundary fallback=|errors| {
                    view! {
                        <div class="window-app-error" role="alert">
                            <h2>"This app stopped working"</h2>
                            <ul>
                                {move || {
                                    errors
                                        .get()
                                        .into_iter()
                                        .map(|(_, err)| view! { <li>{err.to_string()}</li> })
                                        .collect_view()
                                }}
                            </ul>
                        </div>
                    }
                }>
                    {mounted}
                </ErrorBoundary>
            }
            .into_view()
        }
        Some(WindowView::Missing { settings }) => {
            view! { <MissingViewPlaceholder settings=settings /> }.into_view()
        }
        None => view! { <LoadingSpinner /> }.into_view(),
    };

    view! {
        <div class="window-body-content">
            {contents}
        </div>
    }
}

#[component]
fn MissingViewPlaceholder(settings: bool) -> impl IntoView {
    let (heading, detail) = if settings {
        (
            "Settings failed to load",
            "This app does not provide a settings view.",
        )
    } else {
        ("App failed to load", "No view is registered for this app.")
    };

    view! {
        <div class="window-load-failure" role="alert">
            <h2>{heading}</h2>
            <p>{detail}</p>
        </div>
    }
}
