//! Desktop shell UI composition and interaction surfaces.

mod app_panel;
mod dock;
mod menus;
mod window;

use leptos::*;
use platform_host::browser_viewport_size;

use self::{app_panel::AppPanel, dock::Dock, window::DesktopWindow};

use crate::{model::PointerPosition, session::ShellCommand};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the full desktop shell: app panel, window layer and dock.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let session = runtime.session;

    let move_listener = window_event_listener(ev::pointermove, move |ev| {
        if session.with_untracked(|s| s.interacting_window().is_some()) {
            runtime.dispatch_command(ShellCommand::PointerMove {
                pointer: pointer_from_pointer_event(&ev),
            });
        }
    });
    let up_listener =
        window_event_listener(ev::pointerup, move |_| end_pointer_interaction(runtime));
    let cancel_listener =
        window_event_listener(ev::pointercancel, move |_| end_pointer_interaction(runtime));
    let resize_listener = window_event_listener(ev::resize, move |_| {
        runtime.dispatch_command(ShellCommand::SetViewport(browser_viewport_size().into()));
    });
    on_cleanup(move || {
        move_listener.remove();
        up_listener.remove();
        cancel_listener.remove();
        resize_listener.remove();
    });

    let visible_windows = create_memo(move |_| session.with(|s| s.state().visible_window_ids()));

    view! {
        <div id="desktop-shell-root" class="desktop-shell">
            <main class="desktop-workspace">
                <AppPanel />
            </main>
            <div class="desktop-window-layer">
                <For each=move || visible_windows.get() key=|window_id| window_id.0 let:window_id>
                    <DesktopWindow window_id=window_id />
                </For>
            </div>
            <Dock />
        </div>
    }
}

fn end_pointer_interaction(runtime: DesktopRuntimeContext) {
    if runtime
        .session
        .with_untracked(|s| s.interacting_window().is_some())
    {
        runtime.dispatch_command(ShellCommand::PointerUp);
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn pointer_from_mouse_event(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}
