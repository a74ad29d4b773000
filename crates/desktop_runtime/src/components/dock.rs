use super::*;
use super::menus::{AppInfoDialog, DockContextMenu, DockMenuState};
use crate::{
    apps::AppDescriptor,
    dock::{dock_indicator, DockHoverZone, LaunchSurface},
    icons::{app_icon_name, FluentIcon, IconSize},
};

#[component]
pub(super) fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let session = runtime.session;

    let menu = create_rw_signal(None::<DockMenuState>);
    let info_dialog = create_rw_signal(None::<AppDescriptor>);

    let apps = create_memo(move |_| session.with(|s| s.catalog().descriptors()));
    let visible = create_memo(move |_| session.with(|s| s.dock().is_visible()));
    let covered = create_memo(move |_| session.with(|s| s.dock().is_covered()));

    let hover = move |zone: DockHoverZone, inside: bool| {
        runtime.dispatch_command(ShellCommand::DockHover { zone, inside });
    };

    view! {
        <Show when=move || covered.get() fallback=|| ()>
            <div
                class="dock-trigger"
                aria-hidden="true"
                on:mouseenter=move |_| hover(DockHoverZone::EdgeTrigger, true)
                on:mouseleave=move |_| hover(DockHoverZone::EdgeTrigger, false)
            />
        </Show>
        <nav
            class="dock"
            class:dock-hidden=move || !visible.get()
            aria-label="Dock"
            on:mouseenter=move |_| hover(DockHoverZone::Dock, true)
            on:mouseleave=move |_| hover(DockHoverZone::Dock, false)
        >
            <For each=move || apps.get() key=|app| app.app_id let:app>
                <DockItem app=app menu=menu />
            </For>
        </nav>
        <DockContextMenu menu=menu info_dialog=info_dialog />
        <AppInfoDialog info_dialog=info_dialog />
    }
}

#[component]
fn DockItem(app: AppDescriptor, menu: RwSignal<Option<DockMenuState>>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let session = runtime.session;
    let app_id = app.app_id;
    let app_for_indicator = app.clone();

    let indicator =
        create_memo(move |_| session.with(|s| dock_indicator(s.state(), &app_for_indicator)));

    let launch = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        menu.set(None);
        runtime.dispatch_command(ShellCommand::LaunchApp {
            app_id,
            surface: LaunchSurface::Dock,
        });
    };
    let open_menu = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        menu.set(Some(DockMenuState {
            app_id,
            anchor: pointer_from_mouse_event(&ev),
        }));
    };

    view! {
        <button
            class="dock-item"
            class:running=move || indicator.get().active
            class:minimized=move || indicator.get().minimized
            title=app.display_name.clone()
            aria-label=app.display_name.clone()
            on:click=launch
            on:contextmenu=open_menu
        >
            <span class="dock-item-icon" aria-hidden="true">
                <FluentIcon icon=app_icon_name(&app.icon_id) size=IconSize::Md />
            </span>
            <span
                class="dock-item-indicator"
                class:active=move || indicator.get().active
                class:minimized=move || indicator.get().minimized
                aria-hidden="true"
            />
        </button>
    }
}
