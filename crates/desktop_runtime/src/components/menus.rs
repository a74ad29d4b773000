use desktop_app_contract::{AppInfo, ApplicationId};

use super::*;
use crate::{
    apps::AppDescriptor,
    dock::{clamp_menu_position, context_menu_entries, DockMenuEntry, LaunchSurface},
    icons::{app_icon_name, FluentIcon, IconName, IconSize},
    model::WindowSize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Open dock context menu: which app it targets and where the pointer was.
pub(super) struct DockMenuState {
    pub app_id: ApplicationId,
    pub anchor: PointerPosition,
}

fn entry_icon(entry: DockMenuEntry) -> Option<IconName> {
    match entry {
        DockMenuEntry::Status { running: true } => Some(IconName::Play),
        DockMenuEntry::Status { running: false } => Some(IconName::Pause),
        DockMenuEntry::Separator => None,
        DockMenuEntry::OpenOrFocus { .. } => Some(IconName::Apps),
        DockMenuEntry::Restart => Some(IconName::ArrowClockwise),
        DockMenuEntry::Close => Some(IconName::Delete),
        DockMenuEntry::Settings => Some(IconName::Settings),
        DockMenuEntry::Info => Some(IconName::Info),
    }
}

fn run_entry(
    runtime: DesktopRuntimeContext,
    app: &AppDescriptor,
    entry: DockMenuEntry,
    info_dialog: RwSignal<Option<AppDescriptor>>,
) {
    let app_id = app.app_id;
    match entry {
        DockMenuEntry::OpenOrFocus { .. } => runtime.dispatch_command(ShellCommand::LaunchApp {
            app_id,
            surface: LaunchSurface::Dock,
        }),
        DockMenuEntry::Restart => runtime.dispatch_command(ShellCommand::RestartApp { app_id }),
        DockMenuEntry::Close => runtime.dispatch_command(ShellCommand::CloseApp { app_id }),
        DockMenuEntry::Settings => {
            runtime.dispatch_command(ShellCommand::OpenAppSettings { app_id })
        }
        DockMenuEntry::Info => info_dialog.set(Some(app.clone())),
        DockMenuEntry::Status { .. } | DockMenuEntry::Separator => {}
    }
}

#[component]
pub(super) fn DockContextMenu(
    menu: RwSignal<Option<DockMenuState>>,
    info_dialog: RwSignal<Option<AppDescriptor>>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let session = runtime.session;
    let menu_ref = create_node_ref::<html::Div>();
    let placed = create_rw_signal(None::<PointerPosition>);

    let outside_listener = window_event_listener(ev::mousedown, move |_| {
        if menu.get_untracked().is_some() {
            menu.set(None);
        }
    });
    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && menu.get_untracked().is_some() {
            ev.prevent_default();
            menu.set(None);
        }
    });
    on_cleanup(move || {
        outside_listener.remove();
        escape_listener.remove();
    });

    // Re-measure every time the menu opens or its target changes.
    create_effect(move |_| {
        let Some(state) = menu.get() else {
            placed.set(None);
            return;
        };
        let Some(element) = menu_ref.get() else {
            return;
        };
        let size = WindowSize {
            width: element.offset_width(),
            height: element.offset_height(),
        };
        let viewport = session.with_untracked(|s| s.viewport());
        placed.set(Some(clamp_menu_position(state.anchor, size, viewport)));
    });

    let target = create_memo(move |_| {
        menu.get().and_then(|state| {
            session.with(|s| {
                let app = s.catalog().descriptor(state.app_id)?;
                let entries = context_menu_entries(s.state(), &app);
                Some((app, entries))
            })
        })
    });

    let style = move || {
        let Some(state) = menu.get() else {
            return String::new();
        };
        match placed.get() {
            Some(position) => format!("left:{}px;top:{}px;", position.x, position.y),
            None => format!(
                "left:{}px;top:{}px;visibility:hidden;",
                state.anchor.x, state.anchor.y
            ),
        }
    };

    view! {
        <Show when=move || target.get().is_some() fallback=|| ()>
            <div
                id="dock-context-menu"
                class="dock-context-menu"
                role="menu"
                node_ref=menu_ref
                style=style
                on:mousedown=move |ev| ev.stop_propagation()
                on:contextmenu=move |ev| stop_mouse_event(&ev)
            >
                {move || {
                    let Some((app, entries)) = target.get() else {
                        return ().into_view();
                    };
                    view! {
                        <div class="dock-context-menu-title">{app.display_name.clone()}</div>
                        {entries
                            .into_iter()
                            .map(|entry| {
                                if entry == DockMenuEntry::Separator {
                                    return view! {
                                        <div class="dock-menu-separator" role="separator" aria-hidden="true"></div>
                                    }
                                    .into_view();
                                }
                                let app = app.clone();
                                let class = if entry.is_danger() {
                                    "dock-menu-item danger"
                                } else {
                                    "dock-menu-item"
                                };
                                view! {
                                    <button
                                        class=class
                                        role="menuitem"
                                        disabled=!entry.is_enabled()
                                        on:click=move |ev| {
                                            stop_mouse_event(&ev);
                                            menu.set(None);
                                            run_entry(runtime, &app, entry, info_dialog);
                                        }
                                    >
                                        <span class="dock-menu-icon" aria-hidden="true">
                                            {entry_icon(entry)
                                                .map(|icon| view! { <FluentIcon icon=icon size=IconSize::Xs /> })}
                                        </span>
                                        <span>{entry.label()}</span>
                                    </button>
                                }
                                .into_view()
                            })
                            .collect_view()}
                    }
                    .into_view()
                }}
            </div>
        </Show>
    }
}

#[component]
pub(super) fn AppInfoDialog(info_dialog: RwSignal<Option<AppDescriptor>>) -> impl IntoView {
    let close = move || info_dialog.set(None);
    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && info_dialog.get_untracked().is_some() {
            ev.prevent_default();
            close();
        }
    });
    on_cleanup(move || escape_listener.remove());

    view! {
        <Show when=move || info_dialog.get().is_some() fallback=|| ()>
            {move || {
                let Some(app) = info_dialog.get() else {
                    return ().into_view();
                };
                view! {
                    <div
                        class="app-info-backdrop"
                        on:mousedown=move |ev| {
                            stop_mouse_event(&ev);
                            close();
                        }
                    >
                        <div
                            class="app-info-dialog"
                            role="dialog"
                            aria-modal="true"
                            aria-label=format!("About {}", app.display_name)
                            on:mousedown=move |ev| ev.stop_propagation()
                        >
                            <header class="app-info-header">
                                <span class="app-info-icon" aria-hidden="true">
                                    <FluentIcon icon=app_icon_name(&app.icon_id) size=IconSize::Lg />
                                </span>
                                <h2>{app.display_name.clone()}</h2>
                            </header>
                            {app.info.map(|info| view! { <AppInfoDetails info=info /> })}
                            <button class="app-info-close" on:click=move |_| close()>
                                "Close"
                            </button>
                        </div>
                    </div>
                }
                .into_view()
            }}
        </Show>
    }
}

#[component]
fn AppInfoDetails(info: AppInfo) -> impl IntoView {
    view! {
        <dl class="app-info-details">
            <dt>"Version"</dt>
            <dd>{info.version}</dd>
            <dt>"Description"</dt>
            <dd>{info.description}</dd>
            <dt>"Author"</dt>
            <dd>{info.author}</dd>
            {info.homepage.map(|homepage| {
                view! {
                    <dt>"Homepage"</dt>
                    <dd>
                        <a href=homepage.clone() target="_blank" rel="noopener noreferrer">
                            {homepage}
                        </a>
                    </dd>
                }
            })}
            {info.release_date.map(|date| {
                view! {
                    <dt>"Released"</dt>
                    <dd>{date}</dd>
                }
            })}
        </dl>
    }
}
