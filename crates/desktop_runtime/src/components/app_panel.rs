use super::*;
use crate::{
    apps::AppDescriptor,
    dock::LaunchSurface,
    icons::{app_icon_name, FluentIcon, IconSize},
};

#[component]
pub(super) fn AppPanel() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let apps = create_memo(move |_| runtime.session.with(|s| s.catalog().descriptors()));

    view! {
        <section class="app-panel" aria-label="Applications">
            <div class="app-panel-grid">
                <For each=move || apps.get() key=|app| app.app_id let:app>
                    <AppCard app=app />
                </For>
            </div>
        </section>
    }
}

#[component]
fn AppCard(app: AppDescriptor) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = app.app_id;

    view! {
        <button
            class="app-card"
            on:click=move |_| {
                runtime.dispatch_command(ShellCommand::LaunchApp {
                    app_id,
                    surface: LaunchSurface::AppPanel,
                })
            }
        >
            <span class="app-card-icon" aria-hidden="true">
                <FluentIcon icon=app_icon_name(&app.icon_id) size=IconSize::Md />
            </span>
            <span class="app-card-name">{app.display_name}</span>
        </button>
    }
}
