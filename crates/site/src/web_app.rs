use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;

const SHELL_STYLES: &str = include_str!("shell.css");

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Portal Desktop" />
        <Meta name="description" content="A desktop-style personal portal in the browser." />
        <Style id="desktop-shell-styles">{SHELL_STYLES}</Style>

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider>
            <DesktopShell />
        </DesktopProvider>
    }
}
