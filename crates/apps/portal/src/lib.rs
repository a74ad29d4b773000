//! Embedded portal pages (blog, projects, games, about) rendered as iframe views.
//!
//! Each page is described by a manifest under `manifests/`; the runtime's build script compiles
//! those manifests into its app catalog and hands the `[page]` table back to this crate as
//! launch params.

use desktop_app_contract::{AppModule, AppMountContext, AppViewError, ApplicationId};
use leptos::*;
use serde::{Deserialize, Serialize};

/// Module mounting a [`PortalPage`] from the registration's launch params.
pub const PORTAL_PAGE_MODULE: AppModule = AppModule::new(mount_portal_page);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Launch params for an embedded page.
pub struct PortalPageParams {
    /// Absolute `http(s)` URL loaded into the iframe.
    pub url: String,
    /// Accessible iframe title.
    pub title: String,
}

impl PortalPageParams {
    /// Decodes and validates params for `context`.
    ///
    /// # Errors
    ///
    /// Returns [`AppViewError::InvalidLaunchParams`] when the payload is malformed and
    /// [`AppViewError::Unavailable`] when the URL is not an absolute `http(s)` URL.
    pub fn from_context(context: &AppMountContext) -> Result<Self, AppViewError> {
        let params = context.launch_params::<Self>()?;
        params.validate(context.app_id)?;
        Ok(params)
    }

    fn validate(&self, app_id: ApplicationId) -> Result<(), AppViewError> {
        let url = self.url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(AppViewError::Unavailable {
                app_id,
                reason: format!("page url `{url}` is not an absolute http(s) url"),
            });
        }
        Ok(())
    }
}

fn mount_portal_page(context: AppMountContext) -> Result<View, AppViewError> {
    let params = PortalPageParams::from_context(&context)?;
    Ok(view! { <PortalPage params=params window_id=context.window_id /> }.into_view())
}

#[component]
/// Full-bleed iframe with a spinner overlay until the page reports `load`.
pub fn PortalPage(params: PortalPageParams, window_id: u64) -> impl IntoView {
    let loaded = create_rw_signal(false);

    view! {
        <div class="app app-portal-page" data-window-id=window_id.to_string()>
            <Show when=move || !loaded.get() fallback=|| ()>
                <LoadingSpinner />
            </Show>
            <iframe
                class="portal-page-frame"
                src=params.url
                title=params.title
                on:load=move |_| loaded.set(true)
            />
        </div>
    }
}

#[component]
/// Centered loading indicator.
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="loading-spinner" role="status" aria-live="polite">
            <span class="loading-spinner-ring" aria-hidden="true"></span>
            <span class="loading-spinner-label">"Loading..."</span>
        </div>
    }
}
