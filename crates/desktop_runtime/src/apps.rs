//! App catalog: registrations compiled from the portal manifests plus lookup helpers used by
//! the dock, the app panel and the window renderer.

use std::sync::OnceLock;

use desktop_app_contract::{AppInfo, AppModule, AppMountContext, AppRegistration, ApplicationId};
use desktop_app_portal::PORTAL_PAGE_MODULE;
use leptos::logging::warn;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::WindowRecord;

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("app manifest catalog is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("app id {0} is registered twice")]
    DuplicateApp(ApplicationId),
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    app_id: u32,
    display_name: String,
    icon: String,
    page: Value,
    info: Option<AppInfo>,
}

impl CatalogEntry {
    fn into_registration(self) -> AppRegistration {
        AppRegistration {
            app_id: ApplicationId::new(self.app_id),
            display_name: self.display_name,
            icon_id: self.icon,
            module: PORTAL_PAGE_MODULE,
            settings_module: None,
            info: self.info,
            launch_params: self.page,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// What the shell needs to show an app in the dock, the app panel and its menus.
pub struct AppDescriptor {
    pub app_id: ApplicationId,
    pub display_name: String,
    pub icon_id: String,
    pub has_settings: bool,
    pub info: Option<AppInfo>,
}

impl From<&AppRegistration> for AppDescriptor {
    fn from(registration: &AppRegistration) -> Self {
        Self {
            app_id: registration.app_id,
            display_name: registration.display_name.clone(),
            icon_id: registration.icon_id.clone(),
            has_settings: registration.has_settings(),
            info: registration.info.clone(),
        }
    }
}

/// View a window's content area should host.
#[derive(Debug, Clone)]
pub enum WindowView {
    Ready {
        module: AppModule,
        context: AppMountContext,
    },
    /// No view is registered; `settings` tells whether the settings view was requested.
    Missing { settings: bool },
}

#[derive(Debug, Clone, Default)]
pub struct AppCatalog {
    registrations: Vec<AppRegistration>,
}

impl AppCatalog {
    /// Builds a catalog, rejecting duplicate app ids.
    pub fn new(registrations: Vec<AppRegistration>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::BTreeSet::new();
        for registration in &registrations {
            if !seen.insert(registration.app_id) {
                return Err(CatalogError::DuplicateApp(registration.app_id));
            }
        }
        Ok(Self { registrations })
    }

    /// Parses the manifest catalog JSON emitted by the build script.
    pub fn from_manifest_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(
            entries
                .into_iter()
                .map(CatalogEntry::into_registration)
                .collect(),
        )
    }

    /// Catalog compiled from the portal manifests at build time.
    pub fn builtin() -> &'static AppCatalog {
        static CATALOG: OnceLock<AppCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            AppCatalog::from_manifest_json(APP_MANIFEST_CATALOG_JSON).unwrap_or_else(|err| {
                warn!("desktop app catalog unavailable: {err}");
                AppCatalog::default()
            })
        })
    }

    pub fn registrations(&self) -> &[AppRegistration] {
        &self.registrations
    }

    pub fn registration(&self, app_id: ApplicationId) -> Option<&AppRegistration> {
        self.registrations.iter().find(|r| r.app_id == app_id)
    }

    pub fn descriptor(&self, app_id: ApplicationId) -> Option<AppDescriptor> {
        self.registration(app_id).map(AppDescriptor::from)
    }

    /// Descriptors in registry order.
    pub fn descriptors(&self) -> Vec<AppDescriptor> {
        self.registrations.iter().map(AppDescriptor::from).collect()
    }

    /// Resolves the view for `window` by app id and settings flag.
    pub fn window_view(&self, window: &WindowRecord) -> WindowView {
        let settings = window.is_settings;
        let Some(registration) = self.registration(window.app_id) else {
            return WindowView::Missing { settings };
        };
        match registration.module_for(settings) {
            Some(module) => WindowView::Ready {
                module,
                context: AppMountContext {
                    app_id: registration.app_id,
                    window_id: window.id.0,
                    settings,
                    launch_params: registration.launch_params.clone(),
                },
            },
            None => WindowView::Missing { settings },
        }
    }
}
