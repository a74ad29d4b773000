//! Shared contract types between the portal desktop runtime and the apps it hosts.
//!
//! The shell only consumes this contract: an app registers a stable integer id, a display name,
//! an icon token, a view module, an optional settings view module, and optional static metadata.
//! What a view renders is opaque to the window manager.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::View;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

/// Stable integer identifier for a registered application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(u32);

impl ApplicationId {
    /// Wraps a raw registry id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw registry id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Static metadata shown in the app info dialog.
pub struct AppInfo {
    /// Semantic version string.
    pub version: String,
    /// One-line description.
    pub description: String,
    /// Author display name.
    pub author: String,
    /// Optional homepage URL.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Optional release date (free-form, typically `YYYY-MM-DD`).
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures an app view can report while mounting.
///
/// The runtime renders these inside the window's error boundary; other windows are unaffected.
pub enum AppViewError {
    /// Launch params attached to the registration could not be decoded.
    #[error("app {app_id} received invalid launch params: {reason}")]
    InvalidLaunchParams {
        /// App whose params failed to decode.
        app_id: ApplicationId,
        /// Decoder message.
        reason: String,
    },
    /// The view rejected its configuration.
    #[error("app {app_id} is unavailable: {reason}")]
    Unavailable {
        /// App that refused to mount.
        app_id: ApplicationId,
        /// Human-readable reason.
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// App mount context injected by the desktop runtime per window instance.
pub struct AppMountContext {
    /// Registry id of the app being mounted.
    pub app_id: ApplicationId,
    /// Runtime window id hosting the view.
    pub window_id: WindowRuntimeId,
    /// Whether the settings view (rather than the main view) is being mounted.
    pub settings: bool,
    /// Static launch params from the app registration.
    pub launch_params: Value,
}

impl AppMountContext {
    /// Decodes the launch params into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`AppViewError::InvalidLaunchParams`] when the payload does not match `T`.
    pub fn launch_params<T: DeserializeOwned>(&self) -> Result<T, AppViewError> {
        serde_json::from_value(self.launch_params.clone()).map_err(|err| {
            AppViewError::InvalidLaunchParams {
                app_id: self.app_id,
                reason: err.to_string(),
            }
        })
    }
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> Result<View, AppViewError>;

#[derive(Debug, Clone, Copy)]
/// Mountable view descriptor used by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the view with a runtime-provided context.
    ///
    /// # Errors
    ///
    /// Propagates the view's [`AppViewError`].
    pub fn mount(self, context: AppMountContext) -> Result<View, AppViewError> {
        (self.mount_fn)(context)
    }
}

#[derive(Debug, Clone)]
/// A registry entry consumed by the dock, the app panel and the window renderer.
pub struct AppRegistration {
    /// Stable registry id.
    pub app_id: ApplicationId,
    /// Human-readable display name (also the default window title).
    pub display_name: String,
    /// Icon token resolved by the shell icon catalog.
    pub icon_id: String,
    /// Main view.
    pub module: AppModule,
    /// Optional settings view, opened in its own window.
    pub settings_module: Option<AppModule>,
    /// Optional static metadata for the info dialog.
    pub info: Option<AppInfo>,
    /// Static params handed to both views at mount time.
    pub launch_params: Value,
}

impl AppRegistration {
    /// Returns whether the app declares a settings view.
    pub fn has_settings(&self) -> bool {
        self.settings_module.is_some()
    }

    /// Returns the module for the requested view kind, if declared.
    pub fn module_for(&self, settings: bool) -> Option<AppModule> {
        if settings {
            self.settings_module
        } else {
            Some(self.module)
        }
    }
}
