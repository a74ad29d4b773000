//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived [`DesktopSession`] signal and the dispatch callback; UI
//! composition stays in [`crate::components`].

use leptos::*;
use platform_host::{browser_viewport_size, next_monotonic_timestamp_ms};

use crate::{
    apps::AppCatalog,
    config::SessionConfig,
    host::{self, DesktopHost},
    reducer::DesktopAction,
    session::{DesktopSession, ShellCommand},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop session state and dispatching [`ShellCommand`] values.
pub struct DesktopRuntimeContext {
    /// Reactive desktop session.
    pub session: RwSignal<DesktopSession>,
    /// Command dispatch callback.
    pub dispatch: Callback<ShellCommand>,
}

impl DesktopRuntimeContext {
    pub fn dispatch_command(&self, command: ShellCommand) {
        self.dispatch.call(command);
    }

    /// Dispatches a raw store action.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(ShellCommand::Store(action));
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(children: Children) -> impl IntoView {
    let session = create_rw_signal(DesktopSession::new(
        SessionConfig::for_browser(),
        AppCatalog::builtin().clone(),
        browser_viewport_size().into(),
        next_monotonic_timestamp_ms(),
    ));
    let host = store_value(DesktopHost::default());
    on_cleanup(move || host::teardown(host));

    let dispatch =
        Callback::new(move |command: ShellCommand| host::dispatch_command(session, host, command));

    provide_context(DesktopRuntimeContext { session, dispatch });

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
