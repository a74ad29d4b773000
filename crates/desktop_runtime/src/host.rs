//! Browser-side driver for a [`DesktopSession`]: advances the session clock from page time and
//! keeps exactly one real timeout and at most one animation frame request armed.
//!
//! The session decides *when* deferred work is due; this module only wakes it up.

use std::time::Duration;

use leptos::leptos_dom::helpers::{AnimationFrameRequestHandle, TimeoutHandle};
use leptos::*;
use platform_host::next_monotonic_timestamp_ms;

use crate::session::{DesktopSession, ShellCommand};

#[derive(Clone, Copy, Default)]
/// Real browser handles owned by the desktop provider.
pub struct DesktopHost {
    timeout: Option<TimeoutHandle>,
    armed_due_ms: Option<u64>,
    frame: Option<AnimationFrameRequestHandle>,
}

impl DesktopHost {
    fn clear_timeout(&mut self) {
        if let Some(handle) = self.timeout.take() {
            handle.clear();
        }
        self.armed_due_ms = None;
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame.take() {
            handle.cancel();
        }
    }
}

/// Feeds `command` to the session at the current page time, then re-arms wakeups.
pub(crate) fn dispatch_command(
    session: RwSignal<DesktopSession>,
    host: StoredValue<DesktopHost>,
    command: ShellCommand,
) {
    let now_ms = next_monotonic_timestamp_ms();
    session.update(|session| {
        session.advance_to(now_ms);
        session.handle(command);
    });
    sync_wakeups(session, host);
}

/// Clears every armed timeout and frame request. Called when the provider unmounts.
pub(crate) fn teardown(host: StoredValue<DesktopHost>) {
    host.update_value(|host| {
        host.clear_timeout();
        host.cancel_frame();
    });
}

fn wake(session: RwSignal<DesktopSession>, host: StoredValue<DesktopHost>) {
    host.update_value(|host| {
        host.timeout = None;
        host.armed_due_ms = None;
    });
    let now_ms = next_monotonic_timestamp_ms();
    session.update(|session| session.advance_to(now_ms));
    sync_wakeups(session, host);
}

fn sync_wakeups(session: RwSignal<DesktopSession>, host: StoredValue<DesktopHost>) {
    let (next_due_ms, wants_frame) =
        session.with_untracked(|session| (session.next_due_ms(), session.wants_animation_frame()));

    let armed_due_ms = host.with_value(|host| host.armed_due_ms);
    if armed_due_ms != next_due_ms {
        host.update_value(DesktopHost::clear_timeout);
        if let Some(due_ms) = next_due_ms {
            let delay =
                Duration::from_millis(due_ms.saturating_sub(next_monotonic_timestamp_ms()));
            match set_timeout_with_handle(move || wake(session, host), delay) {
                Ok(handle) => host.update_value(|host| {
                    host.timeout = Some(handle);
                    host.armed_due_ms = Some(due_ms);
                }),
                Err(err) => logging::warn!("failed to arm desktop timer: {err:?}"),
            }
        }
    }

    if wants_frame && host.with_value(|host| host.frame.is_none()) {
        let request = request_animation_frame_with_handle(move || {
            host.update_value(|host| host.frame = None);
            dispatch_command(session, host, ShellCommand::AnimationFrame);
        });
        match request {
            Ok(handle) => host.update_value(|host| host.frame = Some(handle)),
            Err(err) => logging::warn!("failed to request animation frame: {err:?}"),
        }
    }
}
