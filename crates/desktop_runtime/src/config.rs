//! Tunable timings and window geometry defaults for a [`crate::session::DesktopSession`].

use std::time::Duration;

use crate::model::{
    WindowGeometry, WindowPosition, WindowSize, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Delays applied by deferred shell transitions.
pub struct ShellTimings {
    /// Length of the open/close/minimize window animation.
    pub window_transition: Duration,
    /// Idle time before the dock hides over a maximized window.
    pub dock_auto_hide: Duration,
    /// Gap between closing and reopening an app on restart.
    pub restart_delay: Duration,
}

impl Default for ShellTimings {
    fn default() -> Self {
        Self {
            window_transition: Duration::from_millis(300),
            dock_auto_hide: Duration::from_millis(1000),
            restart_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Geometry used for new, restored, and settings windows.
pub struct WindowDefaults {
    pub min_size: WindowSize,
    /// Upper bound for the centered default size.
    pub max_default_size: WindowSize,
    /// Fraction of the viewport taken by the centered default size.
    pub viewport_ratio: f64,
    pub settings_geometry: WindowGeometry,
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            min_size: WindowSize {
                width: MIN_WINDOW_WIDTH,
                height: MIN_WINDOW_HEIGHT,
            },
            max_default_size: WindowSize {
                width: 1200,
                height: 800,
            },
            viewport_ratio: 0.8,
            settings_geometry: WindowGeometry {
                position: WindowPosition { x: 100, y: 100 },
                size: WindowSize {
                    width: 600,
                    height: 400,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Everything a session needs beyond the app catalog.
pub struct SessionConfig {
    pub timings: ShellTimings,
    pub window_defaults: WindowDefaults,
    /// First id handed out by the session's window id counter.
    pub first_window_id: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timings: ShellTimings::default(),
            window_defaults: WindowDefaults::default(),
            first_window_id: 1,
        }
    }
}

impl SessionConfig {
    /// Config for the browser shell: ids are seeded from the page clock so they read as
    /// timestamps and never repeat within the page.
    pub fn for_browser() -> Self {
        Self {
            first_window_id: platform_host::next_monotonic_timestamp_ms().max(1),
            ..Self::default()
        }
    }
}

pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
