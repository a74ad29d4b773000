//! Window geometry helpers shared by the dock launch paths and the maximize toggle.

use crate::config::WindowDefaults;
use crate::model::{Viewport, WindowGeometry, WindowPosition, WindowRecord, WindowSize};
use crate::reducer::DesktopAction;

/// Default window geometry: a fraction of the viewport, capped, and centered.
pub fn centered_default_geometry(viewport: Viewport, defaults: &WindowDefaults) -> WindowGeometry {
    let scaled = |extent: i32| (f64::from(extent) * defaults.viewport_ratio).floor() as i32;
    let size = WindowSize {
        width: scaled(viewport.width).min(defaults.max_default_size.width),
        height: scaled(viewport.height).min(defaults.max_default_size.height),
    };
    WindowGeometry {
        position: WindowPosition {
            x: (viewport.width - size.width) / 2,
            y: (viewport.height - size.height) / 2,
        },
        size,
    }
}

/// Geometry used for dock launches, which open covering the viewport.
pub fn full_viewport_geometry(viewport: Viewport) -> WindowGeometry {
    viewport.full_geometry()
}

/// Actions toggling `window` between maximized and its restored geometry.
///
/// Maximizing records the current geometry in `restore_geometry`. Restoring moves the window
/// back to the recorded geometry, falling back to the centered default when nothing was
/// recorded, and emits position, size, then the restore flag update. The recorded geometry is
/// kept so a later restore of the same window reuses it.
pub fn toggle_maximize(
    window: &WindowRecord,
    restore_geometry: &mut Option<WindowGeometry>,
    viewport: Viewport,
    defaults: &WindowDefaults,
) -> Vec<DesktopAction> {
    let window_id = window.id;
    if window.maximized {
        let geometry =
            restore_geometry.unwrap_or_else(|| centered_default_geometry(viewport, defaults));
        vec![
            DesktopAction::UpdateWindowPosition {
                window_id,
                position: geometry.position,
            },
            DesktopAction::UpdateWindowSize {
                window_id,
                size: geometry.size,
            },
            DesktopAction::RestoreWindow { window_id },
        ]
    } else {
        *restore_geometry = Some(window.geometry());
        vec![DesktopAction::MaximizeWindow { window_id }]
    }
}

/// Geometry a window should render at. Maximized windows cover the viewport.
pub fn rendered_geometry(window: &WindowRecord, viewport: Viewport) -> WindowGeometry {
    if window.maximized {
        viewport.full_geometry()
    } else {
        window.geometry()
    }
}
