//! Reducer actions, side-effect intents, and transition logic for the window store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    DesktopState, OpenWindowRequest, WindowId, WindowPosition, WindowRecord, WindowSize,
    MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window using the supplied request.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Flag a window as maximized. Geometry is left untouched.
    MaximizeWindow {
        /// Window to maximize.
        window_id: WindowId,
    },
    /// Clear both the minimized and maximized flags.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Replace a window's position.
    UpdateWindowPosition {
        /// Window to move.
        window_id: WindowId,
        /// New top-left corner.
        position: WindowPosition,
    },
    /// Replace a window's size (floored at the minimum window size).
    UpdateWindowSize {
        /// Window to resize.
        window_id: WindowId,
        /// Requested size.
        size: WindowSize,
    },
    /// Raise a window to the top of the stack and make it active.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
}

impl DesktopAction {
    /// Window targeted by the action.
    pub fn window_id(&self) -> WindowId {
        match self {
            Self::OpenWindow(req) => req.id,
            Self::CloseWindow { window_id }
            | Self::MinimizeWindow { window_id }
            | Self::MaximizeWindow { window_id }
            | Self::RestoreWindow { window_id }
            | Self::UpdateWindowPosition { window_id, .. }
            | Self::UpdateWindowSize { window_id, .. }
            | Self::FocusWindow { window_id } => *window_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the session to execute.
pub enum RuntimeEffect {
    /// A window was appended to the store.
    WindowOpened(WindowId),
    /// A window was removed from the store.
    WindowClosed(WindowId),
    /// A minimized window was brought back on screen.
    WindowRestored(WindowId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that would break store invariants.
pub enum ReducerError {
    /// An open request reused the id of a window that is still open.
    #[error("window {0} is already open")]
    DuplicateWindow(WindowId),
}

/// Applies a [`DesktopAction`] to the window store and collects resulting side effects.
///
/// Actions that reference a window id not present in the store are silent no-ops: they return
/// no effects and leave every field untouched, including `max_z_index`.
///
/// # Errors
///
/// Returns [`ReducerError::DuplicateWindow`] when an open request reuses a live window id. The
/// state is unchanged in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(req) => {
            if state.window(req.id).is_some() {
                return Err(ReducerError::DuplicateWindow(req.id));
            }
            let z_index = next_z_index(state);
            state.windows.push(WindowRecord {
                id: req.id,
                app_id: req.app_id,
                title: req.title,
                icon_id: req.icon_id,
                minimized: false,
                maximized: false,
                z_index,
                position: req.position,
                size: req.size,
                is_settings: req.is_settings,
            });
            state.active_window_id = Some(req.id);
            effects.push(RuntimeEffect::WindowOpened(req.id));
        }
        DesktopAction::CloseWindow { window_id } => {
            let before_len = state.windows.len();
            state.windows.retain(|w| w.id != window_id);
            if state.windows.len() != before_len {
                if state.active_window_id == Some(window_id) {
                    state.active_window_id = None;
                }
                effects.push(RuntimeEffect::WindowClosed(window_id));
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if let Some(window) = find_window_mut(state, window_id) {
                window.minimized = true;
            }
        }
        DesktopAction::MaximizeWindow { window_id } => {
            if let Some(window) = find_window_mut(state, window_id) {
                window.maximized = true;
            }
        }
        DesktopAction::RestoreWindow { window_id } => {
            if let Some(window) = find_window_mut(state, window_id) {
                let was_minimized = window.minimized;
                window.minimized = false;
                window.maximized = false;
                if was_minimized {
                    effects.push(RuntimeEffect::WindowRestored(window_id));
                }
            }
        }
        DesktopAction::UpdateWindowPosition {
            window_id,
            position,
        } => {
            if let Some(window) = find_window_mut(state, window_id) {
                window.position = position;
            }
        }
        DesktopAction::UpdateWindowSize { window_id, size } => {
            if let Some(window) = find_window_mut(state, window_id) {
                window.size = size.clamped_min(WindowSize {
                    width: MIN_WINDOW_WIDTH,
                    height: MIN_WINDOW_HEIGHT,
                });
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if state.window(window_id).is_some() {
                let z_index = next_z_index(state);
                if let Some(window) = find_window_mut(state, window_id) {
                    window.z_index = z_index;
                }
                state.active_window_id = Some(window_id);
            }
        }
    }

    Ok(effects)
}

fn next_z_index(state: &mut DesktopState) -> u32 {
    state.max_z_index = state.max_z_index.saturating_add(1);
    state.max_z_index
}

fn find_window_mut(state: &mut DesktopState, window_id: WindowId) -> Option<&mut WindowRecord> {
    state.windows.iter_mut().find(|w| w.id == window_id)
}
