//! Per-window pointer interaction state machine for header drags and resize-handle drags.
//!
//! Pointer moves never touch the store directly. Each move overwrites a single pending update,
//! and the session drains it once per animation frame (or on pointer-up), so a burst of moves
//! costs at most one store mutation per frame.

use crate::model::{PointerPosition, WindowId, WindowPosition, WindowRecord, WindowSize};
use crate::reducer::DesktopAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub pointer_start: PointerPosition,
    pub position_start: WindowPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    pub pointer_start: PointerPosition,
    pub size_start: WindowSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionController {
    window_id: WindowId,
    min_size: WindowSize,
    mode: InteractionMode,
    pending: Option<DesktopAction>,
}

impl InteractionController {
    pub fn new(window_id: WindowId, min_size: WindowSize) -> Self {
        Self {
            window_id,
            min_size,
            mode: InteractionMode::Idle,
            pending: None,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, InteractionMode::Dragging(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.mode, InteractionMode::Resizing(_))
    }

    pub fn is_active(&self) -> bool {
        self.mode != InteractionMode::Idle
    }

    pub fn has_pending_update(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a header drag. Returns the focus request, or `None` when the window is maximized
    /// (dragging is disabled) or another interaction is already running.
    pub fn begin_drag(
        &mut self,
        window: &WindowRecord,
        pointer: PointerPosition,
    ) -> Option<DesktopAction> {
        if window.maximized || self.is_active() {
            return None;
        }
        self.mode = InteractionMode::Dragging(DragSession {
            pointer_start: pointer,
            position_start: window.position,
        });
        Some(DesktopAction::FocusWindow {
            window_id: self.window_id,
        })
    }

    /// Starts a resize-handle drag. Same rules as [`Self::begin_drag`].
    pub fn begin_resize(
        &mut self,
        window: &WindowRecord,
        pointer: PointerPosition,
    ) -> Option<DesktopAction> {
        if window.maximized || self.is_active() {
            return None;
        }
        self.mode = InteractionMode::Resizing(ResizeSession {
            pointer_start: pointer,
            size_start: window.size,
        });
        Some(DesktopAction::FocusWindow {
            window_id: self.window_id,
        })
    }

    /// Records the update implied by `pointer`, replacing any update not yet applied.
    ///
    /// Returns `true` when an update is now pending.
    pub fn pointer_move(&mut self, pointer: PointerPosition) -> bool {
        let window_id = self.window_id;
        let update = match self.mode {
            InteractionMode::Idle => return false,
            InteractionMode::Dragging(session) => DesktopAction::UpdateWindowPosition {
                window_id,
                position: session.position_start.offset(
                    pointer.x - session.pointer_start.x,
                    pointer.y - session.pointer_start.y,
                ),
            },
            InteractionMode::Resizing(session) => DesktopAction::UpdateWindowSize {
                window_id,
                size: session
                    .size_start
                    .grown(
                        pointer.x - session.pointer_start.x,
                        pointer.y - session.pointer_start.y,
                    )
                    .clamped_min(self.min_size),
            },
        };
        self.pending = Some(update);
        true
    }

    /// Drains the pending update for the current animation frame.
    pub fn take_frame_update(&mut self) -> Option<DesktopAction> {
        self.pending.take()
    }

    /// Ends the interaction, returning the last update that has not been applied yet.
    pub fn end(&mut self) -> Option<DesktopAction> {
        self.mode = InteractionMode::Idle;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::ApplicationId;
    use pretty_assertions::assert_eq;

    use super::*;

    fn window(maximized: bool) -> WindowRecord {
        WindowRecord {
            id: WindowId(1),
            app_id: ApplicationId::new(1),
            title: "Blog".to_string(),
            icon_id: "book".to_string(),
            minimized: false,
            maximized,
            z_index: 1,
            position: WindowPosition { x: 100, y: 100 },
            size: WindowSize {
                width: 500,
                height: 400,
            },
            is_settings: false,
        }
    }

    fn controller() -> InteractionController {
        InteractionController::new(WindowId(1), WindowSize::default())
    }

    #[test]
    fn drag_moves_window_by_pointer_delta() {
        let mut controller = controller();
        let focus = controller.begin_drag(&window(false), PointerPosition { x: 50, y: 50 });
        assert_eq!(
            focus,
            Some(DesktopAction::FocusWindow {
                window_id: WindowId(1)
            })
        );
        assert!(controller.is_dragging());
        assert!(controller.pointer_move(PointerPosition { x: 80, y: 70 }));
        assert_eq!(
            controller.take_frame_update(),
            Some(DesktopAction::UpdateWindowPosition {
                window_id: WindowId(1),
                position: WindowPosition { x: 130, y: 120 },
            })
        );
        assert_eq!(controller.take_frame_update(), None);
    }

    #[test]
    fn successive_moves_overwrite_pending_update() {
        let mut controller = controller();
        controller.begin_drag(&window(false), PointerPosition { x: 0, y: 0 });
        controller.pointer_move(PointerPosition { x: 5, y: 5 });
        controller.pointer_move(PointerPosition { x: 9, y: -3 });
        assert_eq!(
            controller.take_frame_update(),
            Some(DesktopAction::UpdateWindowPosition {
                window_id: WindowId(1),
                position: WindowPosition { x: 109, y: 97 },
            })
        );
    }

    #[test]
    fn maximized_windows_cannot_drag_or_resize() {
        let mut controller = controller();
        assert_eq!(controller.begin_drag(&window(true), PointerPosition::default()), None);
        assert_eq!(controller.begin_resize(&window(true), PointerPosition::default()), None);
        assert_eq!(controller.mode(), InteractionMode::Idle);
        assert!(!controller.pointer_move(PointerPosition { x: 10, y: 10 }));
    }

    #[test]
    fn resize_is_clamped_to_minimum_size() {
        let mut controller = controller();
        controller.begin_resize(&window(false), PointerPosition { x: 600, y: 500 });
        assert!(controller.is_resizing());
        controller.pointer_move(PointerPosition { x: 300, y: 520 });
        assert_eq!(
            controller.take_frame_update(),
            Some(DesktopAction::UpdateWindowSize {
                window_id: WindowId(1),
                size: WindowSize {
                    width: 400,
                    height: 420
                },
            })
        );
    }

    #[test]
    fn drag_and_resize_are_mutually_exclusive() {
        let mut controller = controller();
        controller.begin_drag(&window(false), PointerPosition::default());
        assert_eq!(controller.begin_resize(&window(false), PointerPosition::default()), None);
        assert!(controller.is_dragging());
    }

    #[test]
    fn pointer_up_flushes_unapplied_update_and_returns_to_idle() {
        let mut controller = controller();
        controller.begin_drag(&window(false), PointerPosition { x: 50, y: 50 });
        controller.pointer_move(PointerPosition { x: 60, y: 50 });
        assert_eq!(
            controller.end(),
            Some(DesktopAction::UpdateWindowPosition {
                window_id: WindowId(1),
                position: WindowPosition { x: 110, y: 100 },
            })
        );
        assert_eq!(controller.mode(), InteractionMode::Idle);
        assert_eq!(controller.end(), None);
    }
}
