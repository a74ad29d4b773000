//! Two-phase window transitions and the deferred tasks that commit them.

use desktop_app_contract::ApplicationId;

use crate::model::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    /// Enter animation running after mount.
    Opening,
    #[default]
    Settled,
    /// Exit animation running; the store removes the window when it ends.
    Closing,
    /// Exit animation running; the store minimizes the window when it ends.
    Minimizing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Work scheduled on the session timer queue.
pub enum DeferredTask {
    FinishOpening(WindowId),
    CommitClose(WindowId),
    CommitMinimize(WindowId),
    HideDock,
    RelaunchApp(ApplicationId),
}

impl DeferredTask {
    /// Window whose lifetime bounds the task, if any.
    pub fn window_id(self) -> Option<WindowId> {
        match self {
            Self::FinishOpening(id) | Self::CommitClose(id) | Self::CommitMinimize(id) => Some(id),
            Self::HideDock | Self::RelaunchApp(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowTransition {
    window_id: WindowId,
    phase: TransitionPhase,
}

impl WindowTransition {
    /// Transition for a freshly mounted window.
    pub fn opening(window_id: WindowId) -> Self {
        Self {
            window_id,
            phase: TransitionPhase::Opening,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_exiting(&self) -> bool {
        matches!(
            self.phase,
            TransitionPhase::Closing | TransitionPhase::Minimizing
        )
    }

    /// Enters `Closing`. Returns the commit task, or `None` while an exit is already pending.
    pub fn begin_close(&mut self) -> Option<DeferredTask> {
        if self.is_exiting() {
            return None;
        }
        self.phase = TransitionPhase::Closing;
        Some(DeferredTask::CommitClose(self.window_id))
    }

    /// Enters `Minimizing`. Returns the commit task, or `None` while an exit is already pending.
    pub fn begin_minimize(&mut self) -> Option<DeferredTask> {
        if self.is_exiting() {
            return None;
        }
        self.phase = TransitionPhase::Minimizing;
        Some(DeferredTask::CommitMinimize(self.window_id))
    }

    pub fn settle(&mut self) {
        self.phase = TransitionPhase::Settled;
    }

    /// Animation class applied to the window frame.
    pub fn css_class(&self) -> Option<&'static str> {
        match self.phase {
            TransitionPhase::Opening => Some("window-opening"),
            TransitionPhase::Settled => None,
            TransitionPhase::Closing => Some("window-closing"),
            TransitionPhase::Minimizing => Some("window-minimizing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn repeated_exit_requests_are_ignored_while_pending() {
        let mut transition = WindowTransition::opening(WindowId(4));
        assert_eq!(
            transition.begin_minimize(),
            Some(DeferredTask::CommitMinimize(WindowId(4)))
        );
        assert_eq!(transition.begin_minimize(), None);
        assert_eq!(transition.begin_close(), None);
        assert_eq!(transition.phase(), TransitionPhase::Minimizing);

        transition.settle();
        assert_eq!(
            transition.begin_close(),
            Some(DeferredTask::CommitClose(WindowId(4)))
        );
        assert_eq!(transition.css_class(), Some("window-closing"));
    }

    #[test]
    fn dock_tasks_are_not_owned_by_a_window() {
        assert_eq!(DeferredTask::HideDock.window_id(), None);
        assert_eq!(
            DeferredTask::FinishOpening(WindowId(2)).window_id(),
            Some(WindowId(2))
        );
    }
}
