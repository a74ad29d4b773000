//! Headless desktop session: the window store plus per-window chrome state, dock auto-hide and
//! deferred work, driven by [`ShellCommand`] values and a session clock.
//!
//! Nothing here touches the DOM or real timers. The browser host feeds commands and advances
//! the clock from the page time; tests advance it virtually.

use std::collections::BTreeMap;
use std::time::Duration;

use desktop_app_contract::ApplicationId;
use leptos::logging::warn;
use serde::{Deserialize, Serialize};

use crate::apps::{AppCatalog, AppDescriptor};
use crate::config::{duration_ms, SessionConfig};
use crate::dock::{self, DockHoverZone, DockVisibility, LaunchSurface};
use crate::interaction::InteractionController;
use crate::model::{DesktopState, PointerPosition, Viewport, WindowGeometry, WindowId};
use crate::reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
use crate::timers::TimerQueue;
use crate::transitions::{DeferredTask, WindowTransition};
use crate::window_manager;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
/// Input vocabulary of [`DesktopSession::handle`].
pub enum ShellCommand {
    /// Apply a store action as-is.
    Store(DesktopAction),
    LaunchApp {
        app_id: ApplicationId,
        surface: LaunchSurface,
    },
    RestartApp {
        app_id: ApplicationId,
    },
    CloseApp {
        app_id: ApplicationId,
    },
    OpenAppSettings {
        app_id: ApplicationId,
    },
    HeaderPointerDown {
        window_id: WindowId,
        pointer: PointerPosition,
    },
    ResizePointerDown {
        window_id: WindowId,
        pointer: PointerPosition,
    },
    PointerMove {
        pointer: PointerPosition,
    },
    PointerUp,
    AnimationFrame,
    ToggleMaximize {
        window_id: WindowId,
    },
    RequestMinimize {
        window_id: WindowId,
    },
    RequestClose {
        window_id: WindowId,
    },
    DockHover {
        zone: DockHoverZone,
        inside: bool,
    },
    SetViewport(Viewport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Runtime-only state attached to each open window.
pub struct WindowChrome {
    interaction: InteractionController,
    transition: WindowTransition,
    restore_geometry: Option<WindowGeometry>,
}

impl WindowChrome {
    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn transition(&self) -> &WindowTransition {
        &self.transition
    }

    /// Geometry recorded by the last maximize, if any.
    pub fn restore_geometry(&self) -> Option<WindowGeometry> {
        self.restore_geometry
    }
}

#[derive(Debug, Clone)]
pub struct DesktopSession {
    config: SessionConfig,
    catalog: AppCatalog,
    state: DesktopState,
    chrome: BTreeMap<WindowId, WindowChrome>,
    dock: DockVisibility,
    timers: TimerQueue<DeferredTask>,
    clock_ms: u64,
    viewport: Viewport,
    next_window_id: u64,
    interacting: Option<WindowId>,
}

impl DesktopSession {
    pub fn new(
        config: SessionConfig,
        catalog: AppCatalog,
        viewport: Viewport,
        now_ms: u64,
    ) -> Self {
        Self {
            next_window_id: config.first_window_id,
            config,
            catalog,
            state: DesktopState::default(),
            chrome: BTreeMap::new(),
            dock: DockVisibility::default(),
            timers: TimerQueue::new(),
            clock_ms: now_ms,
            viewport,
            interacting: None,
        }
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &AppCatalog {
        &self.catalog
    }

    pub fn chrome(&self, window_id: WindowId) -> Option<&WindowChrome> {
        self.chrome.get(&window_id)
    }

    pub fn dock(&self) -> &DockVisibility {
        &self.dock
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Window currently being dragged or resized.
    pub fn interacting_window(&self) -> Option<WindowId> {
        self.interacting
    }

    /// Session time of the earliest pending deferred task.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.next_due()
    }

    pub fn pending_task_count(&self) -> usize {
        self.timers.len()
    }

    /// Whether a pointer update is waiting for the next animation frame.
    pub fn wants_animation_frame(&self) -> bool {
        self.chrome
            .values()
            .any(|chrome| chrome.interaction.has_pending_update())
    }

    /// Runs every deferred task due at or before `now_ms`, in deadline order.
    ///
    /// The clock never moves backwards; an earlier `now_ms` only runs nothing.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some((due_ms, task)) = self.timers.pop_due(now_ms) {
            self.clock_ms = self.clock_ms.max(due_ms);
            self.run_task(task);
        }
        self.clock_ms = self.clock_ms.max(now_ms);
    }

    pub fn advance_by(&mut self, elapsed: Duration) {
        self.advance_to(self.clock_ms.saturating_add(duration_ms(elapsed)));
    }

    pub fn handle(&mut self, command: ShellCommand) {
        match command {
            ShellCommand::Store(action) => self.apply(action),
            ShellCommand::LaunchApp { app_id, surface } => self.launch(app_id, surface),
            ShellCommand::RestartApp { app_id } => self.restart(app_id),
            ShellCommand::CloseApp { app_id } => {
                let Some(app) = self.descriptor(app_id) else {
                    return;
                };
                if let Some(close) = dock::close_app(&self.state, &app) {
                    self.apply(close);
                }
            }
            ShellCommand::OpenAppSettings { app_id } => {
                let Some(app) = self.descriptor(app_id) else {
                    return;
                };
                let window_id = WindowId(self.next_window_id);
                match dock::open_settings(&app, window_id, &self.config.window_defaults) {
                    Some(open) => {
                        self.next_window_id += 1;
                        self.apply(open);
                    }
                    None => warn!("app {app_id} has no settings view"),
                }
            }
            ShellCommand::HeaderPointerDown { window_id, pointer } => {
                self.begin_interaction(window_id, pointer, false)
            }
            ShellCommand::ResizePointerDown { window_id, pointer } => {
                self.begin_interaction(window_id, pointer, true)
            }
            ShellCommand::PointerMove { pointer } => {
                if let Some(chrome) = self
                    .interacting
                    .and_then(|window_id| self.chrome.get_mut(&window_id))
                {
                    chrome.interaction.pointer_move(pointer);
                }
            }
            ShellCommand::PointerUp => {
                let pending = self
                    .interacting
                    .take()
                    .and_then(|window_id| self.chrome.get_mut(&window_id))
                    .and_then(|chrome| chrome.interaction.end());
                if let Some(update) = pending {
                    self.apply(update);
                }
            }
            ShellCommand::AnimationFrame => {
                let updates: Vec<_> = self
                    .chrome
                    .values_mut()
                    .filter_map(|chrome| chrome.interaction.take_frame_update())
                    .collect();
                for update in updates {
                    self.apply(update);
                }
            }
            ShellCommand::ToggleMaximize { window_id } => self.toggle_maximize(window_id),
            ShellCommand::RequestMinimize { window_id } => {
                if self.state.window(window_id).is_none() {
                    return;
                }
                let task = self
                    .chrome
                    .get_mut(&window_id)
                    .and_then(|chrome| chrome.transition.begin_minimize());
                if let Some(task) = task {
                    self.schedule_after(self.config.timings.window_transition, task);
                }
            }
            ShellCommand::RequestClose { window_id } => {
                if self.state.window(window_id).is_none() {
                    return;
                }
                let task = self
                    .chrome
                    .get_mut(&window_id)
                    .and_then(|chrome| chrome.transition.begin_close());
                if let Some(task) = task {
                    self.schedule_after(self.config.timings.window_transition, task);
                }
            }
            ShellCommand::DockHover { zone, inside } => {
                let hide_at = self.due_after(self.config.timings.dock_auto_hide);
                self.dock.set_hover(zone, inside, &mut self.timers, hide_at);
            }
            ShellCommand::SetViewport(viewport) => self.viewport = viewport,
        }
    }

    fn apply(&mut self, action: DesktopAction) {
        match reduce_desktop(&mut self.state, action) {
            Ok(effects) => {
                for effect in effects {
                    self.run_effect(effect);
                }
            }
            Err(err) => warn!("desktop action rejected: {err}"),
        }
        let hide_at = self.due_after(self.config.timings.dock_auto_hide);
        let covered = self.state.has_visible_maximized_window();
        self.dock.set_covered(covered, &mut self.timers, hide_at);
    }

    fn run_effect(&mut self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::WindowOpened(window_id) => {
                self.chrome.insert(
                    window_id,
                    WindowChrome {
                        interaction: InteractionController::new(
                            window_id,
                            self.config.window_defaults.min_size,
                        ),
                        transition: WindowTransition::opening(window_id),
                        restore_geometry: None,
                    },
                );
                self.schedule_after(
                    self.config.timings.window_transition,
                    DeferredTask::FinishOpening(window_id),
                );
            }
            RuntimeEffect::WindowRestored(window_id) => {
                let Some(chrome) = self.chrome.get_mut(&window_id) else {
                    return;
                };
                chrome.transition = WindowTransition::opening(window_id);
                self.timers
                    .cancel_where(|task| *task == DeferredTask::FinishOpening(window_id));
                self.schedule_after(
                    self.config.timings.window_transition,
                    DeferredTask::FinishOpening(window_id),
                );
            }
            RuntimeEffect::WindowClosed(window_id) => {
                self.chrome.remove(&window_id);
                self.timers
                    .cancel_where(|task| task.window_id() == Some(window_id));
                if self.interacting == Some(window_id) {
                    self.interacting = None;
                }
            }
        }
    }

    fn run_task(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::FinishOpening(window_id) => {
                if let Some(chrome) = self.chrome.get_mut(&window_id) {
                    if !chrome.transition.is_exiting() {
                        chrome.transition.settle();
                    }
                }
            }
            DeferredTask::CommitClose(window_id) => {
                self.apply(DesktopAction::CloseWindow { window_id })
            }
            DeferredTask::CommitMinimize(window_id) => {
                self.apply(DesktopAction::MinimizeWindow { window_id });
                if let Some(chrome) = self.chrome.get_mut(&window_id) {
                    chrome.transition.settle();
                }
            }
            DeferredTask::HideDock => self.dock.hide_elapsed(),
            DeferredTask::RelaunchApp(app_id) => self.launch(app_id, LaunchSurface::Dock),
        }
    }

    fn launch(&mut self, app_id: ApplicationId, surface: LaunchSurface) {
        let Some(app) = self.descriptor(app_id) else {
            return;
        };
        let actions = dock::open_or_focus(
            &self.state,
            &app,
            surface,
            WindowId(self.next_window_id),
            self.viewport,
            &self.config.window_defaults,
        );
        if actions
            .iter()
            .any(|action| matches!(action, DesktopAction::OpenWindow(_)))
        {
            self.next_window_id += 1;
        }
        for action in actions {
            self.apply(action);
        }
    }

    fn restart(&mut self, app_id: ApplicationId) {
        let Some(app) = self.descriptor(app_id) else {
            return;
        };
        let Some(close) = dock::close_app(&self.state, &app) else {
            warn!("restart ignored: app {app_id} is not running");
            return;
        };
        self.apply(close);
        self.schedule_after(
            self.config.timings.restart_delay,
            DeferredTask::RelaunchApp(app_id),
        );
    }

    fn begin_interaction(&mut self, window_id: WindowId, pointer: PointerPosition, resize: bool) {
        if self.interacting.is_some() {
            return;
        }
        let Some(window) = self.state.window(window_id) else {
            return;
        };
        let Some(chrome) = self.chrome.get_mut(&window_id) else {
            return;
        };
        let focus = if resize {
            chrome.interaction.begin_resize(window, pointer)
        } else {
            chrome.interaction.begin_drag(window, pointer)
        };
        if let Some(focus) = focus {
            self.interacting = Some(window_id);
            self.apply(focus);
        }
    }

    fn toggle_maximize(&mut self, window_id: WindowId) {
        let Some(window) = self.state.window(window_id) else {
            return;
        };
        let Some(chrome) = self.chrome.get_mut(&window_id) else {
            return;
        };
        let actions = window_manager::toggle_maximize(
            window,
            &mut chrome.restore_geometry,
            self.viewport,
            &self.config.window_defaults,
        );
        for action in actions {
            self.apply(action);
        }
    }

    fn descriptor(&self, app_id: ApplicationId) -> Option<AppDescriptor> {
        let descriptor = self.catalog.descriptor(app_id);
        if descriptor.is_none() {
            warn!("unknown app id {app_id}");
        }
        descriptor
    }

    fn due_after(&self, delay: Duration) -> u64 {
        self.clock_ms.saturating_add(duration_ms(delay))
    }

    fn schedule_after(&mut self, delay: Duration, task: DeferredTask) {
        let due = self.due_after(delay);
        self.timers.schedule(due, task);
    }
}
