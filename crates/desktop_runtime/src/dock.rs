//! Launch, close, restart, and settings flows shared by the dock and the app panel, plus the
//! dock's context menu model and auto-hide state.

use serde::{Deserialize, Serialize};

use crate::apps::AppDescriptor;
use crate::config::WindowDefaults;
use crate::model::{
    DesktopState, OpenWindowRequest, PointerPosition, Viewport, WindowId, WindowSize,
};
use crate::reducer::DesktopAction;
use crate::timers::{TimerHandle, TimerQueue};
use crate::transitions::DeferredTask;
use crate::window_manager::{centered_default_geometry, full_viewport_geometry};

/// Distance kept between the context menu and the viewport edge.
pub const MENU_EDGE_MARGIN: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Surface an app launch originated from. Decides the initial geometry of new windows.
pub enum LaunchSurface {
    /// Centered default geometry.
    AppPanel,
    /// Full viewport, maximized right after opening.
    Dock,
}

/// Actions bringing `app` to the front, opening a window when none exists.
///
/// An existing main window is restored first when minimized, then focused. Otherwise a new
/// window with id `new_window_id` is opened with geometry chosen by `surface`.
pub fn open_or_focus(
    state: &DesktopState,
    app: &AppDescriptor,
    surface: LaunchSurface,
    new_window_id: WindowId,
    viewport: Viewport,
    defaults: &WindowDefaults,
) -> Vec<DesktopAction> {
    if let Some(window) = state.window_for_app(app.app_id) {
        let window_id = window.id;
        let mut actions = Vec::with_capacity(2);
        if window.minimized {
            actions.push(DesktopAction::RestoreWindow { window_id });
        }
        actions.push(DesktopAction::FocusWindow { window_id });
        return actions;
    }

    let geometry = match surface {
        LaunchSurface::AppPanel => centered_default_geometry(viewport, defaults),
        LaunchSurface::Dock => full_viewport_geometry(viewport),
    };
    let open = DesktopAction::OpenWindow(OpenWindowRequest::new(
        new_window_id,
        app.app_id,
        app.display_name.clone(),
        app.icon_id.clone(),
        geometry,
    ));
    match surface {
        LaunchSurface::AppPanel => vec![open],
        LaunchSurface::Dock => vec![
            open,
            DesktopAction::MaximizeWindow {
                window_id: new_window_id,
            },
        ],
    }
}

/// Immediate close of the app's main window, if it is running.
pub fn close_app(state: &DesktopState, app: &AppDescriptor) -> Option<DesktopAction> {
    state
        .window_for_app(app.app_id)
        .map(|window| DesktopAction::CloseWindow {
            window_id: window.id,
        })
}

/// Opens the app's settings window. `None` when the app declares no settings view.
pub fn open_settings(
    app: &AppDescriptor,
    new_window_id: WindowId,
    defaults: &WindowDefaults,
) -> Option<DesktopAction> {
    if !app.has_settings {
        return None;
    }
    Some(DesktopAction::OpenWindow(
        OpenWindowRequest::new(
            new_window_id,
            app.app_id,
            format!("{} - Settings", app.display_name),
            app.icon_id.clone(),
            defaults.settings_geometry,
        )
        .settings(),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockMenuEntry {
    /// Disabled row describing whether the app runs.
    Status { running: bool },
    Separator,
    OpenOrFocus { running: bool },
    Restart,
    Close,
    Settings,
    Info,
}

impl DockMenuEntry {
    pub fn label(self) -> &'static str {
        match self {
            Self::Status { running: true } => "Running",
            Self::Status { running: false } => "Not running",
            Self::Separator => "",
            Self::OpenOrFocus { running: true } => "Focus window",
            Self::OpenOrFocus { running: false } => "Open",
            Self::Restart => "Restart",
            Self::Close => "Close",
            Self::Settings => "Settings",
            Self::Info => "App info",
        }
    }

    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Status { .. } | Self::Separator)
    }

    pub fn is_danger(self) -> bool {
        matches!(self, Self::Close)
    }
}

/// Context menu rows for `app` given the current store.
pub fn context_menu_entries(state: &DesktopState, app: &AppDescriptor) -> Vec<DockMenuEntry> {
    let running = state.window_for_app(app.app_id).is_some();
    let mut entries = vec![
        DockMenuEntry::Status { running },
        DockMenuEntry::Separator,
        DockMenuEntry::OpenOrFocus { running },
    ];
    if running {
        entries.extend([DockMenuEntry::Restart, DockMenuEntry::Close]);
    }
    entries.push(DockMenuEntry::Separator);
    if app.has_settings {
        entries.push(DockMenuEntry::Settings);
    }
    if app.info.is_some() {
        entries.push(DockMenuEntry::Info);
    }
    entries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DockIndicator {
    pub active: bool,
    pub minimized: bool,
}

pub fn dock_indicator(state: &DesktopState, app: &AppDescriptor) -> DockIndicator {
    state
        .window_for_app(app.app_id)
        .map(|window| DockIndicator {
            active: !window.minimized,
            minimized: window.minimized,
        })
        .unwrap_or_default()
}

/// Top-left corner for a context menu opened at `anchor`.
///
/// The menu flips left (or up) when it would cross the far edge minus the margin, and never
/// starts closer than the margin to the near edge.
pub fn clamp_menu_position(
    anchor: PointerPosition,
    menu: WindowSize,
    viewport: Viewport,
) -> PointerPosition {
    let mut x = anchor.x;
    let mut y = anchor.y;
    if x + menu.width > viewport.width - MENU_EDGE_MARGIN {
        x -= menu.width;
    }
    if y + menu.height > viewport.height - MENU_EDGE_MARGIN {
        y -= menu.height;
    }
    PointerPosition {
        x: x.max(MENU_EDGE_MARGIN),
        y: y.max(MENU_EDGE_MARGIN),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockHoverZone {
    Dock,
    /// Bottom-edge strip rendered while a maximized window covers the dock.
    EdgeTrigger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Dock auto-hide state.
///
/// Inputs are the two hover flags and whether a visible maximized window exists; the hide
/// timer is re-evaluated only when one of them changes.
pub struct DockVisibility {
    visible: bool,
    pointer_in_dock: bool,
    pointer_in_trigger: bool,
    covered: bool,
    hide_timer: Option<TimerHandle>,
}

impl Default for DockVisibility {
    fn default() -> Self {
        Self {
            visible: true,
            pointer_in_dock: false,
            pointer_in_trigger: false,
            covered: false,
            hide_timer: None,
        }
    }
}

impl DockVisibility {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the edge trigger strip should be rendered.
    pub fn is_covered(&self) -> bool {
        self.covered
    }

    pub fn hide_pending(&self) -> bool {
        self.hide_timer.is_some()
    }

    pub fn set_hover(
        &mut self,
        zone: DockHoverZone,
        inside: bool,
        timers: &mut TimerQueue<DeferredTask>,
        hide_at_ms: u64,
    ) {
        let slot = match zone {
            DockHoverZone::Dock => &mut self.pointer_in_dock,
            DockHoverZone::EdgeTrigger => &mut self.pointer_in_trigger,
        };
        if *slot != inside {
            *slot = inside;
            self.reconcile(timers, hide_at_ms);
        }
    }

    pub fn set_covered(
        &mut self,
        covered: bool,
        timers: &mut TimerQueue<DeferredTask>,
        hide_at_ms: u64,
    ) {
        if self.covered != covered {
            self.covered = covered;
            self.reconcile(timers, hide_at_ms);
        }
    }

    /// Fired by the [`DeferredTask::HideDock`] timer.
    pub fn hide_elapsed(&mut self) {
        self.hide_timer = None;
        self.visible = false;
    }

    fn reconcile(&mut self, timers: &mut TimerQueue<DeferredTask>, hide_at_ms: u64) {
        if let Some(handle) = self.hide_timer.take() {
            timers.cancel(handle);
        }
        if !self.covered || self.pointer_in_dock || self.pointer_in_trigger {
            self.visible = true;
            return;
        }
        self.hide_timer = Some(timers.schedule(hide_at_ms, DeferredTask::HideDock));
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{AppInfo, ApplicationId};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{WindowPosition, WindowRecord};

    fn app(id: u32, has_settings: bool, with_info: bool) -> AppDescriptor {
        AppDescriptor {
            app_id: ApplicationId::new(id),
            display_name: format!("App {id}"),
            icon_id: "book".to_string(),
            has_settings,
            info: with_info.then(|| AppInfo {
                version: "1.0.0".to_string(),
                description: "d".to_string(),
                author: "a".to_string(),
                homepage: None,
                release_date: None,
            }),
        }
    }

    fn state_with(app_id: u32, minimized: bool) -> DesktopState {
        DesktopState {
            windows: vec![WindowRecord {
                id: WindowId(10),
                app_id: ApplicationId::new(app_id),
                title: "App".to_string(),
                icon_id: "book".to_string(),
                minimized,
                maximized: false,
                z_index: 1,
                position: WindowPosition::default(),
                size: WindowSize::default(),
                is_settings: false,
            }],
            active_window_id: Some(WindowId(10)),
            max_z_index: 1,
        }
    }

    #[test]
    fn launching_minimized_app_restores_then_focuses() {
        let actions = open_or_focus(
            &state_with(1, true),
            &app(1, false, false),
            LaunchSurface::Dock,
            WindowId(99),
            Viewport::default(),
            &WindowDefaults::default(),
        );
        assert_eq!(
            actions,
            vec![
                DesktopAction::RestoreWindow {
                    window_id: WindowId(10)
                },
                DesktopAction::FocusWindow {
                    window_id: WindowId(10)
                },
            ]
        );
    }

    #[test]
    fn dock_launch_opens_full_viewport_then_maximizes() {
        let viewport = Viewport {
            width: 1440,
            height: 900,
        };
        let actions = open_or_focus(
            &DesktopState::default(),
            &app(2, false, false),
            LaunchSurface::Dock,
            WindowId(5),
            viewport,
            &WindowDefaults::default(),
        );
        let [DesktopAction::OpenWindow(req), DesktopAction::MaximizeWindow { window_id }] =
            actions.as_slice()
        else {
            panic!("unexpected actions: {actions:?}");
        };
        assert_eq!(*window_id, WindowId(5));
        assert_eq!(req.position, WindowPosition::default());
        assert_eq!(
            req.size,
            WindowSize {
                width: 1440,
                height: 900
            }
        );
        assert_eq!(req.title, "App 2");
    }

    #[test]
    fn settings_windows_require_a_settings_view() {
        let defaults = WindowDefaults::default();
        assert_eq!(open_settings(&app(1, false, false), WindowId(3), &defaults), None);

        let Some(DesktopAction::OpenWindow(req)) =
            open_settings(&app(1, true, false), WindowId(3), &defaults)
        else {
            panic!("expected settings window");
        };
        assert!(req.is_settings);
        assert_eq!(req.title, "App 1 - Settings");
        assert_eq!(req.position, WindowPosition { x: 100, y: 100 });
        assert_eq!(
            req.size,
            WindowSize {
                width: 600,
                height: 400
            }
        );
    }

    #[test]
    fn menu_entries_follow_running_state_and_capabilities() {
        assert_eq!(
            context_menu_entries(&DesktopState::default(), &app(1, false, true)),
            vec![
                DockMenuEntry::Status { running: false },
                DockMenuEntry::Separator,
                DockMenuEntry::OpenOrFocus { running: false },
                DockMenuEntry::Separator,
                DockMenuEntry::Info,
            ]
        );
        let entries = context_menu_entries(&state_with(1, false), &app(1, true, false));
        assert_eq!(
            entries,
            vec![
                DockMenuEntry::Status { running: true },
                DockMenuEntry::Separator,
                DockMenuEntry::OpenOrFocus { running: true },
                DockMenuEntry::Restart,
                DockMenuEntry::Close,
                DockMenuEntry::Separator,
                DockMenuEntry::Settings,
            ]
        );
        assert_eq!(entries[2].label(), "Focus window");
    }

    #[test]
    fn indicators_reflect_window_state() {
        assert_eq!(
            dock_indicator(&state_with(1, true), &app(1, false, false)),
            DockIndicator {
                active: false,
                minimized: true
            }
        );
        assert_eq!(
            dock_indicator(&state_with(1, false), &app(1, false, false)),
            DockIndicator {
                active: true,
                minimized: false
            }
        );
        assert_eq!(
            dock_indicator(&state_with(1, false), &app(2, false, false)),
            DockIndicator::default()
        );
    }

    #[test]
    fn menu_flips_near_far_edges_and_keeps_margin() {
        let viewport = Viewport {
            width: 800,
            height: 600,
        };
        let menu = WindowSize {
            width: 200,
            height: 240,
        };
        assert_eq!(
            clamp_menu_position(PointerPosition { x: 100, y: 100 }, menu, viewport),
            PointerPosition { x: 100, y: 100 }
        );
        assert_eq!(
            clamp_menu_position(PointerPosition { x: 700, y: 580 }, menu, viewport),
            PointerPosition { x: 500, y: 340 }
        );
        assert_eq!(
            clamp_menu_position(PointerPosition { x: 2, y: 3 }, menu, viewport),
            PointerPosition { x: 10, y: 10 }
        );
    }

    #[test]
    fn dock_hides_only_when_covered_and_unhovered() {
        let mut timers = TimerQueue::new();
        let mut dock = DockVisibility::default();

        dock.set_hover(DockHoverZone::Dock, false, &mut timers, 1000);
        assert!(timers.is_empty());

        dock.set_covered(true, &mut timers, 1000);
        assert!(dock.hide_pending());
        assert_eq!(timers.next_due(), Some(1000));

        dock.set_hover(DockHoverZone::EdgeTrigger, true, &mut timers, 1500);
        assert!(!dock.hide_pending());
        assert!(timers.is_empty());
        assert!(dock.is_visible());

        dock.set_hover(DockHoverZone::EdgeTrigger, false, &mut timers, 2000);
        assert_eq!(timers.pop_due(2000), Some((2000, DeferredTask::HideDock)));
        dock.hide_elapsed();
        assert!(!dock.is_visible());

        dock.set_covered(false, &mut timers, 2500);
        assert!(dock.is_visible());
        assert!(timers.is_empty());
    }
}
