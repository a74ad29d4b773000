use std::time::Duration;

use desktop_app_contract::{AppRegistration, ApplicationId};
use desktop_app_portal::PORTAL_PAGE_MODULE;
use desktop_runtime::{
    reduce_desktop, AppCatalog, DesktopAction, DesktopSession, DesktopState, DockHoverZone,
    LaunchSurface, OpenWindowRequest, PointerPosition, SessionConfig, ShellCommand,
    TransitionPhase, Viewport, WindowGeometry, WindowId, WindowPosition, WindowRecord,
    WindowSize, WindowView,
};
use pretty_assertions::assert_eq;

const BLOG: ApplicationId = ApplicationId::new(1);
const PROJECTS: ApplicationId = ApplicationId::new(2);

fn session() -> DesktopSession {
    DesktopSession::new(
        SessionConfig::default(),
        AppCatalog::builtin().clone(),
        Viewport {
            width: 1000,
            height: 700,
        },
        0,
    )
}

fn catalog_with_settings() -> AppCatalog {
    let notes = AppRegistration {
        app_id: ApplicationId::new(10),
        display_name: "Notes".to_string(),
        icon_id: "book".to_string(),
        module: PORTAL_PAGE_MODULE,
        settings_module: Some(PORTAL_PAGE_MODULE),
        info: None,
        launch_params: serde_json::Value::Null,
    };
    AppCatalog::new(vec![notes]).expect("catalog")
}

fn phase(session: &DesktopSession, id: u64) -> Option<TransitionPhase> {
    session
        .chrome(WindowId(id))
        .map(|chrome| chrome.transition().phase())
}

fn launch(session: &mut DesktopSession, app_id: ApplicationId, surface: LaunchSurface) {
    session.handle(ShellCommand::LaunchApp { app_id, surface });
}

fn z_index(session: &DesktopSession, id: u64) -> Option<u32> {
    session.state().window(WindowId(id)).map(|w| w.z_index)
}

#[test]
fn focus_raises_window_above_every_earlier_assignment() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::AppPanel);
    assert_eq!(z_index(&session, 1), Some(1));
    assert_eq!(session.state().active_window_id, Some(WindowId(1)));

    launch(&mut session, PROJECTS, LaunchSurface::AppPanel);
    assert_eq!(z_index(&session, 2), Some(2));

    session.handle(ShellCommand::Store(DesktopAction::FocusWindow {
        window_id: WindowId(1),
    }));
    assert_eq!(z_index(&session, 1), Some(3));
    assert_eq!(z_index(&session, 2), Some(2));
    assert_eq!(session.state().active_window_id, Some(WindowId(1)));
}

#[test]
fn launching_a_running_app_focuses_instead_of_duplicating() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::AppPanel);
    launch(&mut session, PROJECTS, LaunchSurface::AppPanel);
    launch(&mut session, BLOG, LaunchSurface::Dock);

    assert_eq!(session.state().windows.len(), 2);
    assert_eq!(z_index(&session, 1), Some(3));
    assert!(!session.state().windows[0].maximized);
}

#[test]
fn app_panel_launch_is_centered_at_default_size() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::AppPanel);
    let window = session.state().window(WindowId(1)).expect("window");
    assert_eq!(window.position, WindowPosition { x: 100, y: 70 });
    assert_eq!(
        window.size,
        WindowSize {
            width: 800,
            height: 560
        }
    );
    assert_eq!(window.title, "Blog");
    assert!(!window.maximized);
}

#[test]
fn duplicate_open_through_store_is_rejected() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::AppPanel);
    let before = session.state().clone();

    session.handle(ShellCommand::Store(DesktopAction::OpenWindow(
        OpenWindowRequest::new(
            WindowId(1),
            PROJECTS,
            "Projects",
            "project",
            WindowGeometry::default(),
        ),
    )));
    assert_eq!(session.state(), &before);
}

#[test]
fn minimize_commits_after_transition_and_restore_clears_both_flags() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::Dock);
    let window = session.state().window(WindowId(1)).expect("window");
    assert!(window.maximized);

    session.handle(ShellCommand::RequestMinimize {
        window_id: WindowId(1),
    });
    session.handle(ShellCommand::RequestMinimize {
        window_id: WindowId(1),
    });
    assert_eq!(
        session
            .chrome(WindowId(1))
            .map(|chrome| chrome.transition().phase()),
        Some(TransitionPhase::Minimizing)
    );
    session.advance_by(Duration::from_millis(299));
    assert!(!session.state().windows[0].minimized);
    session.advance_by(Duration::from_millis(1));
    assert!(session.state().windows[0].minimized);
    assert!(session.state().windows[0].maximized);
    assert_eq!(
        session
            .chrome(WindowId(1))
            .map(|chrome| chrome.transition().phase()),
        Some(TransitionPhase::Settled)
    );

    session.handle(ShellCommand::Store(DesktopAction::RestoreWindow {
        window_id: WindowId(1),
    }));
    let window = session.state().window(WindowId(1)).expect("window");
    assert!(!window.minimized);
    assert!(!window.maximized);
}

#[test]
fn close_request_commits_exactly_after_transition() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::AppPanel);
    session.advance_to(1_000);

    session.handle(ShellCommand::RequestClose {
        window_id: WindowId(1),
    });
    assert_eq!(session.next_due_ms(), Some(1_300));
    session.advance_to(1_299);
    assert_eq!(session.state().windows.len(), 1);
    session.advance_to(1_300);
    assert!(session.state().windows.is_empty());
    assert!(session.chrome(WindowId(1)).is_none());

    session.handle(ShellCommand::RequestClose {
        window_id: WindowId(1),
    });
    assert_eq!(session.next_due_ms(), None);
}

#[test]
fn header_drag_moves_window_by_pointer_delta() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::AppPanel);
    session.handle(ShellCommand::Store(DesktopAction::UpdateWindowPosition {
        window_id: WindowId(1),
        position: WindowPosition { x: 100, y: 100 },
    }));

    session.handle(ShellCommand::HeaderPointerDown {
        window_id: WindowId(1),
        pointer: PointerPosition { x: 50, y: 50 },
    });
    session.handle(ShellCommand::PointerMove {
        pointer: PointerPosition { x: 60, y: 55 },
    });
    session.handle(ShellCommand::PointerMove {
        pointer: PointerPosition { x: 80, y: 70 },
    });
    let position = session.state().window(WindowId(1)).map(|w| w.position);
    assert_eq!(position, Some(WindowPosition { x: 100, y: 100 }));

    session.handle(ShellCommand::AnimationFrame);
    let position = session.state().window(WindowId(1)).map(|w| w.position);
    assert_eq!(position, Some(WindowPosition { x: 130, y: 120 }));
}

#[test]
fn pointer_up_applies_the_last_unflushed_move() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::AppPanel);
    session.handle(ShellCommand::ResizePointerDown {
        window_id: WindowId(1),
        pointer: PointerPosition { x: 900, y: 630 },
    });
    session.handle(ShellCommand::PointerMove {
        pointer: PointerPosition { x: 100, y: 700 },
    });
    session.handle(ShellCommand::PointerUp);

    assert_eq!(
        session.state().window(WindowId(1)).map(|w| w.size),
        Some(WindowSize {
            width: 400,
            height: 630
        })
    );
    session.handle(ShellCommand::PointerMove {
        pointer: PointerPosition { x: 0, y: 0 },
    });
    assert!(!session.wants_animation_frame());
}

#[test]
fn maximized_windows_ignore_header_drags() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::Dock);
    let before = session.state().clone();

    session.handle(ShellCommand::HeaderPointerDown {
        window_id: WindowId(1),
        pointer: PointerPosition { x: 5, y: 5 },
    });
    session.handle(ShellCommand::PointerMove {
        pointer: PointerPosition { x: 300, y: 300 },
    });
    session.handle(ShellCommand::AnimationFrame);
    assert_eq!(session.state(), &before);
    assert_eq!(session.interacting_window(), None);
}

#[test]
fn maximize_then_restore_returns_to_recorded_geometry() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::AppPanel);
    let before = session
        .state()
        .window(WindowId(1))
        .map(|w| w.geometry())
        .expect("window");

    session.handle(ShellCommand::ToggleMaximize {
        window_id: WindowId(1),
    });
    assert!(session.state().windows[0].maximized);
    session.handle(ShellCommand::ToggleMaximize {
        window_id: WindowId(1),
    });
    let window = session.state().window(WindowId(1)).expect("window");
    assert!(!window.maximized);
    assert_eq!(window.geometry(), before);
}

#[test]
fn restoring_a_dock_launched_window_uses_centered_default() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::Dock);
    session.handle(ShellCommand::SetViewport(Viewport {
        width: 2000,
        height: 1200,
    }));
    session.handle(ShellCommand::ToggleMaximize {
        window_id: WindowId(1),
    });

    let window = session.state().window(WindowId(1)).expect("window");
    assert_eq!(
        window.geometry(),
        WindowGeometry {
            position: WindowPosition { x: 400, y: 200 },
            size: WindowSize {
                width: 1200,
                height: 800
            },
        }
    );
}

#[test]
fn restart_reopens_through_dock_path_after_delay() {
    let mut session = session();
    launch(&mut session, PROJECTS, LaunchSurface::AppPanel);
    session.advance_to(100);

    session.handle(ShellCommand::RestartApp { app_id: PROJECTS });
    assert!(session.state().windows.is_empty());
    session.advance_to(1_099);
    assert!(session.state().windows.is_empty());
    session.advance_to(1_100);

    let window = session.state().window_for_app(PROJECTS).expect("reopened");
    assert_eq!(window.id, WindowId(2));
    assert!(window.maximized);
    assert_eq!(
        window.size,
        WindowSize {
            width: 1000,
            height: 700
        }
    );
}

#[test]
fn restart_relaunch_sees_windows_opened_during_the_gap() {
    let mut session = session();
    launch(&mut session, PROJECTS, LaunchSurface::AppPanel);
    session.handle(ShellCommand::RestartApp { app_id: PROJECTS });
    session.advance_to(500);
    launch(&mut session, PROJECTS, LaunchSurface::AppPanel);
    session.advance_to(1_000);

    assert_eq!(session.state().windows.len(), 1);
    assert_eq!(session.state().windows[0].id, WindowId(2));
    assert!(!session.state().windows[0].maximized);
}

#[test]
fn dock_hides_one_second_after_pointer_leaves_over_maximized_window() {
    let mut session = session();
    session.handle(ShellCommand::DockHover {
        zone: DockHoverZone::Dock,
        inside: true,
    });
    launch(&mut session, BLOG, LaunchSurface::Dock);
    assert!(session.dock().is_covered());
    assert!(!session.dock().hide_pending());

    session.advance_to(500);
    session.handle(ShellCommand::DockHover {
        zone: DockHoverZone::Dock,
        inside: false,
    });
    session.advance_to(1_499);
    assert!(session.dock().is_visible());
    session.advance_to(1_500);
    assert!(!session.dock().is_visible());

    session.handle(ShellCommand::DockHover {
        zone: DockHoverZone::EdgeTrigger,
        inside: true,
    });
    assert!(session.dock().is_visible());
}

#[test]
fn dock_stays_visible_once_no_maximized_window_is_shown() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::Dock);
    assert!(session.dock().hide_pending());

    session.handle(ShellCommand::RequestMinimize {
        window_id: WindowId(1),
    });
    session.advance_to(300);
    assert!(!session.dock().is_covered());
    assert!(!session.dock().hide_pending());
    session.advance_to(5_000);
    assert!(session.dock().is_visible());
}

#[test]
fn restoring_a_minimized_window_replays_the_opening_transition() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::AppPanel);
    session.advance_to(300);
    assert_eq!(phase(&session, 1), Some(TransitionPhase::Settled));

    session.handle(ShellCommand::RequestMinimize {
        window_id: WindowId(1),
    });
    session.advance_to(600);
    assert!(session.state().windows[0].minimized);
    assert_eq!(session.pending_task_count(), 0);

    launch(&mut session, BLOG, LaunchSurface::Dock);
    assert!(!session.state().windows[0].minimized);
    assert_eq!(phase(&session, 1), Some(TransitionPhase::Opening));
    assert_eq!(session.next_due_ms(), Some(900));

    session.advance_to(899);
    assert_eq!(phase(&session, 1), Some(TransitionPhase::Opening));
    session.advance_to(900);
    assert_eq!(phase(&session, 1), Some(TransitionPhase::Settled));
}

#[test]
fn focusing_a_visible_window_does_not_replay_the_opening_transition() {
    let mut session = session();
    launch(&mut session, BLOG, LaunchSurface::AppPanel);
    session.advance_to(300);

    launch(&mut session, BLOG, LaunchSurface::AppPanel);
    assert_eq!(phase(&session, 1), Some(TransitionPhase::Settled));
    assert_eq!(session.pending_task_count(), 0);
}

#[test]
fn settings_window_opens_independently_of_the_main_window() {
    let notes = ApplicationId::new(10);
    let mut session = DesktopSession::new(
        SessionConfig::default(),
        catalog_with_settings(),
        Viewport {
            width: 1000,
            height: 700,
        },
        0,
    );
    launch(&mut session, notes, LaunchSurface::AppPanel);
    session.handle(ShellCommand::OpenAppSettings { app_id: notes });

    assert_eq!(session.state().windows.len(), 2);
    let settings = session.state().window(WindowId(2)).expect("settings window");
    assert!(settings.is_settings);
    assert_eq!(settings.app_id, notes);
    assert_eq!(settings.title, "Notes - Settings");
    assert_eq!(
        settings.geometry(),
        WindowGeometry {
            position: WindowPosition { x: 100, y: 100 },
            size: WindowSize {
                width: 600,
                height: 400
            },
        }
    );
    assert_eq!(session.state().active_window_id, Some(WindowId(2)));
    assert!(matches!(
        session.catalog().window_view(settings),
        WindowView::Ready { ref context, .. } if context.settings && context.window_id == 2
    ));

    launch(&mut session, notes, LaunchSurface::Dock);
    assert_eq!(session.state().windows.len(), 2);
    assert_eq!(session.state().active_window_id, Some(WindowId(1)));
    assert!(!session.state().windows[0].maximized);

    session.handle(ShellCommand::CloseApp { app_id: notes });
    let remaining: Vec<_> = session.state().windows.iter().map(|w| w.id).collect();
    assert_eq!(remaining, vec![WindowId(2)]);

    launch(&mut session, notes, LaunchSurface::AppPanel);
    assert!(session.state().window(WindowId(3)).is_some());
}

#[test]
fn settings_windows_without_a_settings_view_resolve_to_missing() {
    let settings = OpenWindowRequest::new(
        WindowId(5),
        BLOG,
        "Blog - Settings",
        "book",
        WindowGeometry::default(),
    )
    .settings();
    let mut state = DesktopState::default();
    reduce_desktop(&mut state, DesktopAction::OpenWindow(settings)).expect("open settings window");
    let window = state.window(WindowId(5)).expect("window");

    assert!(matches!(
        AppCatalog::builtin().window_view(window),
        WindowView::Missing { settings: true }
    ));
    let notes_settings = WindowRecord {
        app_id: ApplicationId::new(10),
        ..window.clone()
    };
    assert!(matches!(
        catalog_with_settings().window_view(&notes_settings),
        WindowView::Ready { ref context, .. } if context.settings
    ));
}
