pub mod apps;
pub mod components;
pub mod config;
pub mod dock;
mod host;
pub mod icons;
pub mod interaction;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod session;
pub mod timers;
pub mod transitions;
pub mod window_manager;

pub use apps::{AppCatalog, AppDescriptor, CatalogError, WindowView};
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{SessionConfig, ShellTimings, WindowDefaults};
pub use dock::{DockHoverZone, DockMenuEntry, LaunchSurface};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use session::{DesktopSession, ShellCommand, WindowChrome};
pub use transitions::TransitionPhase;
