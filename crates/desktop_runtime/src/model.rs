use desktop_app_contract::ApplicationId;
use serde::{Deserialize, Serialize};

/// Smallest width a resize (or size update) may produce.
pub const MIN_WINDOW_WIDTH: i32 = 400;
/// Smallest height a resize (or size update) may produce.
pub const MIN_WINDOW_HEIGHT: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

impl WindowSize {
    pub fn grown(self, dw: i32, dh: i32) -> Self {
        Self {
            width: self.width + dw,
            height: self.height + dh,
        }
    }

    pub fn clamped_min(self, min: WindowSize) -> Self {
        Self {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: MIN_WINDOW_WIDTH,
            height: MIN_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub position: WindowPosition,
    pub size: WindowSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Geometry covering the whole viewport.
    pub fn full_geometry(self) -> WindowGeometry {
        WindowGeometry {
            position: WindowPosition::default(),
            size: WindowSize {
                width: self.width,
                height: self.height,
            },
        }
    }
}

impl From<platform_host::ViewportSize> for Viewport {
    fn from(size: platform_host::ViewportSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        platform_host::FALLBACK_VIEWPORT.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: ApplicationId,
    pub title: String,
    pub icon_id: String,
    pub minimized: bool,
    pub maximized: bool,
    pub z_index: u32,
    pub position: WindowPosition,
    pub size: WindowSize,
    pub is_settings: bool,
}

impl WindowRecord {
    pub fn geometry(&self) -> WindowGeometry {
        WindowGeometry {
            position: self.position,
            size: self.size,
        }
    }

    /// Visible windows are rendered; minimized ones only appear as dock indicators.
    pub fn is_visible(&self) -> bool {
        !self.minimized
    }
}

/// In-memory window store. Mutated only through [`crate::reducer::reduce_desktop`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesktopState {
    pub windows: Vec<WindowRecord>,
    pub active_window_id: Option<WindowId>,
    /// Highest z-index ever assigned. Never decreases, including after closes.
    pub max_z_index: u32,
}

impl DesktopState {
    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    /// Main (non-settings) window for an app, if one is open.
    pub fn window_for_app(&self, app_id: ApplicationId) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .find(|w| w.app_id == app_id && !w.is_settings)
    }

    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.active_window_id.and_then(|id| self.window(id))
    }

    pub fn visible_window_ids(&self) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|w| w.is_visible())
            .map(|w| w.id)
            .collect()
    }

    pub fn has_visible_maximized_window(&self) -> bool {
        self.windows.iter().any(|w| w.maximized && w.is_visible())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub id: WindowId,
    pub app_id: ApplicationId,
    pub title: String,
    pub icon_id: String,
    pub position: WindowPosition,
    pub size: WindowSize,
    #[serde(default)]
    pub is_settings: bool,
}

impl OpenWindowRequest {
    pub fn new(
        id: WindowId,
        app_id: ApplicationId,
        title: impl Into<String>,
        icon_id: impl Into<String>,
        geometry: WindowGeometry,
    ) -> Self {
        Self {
            id,
            app_id,
            title: title.into(),
            icon_id: icon_id.into(),
            position: geometry.position,
            size: geometry.size,
            is_settings: false,
        }
    }

    pub fn settings(mut self) -> Self {
        self.is_settings = true;
        self
    }
}
