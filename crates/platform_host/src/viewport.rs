//! Viewport queries against the browser window.

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    /// Inner width of the browser window.
    pub width: i32,
    /// Inner height of the browser window.
    pub height: i32,
}

/// Size reported when no browser window is reachable.
pub const FALLBACK_VIEWPORT: ViewportSize = ViewportSize {
    width: 1280,
    height: 800,
};

/// Returns the browser window's inner size, or [`FALLBACK_VIEWPORT`] off-browser.
pub fn browser_viewport_size() -> ViewportSize {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(FALLBACK_VIEWPORT.width);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(FALLBACK_VIEWPORT.height);
            return ViewportSize {
                width: width.max(1),
                height: height.max(1),
            };
        }
    }

    FALLBACK_VIEWPORT
}
