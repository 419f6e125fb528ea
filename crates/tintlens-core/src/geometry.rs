//! Available display area, as reported by the windowing environment.
//!
//! The area is queried once at load time to compute the scale factor. When
//! the environment cannot report it, a fixed estimate is used instead: a
//! 1920×1080 screen minus an estimated 80 px of window chrome.

use crate::viewport::Dimensions;

/// Assumed screen width when geometry is unavailable.
pub const FALLBACK_SCREEN_WIDTH: u32 = 1920;
/// Assumed screen height when geometry is unavailable.
pub const FALLBACK_SCREEN_HEIGHT: u32 = 1080;
/// Estimated height of title bar, taskbar and window borders.
pub const ESTIMATED_CHROME_HEIGHT: u32 = 80;

/// The area used when no geometry can be obtained.
pub const FALLBACK_AREA: Dimensions = Dimensions {
    width: FALLBACK_SCREEN_WIDTH,
    height: FALLBACK_SCREEN_HEIGHT - ESTIMATED_CHROME_HEIGHT,
};

/// Errors reported by a [`DisplayGeometry`] source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("display geometry unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to the area an image may occupy on screen.
pub trait DisplayGeometry {
    /// Width and height available for rendering.
    fn available_area(&self) -> Result<Dimensions, GeometryError>;
}

impl DisplayGeometry for Dimensions {
    fn available_area(&self) -> Result<Dimensions, GeometryError> {
        Ok(*self)
    }
}

/// Query `source`, falling back to [`FALLBACK_AREA`] when it has no answer.
///
/// A zero-sized report is treated the same as no report.
pub fn resolve_available_area(source: &dyn DisplayGeometry) -> Dimensions {
    match source.available_area() {
        Ok(area) if area.width > 0 && area.height > 0 => {
            tracing::debug!(width = area.width, height = area.height, "display area");
            area
        }
        Ok(area) => {
            tracing::warn!(
                width = area.width,
                height = area.height,
                fallback = %FALLBACK_AREA,
                "display area is empty; using fallback"
            );
            FALLBACK_AREA
        }
        Err(e) => {
            tracing::warn!(%e, fallback = %FALLBACK_AREA, "using fallback display area");
            FALLBACK_AREA
        }
    }
}
