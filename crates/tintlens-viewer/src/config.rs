//! Runtime configuration for the viewer.

use std::path::PathBuf;
use std::time::Duration;

use tintlens_core::event_loop::DEFAULT_POLL_INTERVAL;
use tintlens_core::geometry::{DisplayGeometry, GeometryError};
use tintlens_core::{Dimensions, SimulationMode};

/// Environment variable naming the palette table.
pub const PALETTE_ENV: &str = "TINTLENS_PALETTE";
/// Environment variable holding the available display area (`WxH`).
pub const DISPLAY_AREA_ENV: &str = "TINTLENS_DISPLAY_AREA";
/// Environment variable overriding the poll interval in milliseconds.
pub const POLL_ENV: &str = "TINTLENS_POLL_MS";

/// Resolved configuration for an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Image to open. `None` shows the file dialog.
    pub image: Option<PathBuf>,
    /// Palette table. `None` uses the builtin table.
    pub palette: Option<PathBuf>,
    /// Mode active when the window opens.
    pub mode: SimulationMode,
    /// Available rendering area, when known.
    pub display_area: Option<Dimensions>,
    /// Bounded wait between frames.
    pub poll_interval: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            image: None,
            palette: None,
            mode: SimulationMode::Normal,
            display_area: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ViewerConfig {
    /// Geometry source backed by the configured area.
    pub fn geometry(&self) -> ConfiguredArea {
        ConfiguredArea(self.display_area)
    }
}

/// Display area taken from the command line or environment.
///
/// The window library cannot report the screen size, so an unset area is
/// reported as unavailable and the core falls back to its estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfiguredArea(pub Option<Dimensions>);

impl DisplayGeometry for ConfiguredArea {
    fn available_area(&self) -> Result<Dimensions, GeometryError> {
        self.0.ok_or_else(|| {
            GeometryError::Unavailable(format!(
                "no display area configured (use --display-area or {DISPLAY_AREA_ENV})"
            ))
        })
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `1920x1000`.
pub fn parse_area(s: &str) -> Result<Dimensions, String> {
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let side = |v: &str| {
        v.trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("invalid size {v:?} in {s:?}"))
    };
    Ok(Dimensions::new(side(w)?, side(h)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tintlens_core::geometry::{FALLBACK_AREA, resolve_available_area};

    #[test]
    fn test_parse_area() {
        assert_eq!(parse_area("1920x1000"), Ok(Dimensions::new(1920, 1000)));
        assert_eq!(parse_area(" 800X600 "), Ok(Dimensions::new(800, 600)));
    }

    #[test]
    fn test_parse_area_rejects_garbage() {
        assert!(parse_area("1920").is_err());
        assert!(parse_area("0x600").is_err());
        assert!(parse_area("wide x tall").is_err());
        assert!(parse_area("-5x5").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert_eq!(config.mode, SimulationMode::Normal);
        assert_eq!(config.poll_interval, Duration::from_millis(20));
        assert!(config.image.is_none());
    }

    #[test]
    fn test_configured_area_is_used() {
        let config = ViewerConfig {
            display_area: Some(Dimensions::new(1280, 700)),
            ..ViewerConfig::default()
        };
        assert_eq!(resolve_available_area(&config.geometry()), Dimensions::new(1280, 700));
    }

    #[test]
    fn test_missing_area_uses_fallback() {
        let config = ViewerConfig::default();
        assert!(config.geometry().available_area().is_err());
        assert_eq!(resolve_available_area(&config.geometry()), FALLBACK_AREA);
    }
}
