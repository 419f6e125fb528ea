//! Headless pixel lookup for the `probe` subcommand.

use image::RgbImage;
use serde::Serialize;
use tintlens_core::simulate::simulate_pixel;
use tintlens_core::{ColorMatch, Dimensions, MatchError, Palette, SimulationMode, match_color};

/// Which buffer a probe reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Original,
    Simulated,
}

/// Result of probing one pixel, serialized as the command's output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    pub x: u32,
    pub y: u32,
    pub mode: SimulationMode,
    pub source: Source,
    #[serde(rename = "match")]
    pub color: ColorMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("pixel ({x}, {y}) is outside the {size} image")]
    OutOfBounds { x: u32, y: u32, size: Dimensions },
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Identify the pixel at `(x, y)` of `image`.
///
/// With [`Source::Simulated`] the pixel is passed through `mode` before
/// matching, showing what the color looks like under that deficiency.
pub fn probe(
    palette: &Palette,
    image: &RgbImage,
    x: u32,
    y: u32,
    mode: SimulationMode,
    source: Source,
) -> Result<ProbeReport, ProbeError> {
    let size = Dimensions::of(image);
    if !size.contains(x, y) {
        return Err(ProbeError::OutOfBounds { x, y, size });
    }

    let mut rgb = image.get_pixel(x, y).0;
    if source == Source::Simulated {
        rgb = simulate_pixel(rgb, mode);
    }
    let color = match_color(palette, rgb)?;
    tracing::debug!(x, y, %mode, name = %color.name, "probed pixel");

    Ok(ProbeReport {
        x,
        y,
        mode,
        source,
        color,
    })
}
