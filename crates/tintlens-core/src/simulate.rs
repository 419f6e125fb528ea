//! Color-vision deficiency simulation.
//!
//! Each mode is a fixed 3×3 projection of true color onto the reduced color
//! space of a dichromat. The matrix is applied to the whole image so the
//! preview shows the entire scene, independent of any color lookup:
//!
//! ```text
//! [r' g' b']ᵀ = clamp(M · [r g b]ᵀ, 0, 1)      with r, g, b = channel / 255
//! ```
//!
//! Results are scaled back by 255 and truncated to 8 bits.

use std::fmt;
use std::str::FromStr;

use glam::{Mat3, Vec3};
use image::RgbImage;
use serde::{Deserialize, Serialize};

// Row-major coefficients. Each row is one output channel.

const NORMAL: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

const PROTANOPIA: [[f32; 3]; 3] = [
    [0.56667, 0.43333, 0.0],
    [0.55833, 0.44167, 0.0],
    [0.0, 0.24167, 0.75833],
];

const DEUTERANOPIA: [[f32; 3]; 3] = [[0.625, 0.375, 0.0], [0.70, 0.30, 0.0], [0.0, 0.30, 0.70]];

const TRITANOPIA: [[f32; 3]; 3] = [
    [0.95, 0.05, 0.0],
    [0.0, 0.43333, 0.56667],
    [0.0, 0.475, 0.525],
];

/// Active vision-deficiency transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMode {
    /// Unmodified color (identity).
    #[default]
    Normal,
    /// Missing L cones (red-blind).
    Protanopia,
    /// Missing M cones (green-blind).
    Deuteranopia,
    /// Missing S cones (blue-blind).
    Tritanopia,
}

impl SimulationMode {
    /// Every mode, in key-binding order.
    pub fn all() -> &'static [Self] {
        const ALL: [SimulationMode; 4] = [
            SimulationMode::Normal,
            SimulationMode::Protanopia,
            SimulationMode::Deuteranopia,
            SimulationMode::Tritanopia,
        ];
        &ALL
    }

    /// Human-readable label for the overlay.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Protanopia => "Protanopia",
            Self::Deuteranopia => "Deuteranopia",
            Self::Tritanopia => "Tritanopia",
        }
    }

    /// Key that selects this mode in the viewer.
    pub const fn key(&self) -> char {
        match self {
            Self::Normal => 'n',
            Self::Protanopia => 'p',
            Self::Deuteranopia => 'd',
            Self::Tritanopia => 't',
        }
    }

    /// Row-major coefficients for this mode.
    pub const fn rows(&self) -> [[f32; 3]; 3] {
        match self {
            Self::Normal => NORMAL,
            Self::Protanopia => PROTANOPIA,
            Self::Deuteranopia => DEUTERANOPIA,
            Self::Tritanopia => TRITANOPIA,
        }
    }

    /// The transform as a column-vector matrix (`out = M * rgb`).
    pub fn matrix(&self) -> Mat3 {
        // glam is column-major; transpose turns the rows above into rows of M.
        Mat3::from_cols_array_2d(&self.rows()).transpose()
    }
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown simulation mode {0:?} (expected normal, protanopia, deuteranopia or tritanopia)")]
pub struct ParseModeError(pub String);

impl FromStr for SimulationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

/// Apply `mode` to one 8-bit pixel.
pub fn simulate_pixel(rgb: [u8; 3], mode: SimulationMode) -> [u8; 3] {
    if mode == SimulationMode::Normal {
        return rgb;
    }
    transform_pixel(rgb, &mode.matrix())
}

fn transform_pixel(rgb: [u8; 3], m: &Mat3) -> [u8; 3] {
    let v = Vec3::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32) / 255.0;
    let out = (*m * v).clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    // Truncation toward zero, matching a plain float-to-u8 cast.
    [out.x as u8, out.y as u8, out.z as u8]
}

/// Produce a new image with `mode` applied to every pixel.
///
/// `Normal` returns an identical copy. The input is never modified.
pub fn simulate(image: &RgbImage, mode: SimulationMode) -> RgbImage {
    if mode == SimulationMode::Normal {
        return image.clone();
    }

    let m = mode.matrix();
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel.0 = transform_pixel(pixel.0, &m);
    }
    tracing::debug!(
        mode = %mode,
        width = image.width(),
        height = image.height(),
        "simulated image"
    );
    out
}
