//! Nearest named color lookup.
//!
//! Brute-force Euclidean search in 8-bit RGB space. Lookups are driven by
//! discrete user clicks, so a linear scan over the palette is plenty.
//!
//! ```text
//! distance = sqrt((r − R)² + (g − G)² + (b − B)²)
//! ```
//!
//! Candidates are compared on integer squared distance so ties are exact;
//! the first entry in load order wins a tie.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::palette::Palette;

/// Errors returned by [`match_color`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("cannot match against an empty palette")]
    EmptyPalette,
}

/// Result of a nearest-color lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMatch {
    /// Display name of the winning palette entry.
    pub name: String,
    /// The queried (sampled) color.
    pub rgb: [u8; 3],
    /// Hex code of the winning palette entry.
    pub hex: String,
    /// Reference color of the winning palette entry.
    pub palette_rgb: [u8; 3],
    /// Position of the winning entry in load order.
    pub index: usize,
    /// Euclidean RGB distance between query and winner.
    pub distance: f64,
}

impl ColorMatch {
    /// Overlay label: `"{name} RGB=(r, g, b) HEX={hex}"`.
    pub fn label(&self) -> String {
        let [r, g, b] = self.rgb;
        format!("{} RGB=({r}, {g}, {b}) HEX={}", self.name, self.hex)
    }

    /// Clipboard text: `"Name: {name}, RGB: (r, g, b), HEX: {hex}"`.
    pub fn clipboard_text(&self) -> String {
        let [r, g, b] = self.rgb;
        format!("Name: {}, RGB: ({r}, {g}, {b}), HEX: {}", self.name, self.hex)
    }
}

impl fmt::Display for ColorMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Euclidean distance between two 8-bit RGB triplets.
pub fn distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    (squared_distance(a, b) as f64).sqrt()
}

fn squared_distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x.abs_diff(y) as u32;
            d * d
        })
        .sum()
}

/// Find the palette entry closest to `rgb`.
pub fn match_color(palette: &Palette, rgb: [u8; 3]) -> Result<ColorMatch, MatchError> {
    let mut best: Option<(usize, u32)> = None;
    for (index, entry) in palette.iter().enumerate() {
        let d = squared_distance(rgb, entry.rgb);
        // Strict comparison keeps the earliest entry on ties.
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((index, d));
            if d == 0 {
                break;
            }
        }
    }

    let (index, squared) = best.ok_or(MatchError::EmptyPalette)?;
    let entry = &palette.entries()[index];
    Ok(ColorMatch {
        name: entry.display_name.clone(),
        rgb,
        hex: entry.hex.clone(),
        palette_rgb: entry.rgb,
        index,
        distance: (squared as f64).sqrt(),
    })
}
