//! Reference palette of named colors.
//!
//! A palette is a flat, fixed-order table loaded once at startup. Order is
//! preserved exactly as loaded because the matcher resolves distance ties in
//! favour of the earliest entry.
//!
//! # Table format
//!
//! Comma-separated, no header, one entry per row:
//!
//! ```text
//! internal_id,Display Name,#rrggbb,R,G,B
//! Display Name,#rrggbb,R,G,B
//! ```
//!
//! The internal id column is optional. The hex column is display data and is
//! kept verbatim; it is never recomputed from or checked against R/G/B.

mod error;

pub use error::PaletteError;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default table shipped with the crate.
const BUILTIN_TABLE: &str = include_str!("../../data/colors.csv");

/// A single named reference color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Internal identifier (first column of six-column tables).
    pub id: Option<String>,
    /// Human-readable name shown in the overlay.
    pub display_name: String,
    /// Hex code as written in the table, e.g. `#5d8aa8`.
    pub hex: String,
    /// Reference color used for matching.
    pub rgb: [u8; 3],
}

impl PaletteEntry {
    /// Build an entry without an internal id.
    pub fn new(display_name: impl Into<String>, hex: impl Into<String>, rgb: [u8; 3]) -> Self {
        Self {
            id: None,
            display_name: display_name.into(),
            hex: hex.into(),
            rgb,
        }
    }
}

/// Ordered collection of reference colors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Wrap already-built entries, keeping their order.
    pub fn from_entries(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    /// Load a palette table from disk.
    pub fn load(path: &Path) -> Result<Self, PaletteError> {
        let file = File::open(path).map_err(|source| PaletteError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let palette = Self::from_reader(file)?;
        tracing::info!(path = %path.display(), entries = palette.len(), "loaded palette");
        Ok(palette)
    }

    /// Parse a palette table from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PaletteError> {
        let mut table = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for record in table.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            entries.push(parse_row(&record, line)?);
        }
        Ok(Self { entries })
    }

    /// The table embedded in the crate (`data/colors.csv`).
    pub fn builtin() -> Result<Self, PaletteError> {
        Self::from_reader(BUILTIN_TABLE.as_bytes())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index` in load order.
    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    /// Iterate entries in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    /// All entries in load order.
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn parse_row(record: &csv::StringRecord, line: u64) -> Result<PaletteEntry, PaletteError> {
    let fields: Vec<&str> = record.iter().collect();
    let (id, rest) = match fields.len() {
        6 => (Some(fields[0].to_string()), &fields[1..]),
        5 => (None, &fields[..]),
        found => return Err(PaletteError::FieldCount { line, found }),
    };

    let display_name = rest[0];
    if display_name.is_empty() {
        return Err(PaletteError::EmptyName { line });
    }

    let channel = |index: usize, channel: &'static str| {
        rest[index]
            .parse::<u8>()
            .map_err(|_| PaletteError::Channel {
                line,
                channel,
                value: rest[index].to_string(),
            })
    };

    Ok(PaletteEntry {
        id,
        display_name: display_name.to_string(),
        hex: rest[1].to_string(),
        rgb: [channel(2, "R")?, channel(3, "G")?, channel(4, "B")?],
    })
}
