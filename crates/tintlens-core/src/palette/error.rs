//! Palette loading errors.

use std::path::PathBuf;

/// Errors that can occur while loading a reference palette.
///
/// All of these are fatal at startup: the viewer refuses to open a window
/// without a usable palette.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("failed to open palette {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed palette table: {0}")]
    Table(#[from] csv::Error),
    #[error("line {line}: expected 5 or 6 fields, found {found}")]
    FieldCount { line: u64, found: usize },
    #[error("line {line}: {channel} value {value:?} is not an integer in 0-255")]
    Channel {
        line: u64,
        channel: &'static str,
        value: String,
    },
    #[error("line {line}: display name is empty")]
    EmptyName { line: u64 },
}
