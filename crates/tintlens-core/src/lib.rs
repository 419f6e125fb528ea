//! Tintlens Core — color identification and vision-deficiency preview.
//!
//! This crate holds the palette store, nearest-color matcher, deficiency
//! simulator, coordinate mapping, overlay rendering and the interaction state
//! machine. No window-system dependencies: the viewer plugs a window and a
//! clipboard in through the traits in [`event_loop`].

pub mod annotate;
pub mod event_loop;
pub mod geometry;
pub mod matcher;
pub mod palette;
pub mod session;
pub mod simulate;
pub mod viewport;

// Re-exports for convenience.
pub use event_loop::{ClipboardSink, Frontend, run};
pub use geometry::{DisplayGeometry, resolve_available_area};
pub use matcher::{ColorMatch, MatchError, match_color};
pub use palette::{Palette, PaletteEntry, PaletteError};
pub use session::{Event, KeyPress, Session};
pub use simulate::{SimulationMode, simulate};
pub use viewport::{Dimensions, Viewport};
