//! Interaction state machine.
//!
//! A [`Session`] owns every buffer of one viewing session: the original image
//! (never mutated), the scaled display buffer, the current simulated preview,
//! the active mode and the selection. Input arrives as [`Event`]s and is
//! handled synchronously; each frame is rebuilt from scratch by
//! [`Session::render_frame`].
//!
//! ```text
//!            double-click inside image
//!   Idle ───────────────────────────────▶ Selected(match)
//!                                           │    ▲
//!                                           └────┘ double-click replaces match
//! ```
//!
//! Mode keys change only the preview; the selection survives them.

use image::RgbImage;

use crate::annotate;
use crate::event_loop::ClipboardSink;
use crate::matcher::{self, ColorMatch, MatchError};
use crate::palette::Palette;
use crate::simulate::{self, SimulationMode};
use crate::viewport::{Dimensions, Viewport};

/// Key that copies the current match to the clipboard.
pub const COPY_KEY: char = 'c';

/// A key press, already decoded by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// A printable character (lowercase).
    Char(char),
    Escape,
}

/// Input delivered to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Double-click at a canvas position.
    DoubleClick { x: f32, y: f32 },
    Key(KeyPress),
    /// The window was closed.
    CloseRequested,
}

/// Action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetMode(SimulationMode),
    Copy,
    Quit,
}

/// Fixed key bindings: `n`/`p`/`d`/`t` select a mode, `c` copies, `Esc` quits.
pub fn command_for(key: KeyPress) -> Option<Command> {
    match key {
        KeyPress::Escape => Some(Command::Quit),
        KeyPress::Char(c) if c == COPY_KEY => Some(Command::Copy),
        KeyPress::Char(c) => SimulationMode::all()
            .iter()
            .find(|mode| mode.key() == c)
            .map(|mode| Command::SetMode(*mode)),
    }
}

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Selection state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// Nothing picked yet.
    #[default]
    Idle,
    /// The most recent lookup.
    Selected(ColorMatch),
}

/// State of one viewing session.
#[derive(Debug)]
pub struct Session {
    palette: Palette,
    original: RgbImage,
    viewport: Viewport,
    display: RgbImage,
    simulated: RgbImage,
    mode: SimulationMode,
    selection: Selection,
}

impl Session {
    /// Set up a session for `original`, fitted into `available`.
    ///
    /// Fails when the palette is empty: no lookup could ever succeed.
    pub fn new(
        palette: Palette,
        original: RgbImage,
        available: Dimensions,
        mode: SimulationMode,
    ) -> Result<Self, MatchError> {
        if palette.is_empty() {
            return Err(MatchError::EmptyPalette);
        }

        let viewport = Viewport::fit(Dimensions::of(&original), available);
        let display = viewport.display_buffer(&original);
        let simulated = simulate::simulate(&display, mode);
        tracing::info!(
            image = %viewport.image,
            display = %viewport.display,
            canvas = %viewport.canvas,
            scale = viewport.scale,
            %mode,
            "session ready"
        );

        Ok(Self {
            palette,
            original,
            viewport,
            display,
            simulated,
            mode,
            selection: Selection::Idle,
        })
    }

    /// Dispatch one event.
    pub fn handle(&mut self, event: Event, clipboard: &mut dyn ClipboardSink) -> Control {
        match event {
            Event::DoubleClick { x, y } => {
                self.select_at(x, y);
                Control::Continue
            }
            Event::Key(key) => match command_for(key) {
                Some(Command::SetMode(mode)) => {
                    self.set_mode(mode);
                    Control::Continue
                }
                Some(Command::Copy) => {
                    self.copy_selection(clipboard);
                    Control::Continue
                }
                Some(Command::Quit) => Control::Quit,
                None => {
                    tracing::trace!(?key, "unbound key");
                    Control::Continue
                }
            },
            Event::CloseRequested => Control::Quit,
        }
    }

    /// Look up the color under a canvas position.
    ///
    /// Positions outside the visible image leave the selection unchanged.
    pub fn select_at(&mut self, x: f32, y: f32) -> Option<&ColorMatch> {
        let Some((ox, oy)) = self.viewport.canvas_to_original(x, y) else {
            tracing::debug!(x, y, "click outside image");
            return None;
        };

        let rgb = self.original.get_pixel(ox, oy).0;
        match matcher::match_color(&self.palette, rgb) {
            Ok(m) => {
                tracing::info!(x = ox, y = oy, color = %m, "selected color");
                self.selection = Selection::Selected(m);
            }
            Err(e) => {
                tracing::warn!(%e, "color lookup failed");
                return None;
            }
        }
        self.current_match()
    }

    /// Switch the preview to `mode` and rebuild the simulated buffer.
    pub fn set_mode(&mut self, mode: SimulationMode) {
        self.mode = mode;
        self.simulated = simulate::simulate(&self.display, mode);
        tracing::debug!(%mode, "simulation mode changed");
    }

    /// Write the current match to `clipboard`. No-op while idle.
    ///
    /// Clipboard failures are logged, never propagated.
    pub fn copy_selection(&self, clipboard: &mut dyn ClipboardSink) {
        let Selection::Selected(m) = &self.selection else {
            tracing::debug!("nothing selected to copy");
            return;
        };
        let text = m.clipboard_text();
        match clipboard.write_text(&text) {
            Ok(()) => tracing::info!(%text, "copied to clipboard"),
            Err(e) => tracing::warn!(%e, "clipboard write failed"),
        }
    }

    /// Build the frame to show: simulated preview on the canvas plus overlays.
    pub fn render_frame(&self) -> RgbImage {
        let canvas = self.viewport.compose(&self.simulated);
        annotate::render(&canvas, self.current_match(), self.mode)
    }

    pub fn current_match(&self) -> Option<&ColorMatch> {
        match &self.selection {
            Selection::Selected(m) => Some(m),
            Selection::Idle => None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The unscaled source image.
    pub fn original(&self) -> &RgbImage {
        &self.original
    }

    /// The scaled image before simulation.
    pub fn display(&self) -> &RgbImage {
        &self.display
    }

    /// The scaled image after simulation.
    pub fn simulated(&self) -> &RgbImage {
        &self.simulated
    }
}
