//! Single-threaded render/poll loop.
//!
//! One thread owns every buffer. Each iteration renders a fresh frame,
//! presents it, then waits at most `poll_interval` for input and handles
//! whatever arrived synchronously. With the default 20 ms interval the
//! window refreshes at roughly 50 Hz even without input.
//!
//! The window system and the clipboard sit behind [`Frontend`] and
//! [`ClipboardSink`] so the loop can be driven by scripted fakes in tests.

use std::time::Duration;

use image::RgbImage;

use crate::session::{Control, Event, Session};

/// Default bounded wait between frames.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Errors from the window front-end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontendError {
    #[error("window error: {0}")]
    Window(String),
}

/// Errors from the clipboard sink. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// The window: shows frames and reports input.
pub trait Frontend {
    /// Show `frame`. The frame has the session's canvas dimensions.
    fn present(&mut self, frame: &RgbImage) -> Result<(), FrontendError>;

    /// Wait up to `timeout` for input and return what arrived, possibly nothing.
    fn poll(&mut self, timeout: Duration) -> Vec<Event>;
}

/// Write-only text sink.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Drive `session` until a handler asks to quit.
///
/// Presentation failures are logged and the loop keeps running; only the
/// quit key or a close request ends it.
pub fn run(
    session: &mut Session,
    frontend: &mut dyn Frontend,
    clipboard: &mut dyn ClipboardSink,
    poll_interval: Duration,
) {
    let mut frames: u64 = 0;
    loop {
        let frame = session.render_frame();
        if let Err(e) = frontend.present(&frame) {
            tracing::warn!(%e, "failed to present frame");
        }
        frames += 1;

        for event in frontend.poll(poll_interval) {
            tracing::trace!(?event, "event");
            if session.handle(event, clipboard) == Control::Quit {
                tracing::info!(frames, "leaving event loop");
                return;
            }
        }
    }
}
