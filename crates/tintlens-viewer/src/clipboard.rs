//! System clipboard backed by arboard.

use tintlens_core::event_loop::{ClipboardError, ClipboardSink};

/// The desktop clipboard.
///
/// The handle is kept for the whole session: on X11 the copied text is
/// served by this process and disappears when the handle drops. Opening is
/// retried on each write if the first attempt failed.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::warn!(%e, "system clipboard unavailable");
                None
            }
        };
        Self { inner }
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard not initialised".into()))
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.handle()?
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}
