//! minifb window front-end.

use std::time::{Duration, Instant};

use image::RgbImage;
use minifb::{KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tintlens_core::event_loop::{Frontend, FrontendError};
use tintlens_core::{Dimensions, Event};

use crate::input::{ClickTracker, key_to_press};

/// Granularity of the wait inside [`Frontend::poll`].
const POLL_STEP: Duration = Duration::from_millis(2);

/// A fixed-size window showing session frames.
pub struct MinifbFrontend {
    window: Window,
    size: Dimensions,
    buffer: Vec<u32>,
    clicks: ClickTracker,
    mouse_was_down: bool,
}

impl MinifbFrontend {
    /// Open a non-resizable window of `size` pixels.
    pub fn open(title: &str, size: Dimensions) -> Result<Self, FrontendError> {
        let window = Window::new(
            title,
            size.width as usize,
            size.height as usize,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| FrontendError::Window(e.to_string()))?;
        tracing::info!(%size, "window opened");

        Ok(Self {
            window,
            size,
            buffer: vec![0; size.width as usize * size.height as usize],
            clicks: ClickTracker::default(),
            mouse_was_down: false,
        })
    }

    /// Gather input reported by the last window update.
    fn collect(&mut self, events: &mut Vec<Event>) {
        if !self.window.is_open() {
            events.push(Event::CloseRequested);
            return;
        }

        events.extend(
            self.window
                .get_keys_pressed(KeyRepeat::No)
                .into_iter()
                .filter_map(key_to_press)
                .map(Event::Key),
        );

        let down = self.window.get_mouse_down(MouseButton::Left);
        if down && !self.mouse_was_down {
            if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Discard) {
                if self.clicks.press(x, y, Instant::now()) {
                    events.push(Event::DoubleClick { x, y });
                }
            }
        }
        self.mouse_was_down = down;
    }
}

impl Frontend for MinifbFrontend {
    fn present(&mut self, frame: &RgbImage) -> Result<(), FrontendError> {
        let frame_size = Dimensions::of(frame);
        if frame_size != self.size {
            return Err(FrontendError::Window(format!(
                "frame is {frame_size}, window is {}",
                self.size
            )));
        }
        pack_0rgb(frame, &mut self.buffer);
        self.window
            .update_with_buffer(&self.buffer, self.size.width as usize, self.size.height as usize)
            .map_err(|e| FrontendError::Window(e.to_string()))
    }

    fn poll(&mut self, timeout: Duration) -> Vec<Event> {
        let deadline = Instant::now() + timeout;
        let mut events = Vec::new();
        loop {
            self.collect(&mut events);
            let now = Instant::now();
            if !events.is_empty() || now >= deadline {
                return events;
            }
            std::thread::sleep(POLL_STEP.min(deadline - now));
            self.window.update();
        }
    }
}

/// Pack RGB pixels into minifb's `0RGB` words.
fn pack_0rgb(frame: &RgbImage, out: &mut Vec<u32>) {
    out.clear();
    out.extend(
        frame
            .pixels()
            .map(|p| (p[0] as u32) << 16 | (p[1] as u32) << 8 | p[2] as u32),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_pack_0rgb() {
        let mut frame = RgbImage::new(2, 1);
        frame.put_pixel(0, 0, Rgb([0x12, 0x34, 0x56]));
        frame.put_pixel(1, 0, Rgb([255, 255, 255]));

        let mut out = vec![7; 9];
        pack_0rgb(&frame, &mut out);
        assert_eq!(out, vec![0x0012_3456, 0x00FF_FFFF]);
    }

    #[test]
    fn test_pack_is_row_major() {
        let frame = RgbImage::from_fn(2, 2, |x, y| Rgb([x as u8, y as u8, 0]));
        let mut out = Vec::new();
        pack_0rgb(&frame, &mut out);
        assert_eq!(out, vec![0x0000_0000, 0x0001_0000, 0x0000_0100, 0x0001_0100]);
    }
}
