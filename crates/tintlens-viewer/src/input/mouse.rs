//! Double-click detection.
//!
//! minifb only reports whether a button is held, so presses are found by
//! edge detection in the window and paired up here.

use std::time::{Duration, Instant};

/// Longest gap between the two presses of a double-click.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);
/// Largest movement, per axis in pixels, between the two presses.
pub const DOUBLE_CLICK_SLOP: f32 = 4.0;

/// Pairs consecutive presses into double-clicks.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    interval: Duration,
    slop: f32,
    last: Option<(Instant, f32, f32)>,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_INTERVAL, DOUBLE_CLICK_SLOP)
    }
}

impl ClickTracker {
    pub fn new(interval: Duration, slop: f32) -> Self {
        Self {
            interval,
            slop,
            last: None,
        }
    }

    /// Record a press at `(x, y)`. Returns `true` when it completes a
    /// double-click; the pair is then consumed, so a third press starts over.
    pub fn press(&mut self, x: f32, y: f32, at: Instant) -> bool {
        if let Some((t, lx, ly)) = self.last.take() {
            let close_in_time = at.saturating_duration_since(t) <= self.interval;
            let close_in_space = (x - lx).abs() <= self.slop && (y - ly).abs() <= self.slop;
            if close_in_time && close_in_space {
                return true;
            }
        }
        self.last = Some((at, x, y));
        false
    }
}
