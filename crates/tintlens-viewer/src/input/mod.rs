//! Input translation: turns raw minifb state into session events.

mod keyboard;
mod mouse;

pub use keyboard::key_to_press;
pub use mouse::ClickTracker;
