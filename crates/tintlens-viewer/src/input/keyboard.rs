//! Keyboard mapping.

use minifb::Key;
use tintlens_core::KeyPress;

/// Map a minifb key to a session key press.
///
/// Letters come through lowercase; keys the session never binds map to
/// `None` and are dropped before they reach it.
pub fn key_to_press(key: Key) -> Option<KeyPress> {
    let c = match key {
        Key::Escape => return Some(KeyPress::Escape),
        Key::A => 'a',
        Key::B => 'b',
        Key::C => 'c',
        Key::D => 'd',
        Key::E => 'e',
        Key::F => 'f',
        Key::G => 'g',
        Key::H => 'h',
        Key::I => 'i',
        Key::J => 'j',
        Key::K => 'k',
        Key::L => 'l',
        Key::M => 'm',
        Key::N => 'n',
        Key::O => 'o',
        Key::P => 'p',
        Key::Q => 'q',
        Key::R => 'r',
        Key::S => 's',
        Key::T => 't',
        Key::U => 'u',
        Key::V => 'v',
        Key::W => 'w',
        Key::X => 'x',
        Key::Y => 'y',
        Key::Z => 'z',
        _ => return None,
    };
    Some(KeyPress::Char(c))
}
