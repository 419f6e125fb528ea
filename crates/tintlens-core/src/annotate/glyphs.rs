//! Bitmap text and rectangle primitives on `RgbImage`.
//!
//! Text uses the public-domain 8×8 font from `font8x8`, scaled by an integer
//! factor. Characters outside the basic Latin block render as `?`. All
//! drawing is clipped to the image bounds.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};

/// Native glyph cell size in pixels.
pub const GLYPH_SIZE: u32 = 8;

/// Width and height of `text` rendered at `scale`.
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let chars = text.chars().count() as u32;
    (chars * GLYPH_SIZE * scale, GLYPH_SIZE * scale)
}

/// Fill the rectangle `[x, x + w) × [y, y + h)`, clipped to the image.
pub fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x_end = x.saturating_add(w).min(img.width());
    let y_end = y.saturating_add(h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

/// Draw `text` with its top-left corner at `(x, y)`.
pub fn draw_text(img: &mut RgbImage, text: &str, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    let advance = GLYPH_SIZE * scale;
    let mut cursor_x = x;
    for ch in text.chars() {
        if cursor_x >= img.width() {
            break;
        }
        let glyph = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?'));
        if let Some(glyph) = glyph {
            draw_glyph(img, &glyph, cursor_x, y, scale, color);
        }
        cursor_x = cursor_x.saturating_add(advance);
    }
}

fn draw_glyph(img: &mut RgbImage, glyph: &[u8; 8], x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_SIZE {
            // Bit 0 is the leftmost column.
            if (bits >> col) & 1 == 0 {
                continue;
            }
            fill_rect(
                img,
                x + col * scale,
                y + row as u32 * scale,
                scale,
                scale,
                color,
            );
        }
    }
}
