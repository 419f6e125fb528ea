//! Overlays drawn on top of the simulated preview.
//!
//! Two overlays exist:
//! - the color swatch (only with a current match): a filled box at a fixed
//!   position showing the sampled color, labelled with name, RGB and hex;
//! - the mode label (always): `Mode: <name>` on an opaque black box in the
//!   bottom-left corner, sized to the text.
//!
//! The swatch label uses the largest text scale that fits the canvas width.
//! When even the smallest scale is too wide, the name and the codes go on
//! separate lines.
//!
//! Label text on the swatch is black when `R + G + B >= 600` and white
//! otherwise. This fixed channel-sum threshold is intentional and must not be
//! replaced with a perceptual luminance formula.

pub mod glyphs;

use image::{Rgb, RgbImage};

use crate::matcher::ColorMatch;
use crate::simulate::SimulationMode;

/// Top-left corner of the color swatch.
pub const SWATCH_ORIGIN: (u32, u32) = (20, 20);
/// Height of the color swatch.
pub const SWATCH_HEIGHT: u32 = 40;
/// Horizontal padding between swatch edge and label.
pub const SWATCH_PADDING: u32 = 12;
/// Distance of the mode label box from the left and bottom canvas edges.
pub const MODE_MARGIN: u32 = 10;
/// Padding inside the mode label box.
pub const MODE_PADDING: u32 = 4;
/// Integer scale applied to the 8×8 font.
pub const TEXT_SCALE: u32 = 2;
/// Vertical gap between the lines of a wrapped swatch label.
pub const LINE_GAP: u32 = 6;
/// Channel sum at or above which label text turns black.
pub const BRIGHTNESS_THRESHOLD: u16 = 600;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Text color that stays readable on a background of `rgb`.
pub fn text_color_for(rgb: [u8; 3]) -> Rgb<u8> {
    let brightness: u16 = rgb.iter().map(|&c| c as u16).sum();
    if brightness >= BRIGHTNESS_THRESHOLD {
        BLACK
    } else {
        WHITE
    }
}

/// Draw the overlays onto a copy of `canvas`.
pub fn render(canvas: &RgbImage, current: Option<&ColorMatch>, mode: SimulationMode) -> RgbImage {
    let mut out = canvas.clone();
    if let Some(m) = current {
        draw_color_info(&mut out, m);
    }
    draw_mode_label(&mut out, mode);
    out
}

/// Text scale and lines of the swatch label on a canvas `canvas_w` wide.
pub fn swatch_layout(m: &ColorMatch, canvas_w: u32) -> (u32, Vec<String>) {
    let room = canvas_w.saturating_sub(SWATCH_ORIGIN.0 + 2 * SWATCH_PADDING);
    let label = m.label();
    for scale in [TEXT_SCALE, 1] {
        if glyphs::text_size(&label, scale).0 <= room {
            return (scale, vec![label]);
        }
    }
    let [r, g, b] = m.rgb;
    (1, vec![m.name.clone(), format!("RGB=({r}, {g}, {b}) HEX={}", m.hex)])
}

fn draw_color_info(img: &mut RgbImage, m: &ColorMatch) {
    let (scale, lines) = swatch_layout(m, img.width());
    let text_w = lines
        .iter()
        .map(|line| glyphs::text_size(line, scale).0)
        .max()
        .unwrap_or(0);
    let line_h = glyphs::GLYPH_SIZE * scale;
    let rows = lines.len() as u32;
    let block_h = rows * line_h + rows.saturating_sub(1) * LINE_GAP;
    let (x, y) = SWATCH_ORIGIN;

    glyphs::fill_rect(img, x, y, text_w + 2 * SWATCH_PADDING, SWATCH_HEIGHT, Rgb(m.rgb));
    let color = text_color_for(m.rgb);
    let mut text_y = y + SWATCH_HEIGHT.saturating_sub(block_h) / 2;
    for line in &lines {
        glyphs::draw_text(img, line, x + SWATCH_PADDING, text_y, scale, color);
        text_y += line_h + LINE_GAP;
    }
}

fn draw_mode_label(img: &mut RgbImage, mode: SimulationMode) {
    let text = format!("Mode: {}", mode.label());
    let (text_w, text_h) = glyphs::text_size(&text, TEXT_SCALE);
    let box_w = text_w + 2 * MODE_PADDING;
    let box_h = text_h + 2 * MODE_PADDING;
    let x = MODE_MARGIN;
    let y = img.height().saturating_sub(MODE_MARGIN + box_h);

    glyphs::fill_rect(img, x, y, box_w, box_h, BLACK);
    glyphs::draw_text(img, &text, x + MODE_PADDING, y + MODE_PADDING, TEXT_SCALE, WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::MIN_CANVAS;

    const MIN_CANVAS_WIDTH: u32 = MIN_CANVAS.width;

    fn sample_match(rgb: [u8; 3]) -> ColorMatch {
        ColorMatch {
            name: "Sample".to_string(),
            rgb,
            hex: "#123456".to_string(),
            palette_rgb: rgb,
            index: 0,
            distance: 0.0,
        }
    }

    fn gray_canvas() -> RgbImage {
        RgbImage::from_pixel(480, 120, Rgb([90, 90, 90]))
    }

    fn count_in(img: &RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) -> usize {
        let mut n = 0;
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                if *img.get_pixel(x, y) == color {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_threshold_is_channel_sum() {
        assert_eq!(text_color_for([200, 200, 200]), BLACK);
        assert_eq!(text_color_for([255, 255, 255]), BLACK);
        assert_eq!(text_color_for([200, 200, 199]), WHITE);
        assert_eq!(text_color_for([255, 255, 89]), WHITE);
        assert_eq!(text_color_for([255, 255, 90]), BLACK);
        assert_eq!(text_color_for([0, 0, 0]), WHITE);
    }

    #[test]
    fn test_input_canvas_untouched() {
        let canvas = gray_canvas();
        let before = canvas.clone();
        let m = sample_match([250, 10, 10]);
        let _ = render(&canvas, Some(&m), SimulationMode::Protanopia);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_swatch_drawn_with_match_color() {
        let m = sample_match([250, 10, 10]);
        let out = render(&gray_canvas(), Some(&m), SimulationMode::Normal);
        // Padding corner of the swatch.
        assert_eq!(out.get_pixel(21, 21).0, [250, 10, 10]);
        assert_eq!(out.get_pixel(21, 20 + SWATCH_HEIGHT - 1).0, [250, 10, 10]);
        // Dark swatch gets white text.
        assert!(count_in(&out, 20, 20, 440, SWATCH_HEIGHT, WHITE) > 0);
        assert_eq!(count_in(&out, 20, 20, 440, SWATCH_HEIGHT, BLACK), 0);
    }

    #[test]
    fn test_bright_swatch_gets_black_text() {
        let m = sample_match([250, 250, 240]);
        let out = render(&gray_canvas(), Some(&m), SimulationMode::Normal);
        assert!(count_in(&out, 20, 20, 440, SWATCH_HEIGHT, BLACK) > 0);
        assert_eq!(count_in(&out, 20, 20, 440, SWATCH_HEIGHT, WHITE), 0);
    }

    #[test]
    fn test_no_match_no_swatch() {
        let canvas = gray_canvas();
        let out = render(&canvas, None, SimulationMode::Normal);
        for y in 0..60 {
            for x in 0..480 {
                assert_eq!(out.get_pixel(x, y), canvas.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_mode_label_always_drawn() {
        let out = render(&gray_canvas(), None, SimulationMode::Deuteranopia);
        let (text_w, text_h) = glyphs::text_size("Mode: Deuteranopia", TEXT_SCALE);
        let box_w = text_w + 2 * MODE_PADDING;
        let box_h = text_h + 2 * MODE_PADDING;
        let y = 120 - MODE_MARGIN - box_h;

        // Opaque box: padding is black, nothing of the gray canvas shows through.
        assert_eq!(*out.get_pixel(MODE_MARGIN, y), BLACK);
        assert_eq!(count_in(&out, MODE_MARGIN, y, box_w, box_h, Rgb([90, 90, 90])), 0);
        assert!(count_in(&out, MODE_MARGIN, y, box_w, box_h, WHITE) > 0);
        // Just outside the box the canvas is untouched.
        assert_eq!(out.get_pixel(MODE_MARGIN + box_w, y).0, [90, 90, 90]);
    }

    #[test]
    fn test_mode_label_changes_with_mode() {
        let a = render(&gray_canvas(), None, SimulationMode::Normal);
        let b = render(&gray_canvas(), None, SimulationMode::Tritanopia);
        assert_ne!(a, b);
    }

    fn red_match(name: &str) -> ColorMatch {
        ColorMatch {
            name: name.to_string(),
            hex: "#FF0000".to_string(),
            ..sample_match([250, 10, 10])
        }
    }

    #[test]
    fn test_label_fits_minimum_canvas() {
        let m = red_match("Red");
        let (scale, lines) = swatch_layout(&m, MIN_CANVAS_WIDTH);
        assert_eq!(lines, vec!["Red RGB=(250, 10, 10) HEX=#FF0000".to_string()]);
        assert_eq!(scale, 1);

        // The hex digits end inside the canvas.
        let (text_w, _) = glyphs::text_size(&lines[0], scale);
        assert!(SWATCH_ORIGIN.0 + SWATCH_PADDING + text_w <= MIN_CANVAS_WIDTH);

        let canvas = RgbImage::from_pixel(MIN_CANVAS_WIDTH, 150, Rgb([90, 90, 90]));
        let out = render(&canvas, Some(&m), SimulationMode::Normal);
        let swatch_end = SWATCH_ORIGIN.0 + text_w + 2 * SWATCH_PADDING;
        assert_eq!(out.get_pixel(swatch_end - 1, 21).0, [250, 10, 10]);
        assert_eq!(out.get_pixel(swatch_end, 21).0, [90, 90, 90]);
        // Last glyph column band holds white text.
        let last_glyph_x = SWATCH_ORIGIN.0 + SWATCH_PADDING + text_w - glyphs::GLYPH_SIZE;
        assert!(count_in(&out, last_glyph_x, 20, glyphs::GLYPH_SIZE, SWATCH_HEIGHT, WHITE) > 0);
    }

    #[test]
    fn test_wide_canvas_keeps_large_text() {
        let (scale, lines) = swatch_layout(&red_match("Red"), 1200);
        assert_eq!(scale, TEXT_SCALE);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_long_name_wraps() {
        let m = red_match("Exceptionally Long Palette Color Name Here");
        let (scale, lines) = swatch_layout(&m, MIN_CANVAS_WIDTH);
        assert_eq!(scale, 1);
        assert_eq!(
            lines,
            vec![
                "Exceptionally Long Palette Color Name Here".to_string(),
                "RGB=(250, 10, 10) HEX=#FF0000".to_string(),
            ]
        );
        for line in &lines {
            let (w, _) = glyphs::text_size(line, scale);
            assert!(SWATCH_ORIGIN.0 + SWATCH_PADDING + w <= MIN_CANVAS_WIDTH, "{line}");
        }

        let canvas = RgbImage::from_pixel(MIN_CANVAS_WIDTH, 150, Rgb([90, 90, 90]));
        let out = render(&canvas, Some(&m), SimulationMode::Normal);
        // Both lines are drawn inside the swatch.
        let top = SWATCH_ORIGIN.1 + (SWATCH_HEIGHT - (2 * glyphs::GLYPH_SIZE + LINE_GAP)) / 2;
        assert!(count_in(&out, 20, top, 400, glyphs::GLYPH_SIZE, WHITE) > 0);
        let second = top + glyphs::GLYPH_SIZE + LINE_GAP;
        assert!(count_in(&out, 20, second, 400, glyphs::GLYPH_SIZE, WHITE) > 0);
    }

    #[test]
    fn test_tiny_canvas_does_not_panic() {
        let canvas = RgbImage::new(5, 5);
        let m = sample_match([1, 2, 3]);
        let out = render(&canvas, Some(&m), SimulationMode::Protanopia);
        assert_eq!(out.dimensions(), (5, 5));
    }
}
