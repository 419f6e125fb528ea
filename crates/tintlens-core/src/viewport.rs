//! Mapping between the original image and the on-screen canvas.
//!
//! Images are only ever shrunk to fit the available area, never enlarged.
//! The scaled display buffer is centered on a canvas that is at least
//! [`MIN_CANVAS`] in size so the overlays always have room. Everything here is
//! computed once at load time and stays constant for the session.
//!
//! ```text
//! scale    = min(available_w / image_w, available_h / image_h, 1)
//! display  = floor(original × scale)
//! original = floor(display / scale)
//! ```

use std::fmt;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Smallest canvas the viewer will open.
pub const MIN_CANVAS: Dimensions = Dimensions {
    width: 480,
    height: 120,
};

/// Guards `floor` against products like `1919.9999999` that should be exact.
const FLOOR_EPSILON: f64 = 1e-9;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions of an image buffer.
    pub fn of(image: &RgbImage) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Whether `(x, y)` lies inside `[0, width) × [0, height)`.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Shrink factor that fits `image` inside `available`. Never exceeds 1.0.
///
/// Zero-sized available extents count as one pixel so the result stays > 0.
pub fn compute_scale(image: Dimensions, available: Dimensions) -> f64 {
    if image.width == 0 || image.height == 0 {
        return 1.0;
    }
    let sx = available.width.max(1) as f64 / image.width as f64;
    let sy = available.height.max(1) as f64 / image.height as f64;
    sx.min(sy).min(1.0)
}

/// Size of `image` after scaling, at least one pixel per side.
pub fn scaled_dimensions(image: Dimensions, scale: f64) -> Dimensions {
    let side = |v: u32| ((v as f64 * scale + FLOOR_EPSILON).floor() as u32).max(1);
    Dimensions::new(side(image.width), side(image.height))
}

/// Map a display-buffer coordinate back to the original image.
pub fn to_original(display_x: u32, display_y: u32, scale: f64) -> (u32, u32) {
    let map = |d: u32| (d as f64 / scale + FLOOR_EPSILON).floor() as u32;
    (map(display_x), map(display_y))
}

/// Map an original-image coordinate into the display buffer.
pub fn to_display(x: u32, y: u32, scale: f64) -> (u32, u32) {
    let map = |o: u32| (o as f64 * scale + FLOOR_EPSILON).floor() as u32;
    (map(x), map(y))
}

/// Placement of the scaled image on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Original image size.
    pub image: Dimensions,
    /// Shrink factor, `0 < scale <= 1`.
    pub scale: f64,
    /// Scaled image size.
    pub display: Dimensions,
    /// Full canvas (window) size.
    pub canvas: Dimensions,
    /// Top-left corner of the display buffer on the canvas.
    pub offset: (u32, u32),
}

impl Viewport {
    /// Fit `image` into `available` and center it on the canvas.
    pub fn fit(image: Dimensions, available: Dimensions) -> Self {
        let scale = compute_scale(image, available);
        let display = scaled_dimensions(image, scale);
        let canvas = Dimensions::new(
            display.width.max(MIN_CANVAS.width),
            display.height.max(MIN_CANVAS.height),
        );
        let offset = (
            (canvas.width - display.width) / 2,
            (canvas.height - display.height) / 2,
        );
        Self {
            image,
            scale,
            display,
            canvas,
            offset,
        }
    }

    /// Map a canvas position to display-buffer pixels.
    ///
    /// Returns `None` for positions in the letterbox or outside the canvas.
    pub fn canvas_to_display(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let dx = x.floor() - self.offset.0 as f32;
        let dy = y.floor() - self.offset.1 as f32;
        if dx < 0.0 || dy < 0.0 {
            return None;
        }
        let (dx, dy) = (dx as u32, dy as u32);
        self.display.contains(dx, dy).then_some((dx, dy))
    }

    /// Map a canvas position to the original-image pixel under it.
    ///
    /// The result is always a valid pixel of the original image.
    pub fn canvas_to_original(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        let (dx, dy) = self.canvas_to_display(x, y)?;
        let (ox, oy) = to_original(dx, dy, self.scale);
        Some((
            ox.min(self.image.width.saturating_sub(1)),
            oy.min(self.image.height.saturating_sub(1)),
        ))
    }

    /// Scale `original` down to the display size.
    pub fn display_buffer(&self, original: &RgbImage) -> RgbImage {
        if self.display == Dimensions::of(original) {
            return original.clone();
        }
        imageops::resize(
            original,
            self.display.width,
            self.display.height,
            FilterType::Triangle,
        )
    }

    /// Black canvas with `display` pasted at the offset.
    pub fn compose(&self, display: &RgbImage) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(self.canvas.width, self.canvas.height, Rgb([0, 0, 0]));
        imageops::replace(
            &mut canvas,
            display,
            self.offset.0 as i64,
            self.offset.1 as i64,
        );
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_scale_half_width() {
        let scale = compute_scale(Dimensions::new(400, 300), Dimensions::new(200, 300));
        assert!((scale - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_click_maps_to_original() {
        assert_eq!(to_original(100, 50, 0.5), (200, 100));
    }

    #[test]
    fn test_scale_is_one_when_image_fits() {
        assert_eq!(compute_scale(Dimensions::new(400, 300), Dimensions::new(400, 300)), 1.0);
        assert_eq!(compute_scale(Dimensions::new(40, 30), Dimensions::new(1920, 1000)), 1.0);
    }

    #[test]
    fn test_scale_never_exceeds_one() {
        for (iw, ih) in [(1, 1), (10, 3000), (3000, 10), (1919, 999), (5000, 5000)] {
            for (aw, ah) in [(0, 0), (1, 1), (800, 600), (1920, 1000), (10_000, 10_000)] {
                let s = compute_scale(Dimensions::new(iw, ih), Dimensions::new(aw, ah));
                assert!(s > 0.0 && s <= 1.0, "{iw}x{ih} in {aw}x{ah}: {s}");
            }
        }
    }

    #[test]
    fn test_scaled_dimensions_fit() {
        let image = Dimensions::new(3000, 2000);
        let available = Dimensions::new(1920, 1000);
        let d = scaled_dimensions(image, compute_scale(image, available));
        assert_eq!(d, Dimensions::new(1500, 1000));
    }

    #[test]
    fn test_round_trip_within_rounding() {
        for scale in [1.0, 0.75, 0.5, 0.333, 0.1] {
            for x in (0..2000).step_by(7) {
                let (dx, dy) = to_display(x, x / 2, scale);
                let (ox, oy) = to_original(dx, dy, scale);
                let tolerance = 1.0 / scale + 1.0;
                assert!((x as f64 - ox as f64).abs() <= tolerance, "x={x} s={scale} -> {ox}");
                assert!(((x / 2) as f64 - oy as f64).abs() <= tolerance);
            }
        }
    }

    #[test]
    fn test_identity_round_trip_at_full_scale() {
        for x in 0..500 {
            assert_eq!(to_original(to_display(x, x, 1.0).0, 0, 1.0).0, x);
        }
    }

    #[test]
    fn test_fit_centers_small_image() {
        let vp = Viewport::fit(Dimensions::new(100, 50), Dimensions::new(1920, 1000));
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.canvas, MIN_CANVAS);
        assert_eq!(vp.offset, ((480 - 100) / 2, (120 - 50) / 2));
    }

    #[test]
    fn test_fit_large_image_fills_canvas() {
        let vp = Viewport::fit(Dimensions::new(4000, 2000), Dimensions::new(1000, 1000));
        assert_eq!(vp.display, Dimensions::new(1000, 500));
        assert_eq!(vp.canvas, Dimensions::new(1000, 500));
        assert_eq!(vp.offset, (0, 0));
    }

    #[test]
    fn test_canvas_click_outside_image_rejected() {
        let vp = Viewport::fit(Dimensions::new(400, 300), Dimensions::new(200, 300));
        // display is 200x150 centered on a 480x150 canvas.
        assert_eq!(vp.display, Dimensions::new(200, 150));
        assert_eq!(vp.offset, (140, 0));
        assert_eq!(vp.canvas_to_original(10.0, 10.0), None);
        assert_eq!(vp.canvas_to_original(340.0, 10.0), None);
        assert_eq!(vp.canvas_to_original(150.0, 150.0), None);
        assert_eq!(vp.canvas_to_original(-1.0, 5.0), None);
        assert_eq!(vp.canvas_to_original(f32::NAN, 5.0), None);
    }

    #[test]
    fn test_canvas_click_inside_image_maps() {
        let vp = Viewport::fit(Dimensions::new(400, 300), Dimensions::new(200, 300));
        assert_eq!(vp.canvas_to_original(240.0, 50.0), Some((200, 100)));
        assert_eq!(vp.canvas_to_original(240.7, 50.2), Some((200, 100)));
        assert_eq!(vp.canvas_to_original(339.0, 149.0), Some((398, 298)));
    }

    #[test]
    fn test_mapped_pixels_stay_in_bounds() {
        let vp = Viewport::fit(Dimensions::new(997, 611), Dimensions::new(300, 300));
        for y in 0..vp.canvas.height {
            for x in (0..vp.canvas.width).step_by(3) {
                if let Some((ox, oy)) = vp.canvas_to_original(x as f32, y as f32) {
                    assert!(vp.image.contains(ox, oy), "({x},{y}) -> ({ox},{oy})");
                }
            }
        }
    }

    #[test]
    fn test_display_buffer_and_compose() {
        let original = RgbImage::from_pixel(400, 300, Rgb([200, 10, 10]));
        let vp = Viewport::fit(Dimensions::of(&original), Dimensions::new(200, 300));
        let display = vp.display_buffer(&original);
        assert_eq!(Dimensions::of(&display), vp.display);

        let canvas = vp.compose(&display);
        assert_eq!(Dimensions::of(&canvas), vp.canvas);
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(140, 0), display.get_pixel(0, 0));
        assert_eq!(canvas.get_pixel(339, 149), display.get_pixel(199, 149));
        assert_eq!(canvas.get_pixel(340, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_display_buffer_unscaled_is_copy() {
        let original = RgbImage::from_fn(20, 10, |x, y| Rgb([x as u8, y as u8, 0]));
        let vp = Viewport::fit(Dimensions::of(&original), Dimensions::new(100, 100));
        assert_eq!(vp.display_buffer(&original), original);
    }
}
