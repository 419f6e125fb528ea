//! Image loading for the viewer.

use std::path::{Path, PathBuf};

use image::RgbImage;

/// Load an image from disk as 8-bit RGB.
///
/// Supports the formats enabled in the `image` crate (PNG, JPEG, BMP, TIFF
/// among others). Alpha is dropped; higher bit depths are reduced to 8 bits.
pub fn load_image(path: &Path) -> Result<RgbImage, ImageLoadError> {
    let img = image::open(path).map_err(|source| ImageLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = ensure_not_empty(img.to_rgb8())?;
    tracing::info!(
        path = %path.display(),
        width = rgb.width(),
        height = rgb.height(),
        color = ?img.color(),
        "loaded image"
    );
    Ok(rgb)
}

fn ensure_not_empty(img: RgbImage) -> Result<RgbImage, ImageLoadError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(ImageLoadError::Empty {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(img)
}

/// Errors that can occur during image loading.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("could not load image from {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}
