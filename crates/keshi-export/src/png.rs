//! PNG encoding for masks and previews.

use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use keshi_mask::{GrayImage, RgbaImage};

/// Errors that can occur during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// There is nothing to encode (zero-width or zero-height buffer).
    #[error("cannot encode an empty {width}x{height} image")]
    Empty {
        /// Buffer width.
        width: u32,
        /// Buffer height.
        height: u32,
    },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(#[from] image::ImageError),
}

/// Encode a mask as an 8-bit grayscale PNG.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] if the mask has no pixels (no image
/// was ever loaded) and [`ExportError::PngEncode`] if encoding fails.
pub fn mask_to_png(mask: &GrayImage) -> Result<Vec<u8>, ExportError> {
    encode(mask.as_raw(), mask.width(), mask.height(), image::ExtendedColorType::L8)
}

/// Encode an RGBA image (an overlay preview or a removal result) as PNG.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] if the image has no pixels and
/// [`ExportError::PngEncode`] if encoding fails.
pub fn rgba_to_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    encode(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )
}

fn encode(
    raw: &[u8],
    width: u32,
    height: u32,
    color: image::ExtendedColorType,
) -> Result<Vec<u8>, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::Empty { width, height });
    }
    let mut png_bytes = Vec::new();
    let encoder = PngEncoder::new(&mut png_bytes);
    encoder.write_image(raw, width, height, color)?;
    Ok(png_bytes)
}
