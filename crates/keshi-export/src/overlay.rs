//! Selection preview: the mask drawn translucently over the source image.
//!
//! The overlay color is purely visual. Each pixel's coverage scales the
//! color's alpha, so soft mask edges fade out in the preview exactly as
//! they will be weighted downstream.

use image::Rgba;
use keshi_mask::{GrayImage, RgbaImage};

/// Composite `color` over `image` wherever `mask` has coverage.
///
/// `color` is straight (non-premultiplied) RGBA; its alpha is the
/// opacity of a fully covered pixel. The source alpha channel is kept.
/// Pixels outside the mask (when the two buffers differ in size) are
/// copied unchanged.
#[must_use]
pub fn overlay(image: &RgbaImage, mask: &GrayImage, color: [u8; 4]) -> RgbaImage {
    let mut output = image.clone();
    let (mask_w, mask_h) = mask.dimensions();

    for (x, y, px) in output.enumerate_pixels_mut() {
        if x >= mask_w || y >= mask_h {
            continue;
        }
        let coverage = mask.get_pixel(x, y).0[0];
        if coverage == 0 {
            continue;
        }
        let alpha = u32::from(color[3]) * u32::from(coverage) / 255;
        *px = blend(*px, color, alpha);
    }
    output
}

/// Source-over blend of `color` at opacity `alpha / 255` onto `base`.
fn blend(base: Rgba<u8>, color: [u8; 4], alpha: u32) -> Rgba<u8> {
    let mix = |b: u8, c: u8| -> u8 {
        let val = (u32::from(c) * alpha + u32::from(b) * (255 - alpha) + 127) / 255;
        #[expect(clippy::cast_possible_truncation)]
        let val = val.min(255) as u8;
        val
    };
    Rgba([
        mix(base[0], color[0]),
        mix(base[1], color[1]),
        mix(base[2], color[2]),
        base[3],
    ])
}
