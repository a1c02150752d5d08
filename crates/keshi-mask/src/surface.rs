//! The mask surface: a coverage buffer locked to the source image size.
//!
//! The surface never sees the source image's pixels. It only learns the
//! image dimensions through [`MaskSurface::resize`], which the editor
//! calls exactly once per successful image load.

use image::Luma;

use crate::stamp::{self, Stamp, StampStyle};
use crate::types::{Dimensions, GrayImage, MaskMode};

/// Per-pixel selection coverage, 0 (empty) to 255 (fully selected).
#[derive(Debug, Clone)]
pub struct MaskSurface {
    coverage: GrayImage,
    style: StampStyle,
}

impl MaskSurface {
    /// Create an empty 0x0 surface. Stamps are clipped away until the
    /// first [`resize`](Self::resize).
    #[must_use]
    pub fn new(style: StampStyle) -> Self {
        Self {
            coverage: GrayImage::new(0, 0),
            style,
        }
    }

    /// Reallocate to `width` x `height` with every pixel empty.
    pub fn resize(&mut self, width: u32, height: u32) {
        tracing::debug!(width, height, "resizing mask surface");
        self.coverage = GrayImage::new(width, height);
    }

    /// Reset every pixel to empty without changing dimensions.
    pub fn clear(&mut self) {
        self.coverage.fill(0);
    }

    /// Paint one stamp. Coverage is capped per pixel, so repeated or
    /// overlapping stamps never exceed full coverage.
    pub fn paint_stamp(&mut self, stamp: &Stamp) {
        tracing::trace!(
            tool = %stamp.tool,
            x = stamp.center.x,
            y = stamp.center.y,
            size = stamp.size.get(),
            "painting stamp"
        );
        stamp::render(stamp, &mut self.coverage, &self.style);
    }

    /// Current dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.coverage.width(), self.coverage.height())
    }

    /// Read-only view of the raw coverage values.
    #[must_use]
    pub const fn coverage(&self) -> &GrayImage {
        &self.coverage
    }

    /// Number of pixels with any coverage.
    #[must_use]
    pub fn covered_pixel_count(&self) -> u64 {
        self.coverage.iter().map(|&v| u64::from(v > 0)).sum()
    }

    /// Returns `true` if no pixel is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coverage.iter().all(|&v| v == 0)
    }

    /// Copy the coverage out as a mask for the removal collaborator.
    #[must_use]
    pub fn export(&self, mode: MaskMode) -> GrayImage {
        match mode {
            MaskMode::Soft => self.coverage.clone(),
            MaskMode::Binary => {
                let mut mask = self.coverage.clone();
                for pixel in mask.pixels_mut() {
                    if pixel.0[0] > 0 {
                        *pixel = Luma([255]);
                    }
                }
                mask
            }
        }
    }
}

impl Default for MaskSurface {
    fn default() -> Self {
        Self::new(StampStyle::default())
    }
}
