//! Stamp rendering: rasterize one tool shape into a coverage buffer.
//!
//! This module defines the [`StampShape`] trait, which turns a tool into
//! a `tiny-skia` path, and [`render`], which fills that path into the
//! coverage buffer.
//!
//! # Accumulation
//!
//! Each stamp is first rasterized into a scratch mask that covers only
//! the stamp's bounding box clipped to the buffer. The scratch coverage
//! is then merged with `max(previous, stamp)`. Coverage is therefore
//! capped, not summed: overlapping stamps never exceed full coverage,
//! and stamping the same place twice is a no-op.

use tiny_skia::{FillRule, Path, PathBuilder, Rect, Stroke, Transform};

use crate::tool::{StampSize, Tool};
use crate::types::{EditorConfig, GrayImage, Point};

/// One stamp: a tool shape at a buffer-space center and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamp {
    /// Which shape to paint.
    pub tool: Tool,
    /// Center in buffer space.
    pub center: Point,
    /// Diameter / side length in buffer pixels.
    pub size: StampSize,
}

impl Stamp {
    /// Create a new stamp.
    #[must_use]
    pub const fn new(tool: Tool, center: Point, size: StampSize) -> Self {
        Self { tool, center, size }
    }
}

/// Rasterization settings shared by all stamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampStyle {
    /// Stroke width of the [`Tool::Circle`] ring.
    pub ring_width: f32,
    /// Whether shape edges are anti-aliased.
    pub anti_alias: bool,
}

impl Default for StampStyle {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for StampStyle {
    fn from(config: &EditorConfig) -> Self {
        Self {
            ring_width: config.ring_width,
            anti_alias: config.anti_alias,
        }
    }
}

/// Trait for turning a tool into the path it paints.
pub trait StampShape {
    /// The filled region of one stamp, in buffer space.
    ///
    /// Returns `None` for degenerate geometry (e.g. a zero-width ring).
    fn footprint(&self, center: Point, size: StampSize, style: &StampStyle) -> Option<Path>;

    /// Distance from the center to the outermost painted pixel.
    fn reach(&self, size: StampSize, style: &StampStyle) -> f64;
}

impl StampShape for Tool {
    #[allow(clippy::cast_possible_truncation)]
    fn footprint(&self, center: Point, size: StampSize, style: &StampStyle) -> Option<Path> {
        let cx = center.x as f32;
        let cy = center.y as f32;
        let radius = size.radius() as f32;

        match *self {
            Self::Brush => PathBuilder::from_circle(cx, cy, radius),
            Self::Rectangle => {
                let side = radius * 2.0;
                Rect::from_xywh(cx - radius, cy - radius, side, side).map(PathBuilder::from_rect)
            }
            Self::Circle => {
                // A zero width would request a hairline, which has no area.
                if style.ring_width <= 0.0 {
                    return None;
                }
                let ring = PathBuilder::from_circle(cx, cy, radius)?;
                let stroke = Stroke {
                    width: style.ring_width,
                    ..Stroke::default()
                };
                ring.stroke(&stroke, 1.0)
            }
        }
    }

    fn reach(&self, size: StampSize, style: &StampStyle) -> f64 {
        match *self {
            // The square's corners sit at radius * sqrt(2), but its
            // axis-aligned bounding box only needs the half side.
            Self::Brush | Self::Rectangle => size.radius(),
            Self::Circle => size.radius() + f64::from(style.ring_width.max(0.0)) / 2.0,
        }
    }
}

/// Paint one stamp into `coverage`.
///
/// The stamp is clipped to the buffer: centers outside the buffer, or
/// stamps larger than the buffer, never write out of bounds. The result
/// depends only on the stamp, the style and the previous buffer contents.
pub fn render(stamp: &Stamp, coverage: &mut GrayImage, style: &StampStyle) {
    if !stamp.center.is_finite() {
        return;
    }
    let reach = stamp.tool.reach(stamp.size, style);
    let Some(region) = ClipRegion::around(stamp.center, reach, coverage.width(), coverage.height())
    else {
        return;
    };
    let Some(path) = stamp.tool.footprint(stamp.center, stamp.size, style) else {
        return;
    };
    let Some(mut scratch) = tiny_skia::Mask::new(region.width, region.height) else {
        return;
    };

    #[allow(clippy::cast_precision_loss)]
    let transform = Transform::from_translate(-(region.x as f32), -(region.y as f32));
    scratch.fill_path(&path, FillRule::Winding, style.anti_alias, transform);

    merge_max(coverage, scratch.data(), region);
}

/// Axis-aligned pixel rectangle inside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClipRegion {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl ClipRegion {
    /// Bounding box of a stamp reaching `reach` pixels from `center`,
    /// padded by one pixel for the anti-aliased fringe and clipped to a
    /// `buffer_width` x `buffer_height` buffer. `None` if nothing of the
    /// stamp falls inside the buffer.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn around(center: Point, reach: f64, buffer_width: u32, buffer_height: u32) -> Option<Self> {
        let extent = reach + 1.0;
        let (w, h) = (f64::from(buffer_width), f64::from(buffer_height));

        let x0 = (center.x - extent).floor().clamp(0.0, w);
        let x1 = (center.x + extent).ceil().clamp(0.0, w);
        let y0 = (center.y - extent).floor().clamp(0.0, h);
        let y1 = (center.y + extent).ceil().clamp(0.0, h);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Merge scratch coverage into the buffer, keeping the larger value.
fn merge_max(coverage: &mut GrayImage, scratch: &[u8], region: ClipRegion) {
    let row_len = region.width as usize;
    for (row, values) in scratch.chunks_exact(row_len).enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let y = region.y + row as u32;
        for (col, &value) in values.iter().enumerate() {
            if value == 0 {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)]
            let x = region.x + col as u32;
            let pixel = coverage.get_pixel_mut(x, y);
            pixel.0[0] = pixel.0[0].max(value);
        }
    }
}
