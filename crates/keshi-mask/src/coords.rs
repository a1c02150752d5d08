//! Display-to-buffer coordinate mapping.
//!
//! Pointer events arrive in display units: the laid-out size of the
//! surface on screen. Stamps must land in buffer space, the native pixel
//! grid of the source image. The two differ whenever the image is scaled
//! to fit its viewport, so every pointer position is rescaled by
//! `buffer / display` on each axis before it reaches the stamp renderer.

use crate::types::{Dimensions, DisplayExtent, MapError, Point};

/// Map a display-space position into the buffer's native pixel space.
///
/// `bufferX = displayX * (bufferWidth / displayWidth)` and likewise for
/// Y. No clamping is applied: positions outside the surface map outside
/// the buffer and are clipped later by the stamp renderer.
///
/// # Errors
///
/// Returns [`MapError::DegenerateDisplay`] if either display axis is
/// zero, negative or non-finite (surface not laid out yet), and
/// [`MapError::NonFinitePoint`] if the pointer position is NaN or
/// infinite, and [`MapError::Overflow`] if the scaled position is not
/// finite.
pub fn map_to_buffer_space(
    display_point: Point,
    display: DisplayExtent,
    buffer: Dimensions,
) -> Result<Point, MapError> {
    if !is_usable_extent(display.width) || !is_usable_extent(display.height) {
        return Err(MapError::DegenerateDisplay {
            width: display.width,
            height: display.height,
        });
    }
    if !display_point.is_finite() {
        return Err(MapError::NonFinitePoint {
            x: display_point.x,
            y: display_point.y,
        });
    }

    let scale_x = f64::from(buffer.width) / display.width;
    let scale_y = f64::from(buffer.height) / display.height;
    let mapped = Point::new(display_point.x * scale_x, display_point.y * scale_y);
    if !mapped.is_finite() {
        return Err(MapError::Overflow {
            x: display_point.x,
            y: display_point.y,
        });
    }
    Ok(mapped)
}

fn is_usable_extent(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
