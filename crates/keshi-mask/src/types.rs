//! Shared types for the keshi mask editor.

use serde::{Deserialize, Serialize};

use crate::tool::{StampSize, StampSizeError, Tool};

/// Re-export `GrayImage` so downstream crates can read mask coverage
/// without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbaImage` so downstream crates can reference the decoded
/// source image without depending on `image` directly.
pub use image::RgbaImage;

/// A 2D point.
///
/// Used both for display-space pointer positions and for buffer-space
/// stamp centers; which space a point lives in is determined by where it
/// came from (see [`crate::coords`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Native pixel dimensions of an image or mask buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count (`width * height`).
    #[must_use]
    pub const fn pixel_count(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if either axis is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The laid-out size of a surface on screen, in display units.
///
/// This can differ from the surface's [`Dimensions`] when a large image
/// is scaled down to fit its viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayExtent {
    /// Displayed width.
    pub width: f64,
    /// Displayed height.
    pub height: f64,
}

impl DisplayExtent {
    /// Create a new display extent.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// How coverage values are turned into an exported mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskMode {
    /// Any non-zero coverage is exported as fully selected (255).
    #[default]
    Binary,
    /// Coverage values are exported as accumulated, including the
    /// anti-aliased fringe of each stamp.
    Soft,
}

/// Editor configuration.
///
/// All parameters have defaults matching the reference editor: a brush
/// of size 50, a 2 px ring for the circle tool, anti-aliased stamps, and
/// a 70 % white overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Tool selected when the editor starts.
    pub default_tool: Tool,

    /// Stamp size selected when the editor starts.
    pub default_stamp_size: StampSize,

    /// Stroke width of the circle tool's ring, in buffer pixels.
    pub ring_width: f32,

    /// Whether stamp edges are anti-aliased.
    pub anti_alias: bool,

    /// How coverage is exported to the removal collaborator.
    pub mask_mode: MaskMode,

    /// Straight RGBA color used to draw selected regions over the image
    /// in previews. Purely visual; never affects coverage.
    pub overlay_color: [u8; 4],
}

impl EditorConfig {
    /// Default ring stroke width for [`Tool::Circle`].
    pub const DEFAULT_RING_WIDTH: f32 = 2.0;

    /// Default anti-aliasing setting.
    pub const DEFAULT_ANTI_ALIAS: bool = true;

    /// Default overlay color: white at 70 % opacity.
    pub const DEFAULT_OVERLAY_COLOR: [u8; 4] = [255, 255, 255, 179];
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_tool: Tool::default(),
            default_stamp_size: StampSize::default(),
            ring_width: Self::DEFAULT_RING_WIDTH,
            anti_alias: Self::DEFAULT_ANTI_ALIAS,
            mask_mode: MaskMode::default(),
            overlay_color: Self::DEFAULT_OVERLAY_COLOR,
        }
    }
}

/// Errors that can occur while loading a source image.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The image data was empty.
    #[error("image data is empty")]
    EmptyInput,

    /// The bytes could not be decoded as an image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The URI could not be interpreted.
    #[error("unsupported image URI: {0}")]
    UnsupportedUri(String),

    /// A `data:` URI carried a malformed base64 payload.
    #[error("invalid data URI payload: {0}")]
    DataUri(#[from] base64::DecodeError),

    /// The platform loader failed to fetch the bytes.
    #[error("failed to fetch {uri}: {reason}")]
    Fetch {
        /// The URI that was requested.
        uri: String,
        /// Loader-provided failure description.
        reason: String,
    },
}

/// Errors from mapping display coordinates into buffer space.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MapError {
    /// The surface has no usable on-screen size yet.
    #[error("display extent {width}x{height} is not usable for mapping")]
    DegenerateDisplay {
        /// Displayed width.
        width: f64,
        /// Displayed height.
        height: f64,
    },

    /// The pointer position is NaN or infinite.
    #[error("pointer position ({x}, {y}) is not finite")]
    NonFinitePoint {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },

    /// Scaling a finite position produced a NaN or infinite buffer
    /// coordinate (vanishingly small display extent).
    #[error("pointer position ({x}, {y}) overflows buffer space")]
    Overflow {
        /// Horizontal display position.
        x: f64,
        /// Vertical display position.
        y: f64,
    },
}

/// Errors surfaced by the [`Editor`](crate::Editor) facade.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// An image load failed; the previous image and mask are retained.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A pointer position could not be mapped; the stamp was rejected.
    #[error(transparent)]
    Map(#[from] MapError),

    /// A requested stamp size is outside the allowed range; the previous
    /// size is retained.
    #[error(transparent)]
    StampSize(#[from] StampSizeError),

    /// An operation needed a loaded image but none is current.
    #[error("no image is loaded")]
    NoImage,

    /// The region-removal collaborator failed.
    #[error("region removal failed: {0}")]
    Removal(String),
}
