//! Tool and stamp-size selection state.
//!
//! [`ToolState`] is the shared state written by external tool-picker
//! controls and read by the [`StrokeController`](crate::StrokeController)
//! each time a stamp is issued. It is an ordinary value owned by the
//! [`Editor`](crate::Editor) and passed by reference, so the core can be
//! driven without any UI harness.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Selects which stamp shape the pointer paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Filled disc of diameter `size`.
    #[default]
    Brush,
    /// Filled axis-aligned square of side `size`.
    #[serde(alias = "rect")]
    Rectangle,
    /// Ring (outline only) of diameter `size`. Marks a boundary, not an
    /// area: the interior is left untouched.
    Circle,
}

impl Tool {
    /// Stable lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Brush => "brush",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stamp size in buffer pixels, bounded to
/// [`MIN`](Self::MIN)`..=`[`MAX`](Self::MAX).
///
/// One size scales all tools uniformly: brush diameter, rectangle side
/// and ring diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StampSize(u32);

impl StampSize {
    /// Smallest allowed size.
    pub const MIN: u32 = 10;
    /// Largest allowed size.
    pub const MAX: u32 = 200;
    /// Size selected on startup.
    pub const DEFAULT: u32 = 50;

    /// Validate a size.
    ///
    /// # Errors
    ///
    /// Returns [`StampSizeError`] if `size` is outside `MIN..=MAX`.
    pub const fn new(size: u32) -> Result<Self, StampSizeError> {
        if size < Self::MIN || size > Self::MAX {
            return Err(StampSizeError(size));
        }
        Ok(Self(size))
    }

    /// Clamp any integer into range. Suited to slider glue that may
    /// overshoot.
    #[must_use]
    pub fn clamped(size: u32) -> Self {
        Self(size.clamp(Self::MIN, Self::MAX))
    }

    /// The size in pixels.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Half the size, as a stamp radius / half-extent.
    #[must_use]
    pub fn radius(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl Default for StampSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u32> for StampSize {
    type Error = StampSizeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StampSize> for u32 {
    fn from(size: StampSize) -> Self {
        size.0
    }
}

impl fmt::Display for StampSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stamp size outside the allowed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("stamp size {0} is outside {min}..={max}", min = StampSize::MIN, max = StampSize::MAX)]
pub struct StampSizeError(pub u32);

/// Current tool and stamp size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolState {
    tool: Tool,
    size: StampSize,
}

impl ToolState {
    /// Create a state with an explicit tool and size.
    #[must_use]
    pub const fn new(tool: Tool, size: StampSize) -> Self {
        Self { tool, size }
    }

    /// The currently selected tool.
    #[must_use]
    pub const fn tool(&self) -> Tool {
        self.tool
    }

    /// The currently selected stamp size.
    #[must_use]
    pub const fn size(&self) -> StampSize {
        self.size
    }

    /// Select a tool.
    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Set the stamp size.
    pub fn set_size(&mut self, size: StampSize) {
        self.size = size;
    }
}
