//! Stroke controller: pointer events in, stamps out.
//!
//! ```text
//!            down(P) / stamp at P
//!   Idle ─────────────────────────▶ Active(P)
//!    ▲                                │  move(P') / stamp at P'
//!    │        up / leave              ▼
//!    └─────────────────────────── Active(P')
//! ```
//!
//! Every move while active yields exactly one stamp at the move
//! position. Successive stamps are not interpolated, so fast pointer
//! motion can leave gaps between them.

use crate::stamp::Stamp;
use crate::tool::ToolState;
use crate::types::Point;

/// Whether a stroke is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    /// No pointer button held.
    #[default]
    Idle,
    /// Pointer button held; `last` is the most recent stamp center.
    Active {
        /// Buffer-space center of the latest stamp.
        last: Point,
    },
}

/// Turns pointer transitions into stamps.
///
/// Tool and size are read from the [`ToolState`] passed to each event,
/// so changing either mid-stroke affects the next stamp of the same
/// stroke.
#[derive(Debug, Clone, Default)]
pub struct StrokeController {
    state: StrokeState,
}

impl StrokeController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> StrokeState {
        self.state
    }

    /// Returns `true` while a stroke is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, StrokeState::Active { .. })
    }

    /// Pointer pressed at buffer-space `point`: start a stroke and stamp.
    ///
    /// A press while already active (a missed release) restarts the
    /// stroke at `point`.
    pub fn pointer_down(&mut self, point: Point, tools: &ToolState) -> Stamp {
        self.state = StrokeState::Active { last: point };
        Stamp::new(tools.tool(), point, tools.size())
    }

    /// Pointer moved to buffer-space `point`: stamp if a stroke is active.
    pub fn pointer_move(&mut self, point: Point, tools: &ToolState) -> Option<Stamp> {
        match self.state {
            StrokeState::Idle => None,
            StrokeState::Active { .. } => {
                self.state = StrokeState::Active { last: point };
                Some(Stamp::new(tools.tool(), point, tools.size()))
            }
        }
    }

    /// Pointer released: end the stroke.
    pub fn pointer_up(&mut self) {
        self.state = StrokeState::Idle;
    }

    /// Pointer left the surface: end the stroke.
    pub fn pointer_leave(&mut self) {
        self.state = StrokeState::Idle;
    }
}
