//! The editor facade: the surface the UI glue talks to.
//!
//! [`Editor`] owns every piece of state (image surface, mask surface,
//! tool state, stroke controller) and exposes the inputs the glue drives
//! (`select_image`, `select_tool`, `set_stamp_size`, `clear_selection`,
//! pointer events) and the outputs it reads (image dimensions, mask
//! contents, `generate`).
//!
//! All failures leave the previous state in place: a failed load keeps
//! the old image and mask, a rejected pointer event paints nothing, and
//! an out-of-range size keeps the old size.

use std::fmt::Display;

use crate::coords::map_to_buffer_space;
use crate::image_surface::{ImageSurface, LoadOutcome, LoadRequest, SourceImage};
use crate::stamp::{Stamp, StampStyle};
use crate::stroke::{StrokeController, StrokeState};
use crate::surface::MaskSurface;
use crate::tool::{StampSize, Tool, ToolState};
use crate::types::{
    Dimensions, DisplayExtent, EditorConfig, EditorError, GrayImage, LoadError, Point, RgbaImage,
};
use crate::uri::{ImageLoader, fetch_bytes};

/// A pointer event in display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed at `position` on a surface laid out at `display`.
    Down {
        /// Pointer position in display units.
        position: Point,
        /// Displayed size of the surface.
        display: DisplayExtent,
    },
    /// Pointer moved to `position`.
    Move {
        /// Pointer position in display units.
        position: Point,
        /// Displayed size of the surface.
        display: DisplayExtent,
    },
    /// Button released.
    Up,
    /// Pointer left the surface.
    Leave,
}

/// The downstream object-removal step.
///
/// Receives the source image and the exported mask and produces the
/// processed image. The actual inpainting algorithm lives outside this
/// crate.
pub trait RegionRemover {
    /// Error reported by the remover.
    type Error: Display;

    /// Remove the masked regions from `image`.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn remove(&self, image: &RgbaImage, mask: &GrayImage) -> Result<RgbaImage, Self::Error>;
}

/// Placeholder remover that returns the source image unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRemover;

impl RegionRemover for PassthroughRemover {
    type Error = std::convert::Infallible;

    fn remove(&self, image: &RgbaImage, mask: &GrayImage) -> Result<RgbaImage, Self::Error> {
        let selected = mask.iter().filter(|&&v| v > 0).count();
        tracing::info!(selected, "generating result (passthrough)");
        Ok(image.clone())
    }
}

/// Interactive mask editor over one source image.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    image: ImageSurface,
    mask: MaskSurface,
    tools: ToolState,
    stroke: StrokeController,
}

impl Editor {
    /// Create an editor with no image, using the configured defaults.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let tools = ToolState::new(config.default_tool, config.default_stamp_size);
        Self::with_tools(config, tools)
    }

    /// Create an editor with an explicit initial tool state.
    #[must_use]
    pub fn with_tools(config: EditorConfig, tools: ToolState) -> Self {
        let mask = MaskSurface::new(StampStyle::from(&config));
        Self {
            config,
            image: ImageSurface::new(),
            mask,
            tools,
            stroke: StrokeController::new(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ───────────────────────────── image ─────────────────────────────

    /// Start loading a new source image. See [`ImageSurface`] for the
    /// suspend/resume contract.
    pub fn begin_image_load(&mut self, uri: impl Into<String>) -> LoadRequest {
        self.image.begin_load(uri)
    }

    /// Finish a load. On [`LoadOutcome::Ready`] the mask is resized to
    /// the new image and emptied, and any stroke in progress ends.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Load`] if the latest load failed; the
    /// previous image and mask are kept.
    pub fn complete_image_load(
        &mut self,
        request: LoadRequest,
        fetched: Result<Vec<u8>, LoadError>,
    ) -> Result<LoadOutcome, EditorError> {
        let outcome = self.image.complete_load(request, fetched)?;
        if let LoadOutcome::Ready(dimensions) = outcome {
            self.mask.resize(dimensions.width, dimensions.height);
            self.stroke.pointer_leave();
        }
        Ok(outcome)
    }

    /// Select an image and load it right away through `loader`.
    ///
    /// Inline `data:` URIs are decoded without touching the loader.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Load`] if fetching or decoding fails; the
    /// previous image and mask are kept.
    pub fn select_image(
        &mut self,
        uri: &str,
        loader: &impl ImageLoader,
    ) -> Result<LoadOutcome, EditorError> {
        let request = self.begin_image_load(uri);
        let fetched = fetch_bytes(request.uri(), loader);
        self.complete_image_load(request, fetched)
    }

    /// The current source image.
    #[must_use]
    pub const fn image(&self) -> Option<&SourceImage> {
        self.image.current()
    }

    /// Natural dimensions of the current source image, for layout.
    #[must_use]
    pub fn image_dimensions(&self) -> Option<Dimensions> {
        self.image.dimensions()
    }

    /// Returns `true` while the latest image load has not completed.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.image.is_loading()
    }

    // ───────────────────────────── tools ─────────────────────────────

    /// Current tool and size.
    #[must_use]
    pub const fn tools(&self) -> &ToolState {
        &self.tools
    }

    /// Select the tool used by subsequent stamps.
    pub fn select_tool(&mut self, tool: Tool) {
        tracing::debug!(%tool, "tool selected");
        self.tools.select_tool(tool);
    }

    /// Set the size used by subsequent stamps.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::StampSize`] if `size` is out of range; the
    /// previous size is kept.
    pub fn set_stamp_size(&mut self, size: u32) -> Result<(), EditorError> {
        let size = StampSize::new(size)?;
        tracing::debug!(size = size.get(), "stamp size set");
        self.tools.set_size(size);
        Ok(())
    }

    /// Remove the whole selection.
    pub fn clear_selection(&mut self) {
        tracing::debug!("selection cleared");
        self.mask.clear();
    }

    // ──────────────────────────── pointer ────────────────────────────

    /// Feed one pointer event. Returns the stamp that was painted, if any.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoImage`] for a down/move before any image
    /// has loaded, and [`EditorError::Map`] if the position cannot be
    /// mapped into buffer space (surface not laid out, non-finite
    /// position). Nothing is painted and the stroke state is unchanged.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Option<Stamp>, EditorError> {
        let stamp = match event {
            PointerEvent::Down { position, display } => {
                let point = self.to_buffer(position, display)?;
                Some(self.stroke.pointer_down(point, &self.tools))
            }
            PointerEvent::Move { position, display } => {
                if !self.stroke.is_active() {
                    return Ok(None);
                }
                let point = self.to_buffer(position, display)?;
                self.stroke.pointer_move(point, &self.tools)
            }
            PointerEvent::Up => {
                self.stroke.pointer_up();
                None
            }
            PointerEvent::Leave => {
                self.stroke.pointer_leave();
                None
            }
        };

        if let Some(stamp) = &stamp {
            self.mask.paint_stamp(stamp);
        }
        Ok(stamp)
    }

    /// Current stroke state.
    #[must_use]
    pub const fn stroke_state(&self) -> StrokeState {
        self.stroke.state()
    }

    fn to_buffer(&self, position: Point, display: DisplayExtent) -> Result<Point, EditorError> {
        let buffer = self.mask.dimensions();
        if buffer.is_empty() {
            tracing::warn!("pointer event rejected: no image is loaded");
            return Err(EditorError::NoImage);
        }
        map_to_buffer_space(position, display, buffer).map_err(|e| {
            tracing::warn!(error = %e, "pointer event rejected");
            EditorError::from(e)
        })
    }

    // ──────────────────────────── outputs ────────────────────────────

    /// The mask surface, read-only.
    #[must_use]
    pub const fn mask(&self) -> &MaskSurface {
        &self.mask
    }

    /// Export the mask in the configured [`MaskMode`](crate::MaskMode).
    #[must_use]
    pub fn export_mask(&self) -> GrayImage {
        self.mask.export(self.config.mask_mode)
    }

    /// Hand the current (image, mask) pair to `remover`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoImage`] if no image is loaded and
    /// [`EditorError::Removal`] if the remover fails.
    pub fn generate<R: RegionRemover>(&self, remover: &R) -> Result<RgbaImage, EditorError> {
        let image = self.image.current().ok_or(EditorError::NoImage)?;
        let mask = self.export_mask();
        remover
            .remove(image.pixels(), &mask)
            .map_err(|e| EditorError::Removal(e.to_string()))
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
