//! keshi-mask: Pure mask-editing core (sans-IO).
//!
//! Lets a user paint a region-of-interest mask over a source image with
//! brush, rectangle or circle stamps, ready to hand to a downstream
//! object-removal step:
//!
//! pointer event -> coordinate mapping -> stroke controller ->
//! stamp renderer -> mask surface -> removal collaborator.
//!
//! This crate has **no I/O dependencies**. Image bytes are fetched by
//! the host through [`ImageLoader`] and handed back through the
//! [`Editor::begin_image_load`] / [`Editor::complete_image_load`] pair;
//! everything else operates on in-memory buffers.
//!
//! ```rust
//! # use keshi_mask::{DisplayExtent, Editor, EditorError, Point, PointerEvent, Tool};
//! # fn run(png: Vec<u8>) -> Result<(), EditorError> {
//! let mut editor = Editor::default();
//! let request = editor.begin_image_load("photo.png");
//! editor.complete_image_load(request, Ok(png))?;
//!
//! editor.select_tool(Tool::Rectangle);
//! editor.set_stamp_size(80)?;
//! let display = DisplayExtent::new(400.0, 300.0);
//! editor.handle_pointer(PointerEvent::Down { position: Point::new(120.0, 90.0), display })?;
//! editor.handle_pointer(PointerEvent::Move { position: Point::new(140.0, 90.0), display })?;
//! editor.handle_pointer(PointerEvent::Up)?;
//!
//! let mask = editor.export_mask();
//! # let _ = mask;
//! # Ok(())
//! # }
//! ```

pub mod coords;
pub mod editor;
pub mod image_surface;
pub mod stamp;
pub mod stroke;
pub mod surface;
pub mod tool;
pub mod types;
pub mod uri;

pub use coords::map_to_buffer_space;
pub use editor::{Editor, PassthroughRemover, PointerEvent, RegionRemover};
pub use image_surface::{ImageSurface, LoadOutcome, LoadRequest, SourceImage};
pub use stamp::{Stamp, StampShape, StampStyle};
pub use stroke::{StrokeController, StrokeState};
pub use surface::MaskSurface;
pub use tool::{StampSize, StampSizeError, Tool, ToolState};
pub use types::{
    Dimensions, DisplayExtent, EditorConfig, EditorError, GrayImage, LoadError, MapError,
    MaskMode, Point, RgbaImage,
};
pub use uri::{ImageLoader, fetch_bytes};
