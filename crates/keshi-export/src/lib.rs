//! keshi-export: Pure format serializers (sans-IO)
//!
//! Turns editor state into bytes a host can save or display: the mask as
//! a grayscale PNG, and a preview of the selection drawn translucently
//! over the source image.

pub mod overlay;
pub mod png;

pub use overlay::overlay;
pub use png::{ExportError, mask_to_png, rgba_to_png};
