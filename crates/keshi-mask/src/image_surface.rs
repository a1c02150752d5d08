//! The image surface: the current source image and its load lifecycle.
//!
//! Loading is asynchronous in every real host (browser fetch, file
//! dialog, network), so it is modelled as a suspend/resume pair instead
//! of a callback chain:
//!
//! 1. [`ImageSurface::begin_load`] issues a [`LoadRequest`] ticket
//!    carrying a new generation number.
//! 2. The host fetches the bytes however it likes, for as long as it
//!    likes.
//! 3. [`ImageSurface::complete_load`] hands the ticket back with the
//!    fetched bytes (or the fetch error).
//!
//! Only the latest generation is ever applied. A completion for an older
//! ticket is reported as [`LoadOutcome::Stale`] and discarded, so a
//! superseded selection can never overwrite a newer one. Until a load
//! completes the previous image stays current, and a failed load leaves
//! it untouched.

use crate::types::{Dimensions, LoadError, RgbaImage};

/// A decoded source image.
#[derive(Debug, Clone)]
pub struct SourceImage {
    uri: String,
    pixels: RgbaImage,
}

impl SourceImage {
    /// The URI this image was loaded from.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The decoded pixels.
    #[must_use]
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Natural pixel dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.pixels.width(), self.pixels.height())
    }
}

/// Ticket for one in-flight image load.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a load request must be completed with complete_load"]
pub struct LoadRequest {
    generation: u64,
    uri: String,
}

impl LoadRequest {
    /// Monotonically increasing ticket number.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The URI to fetch.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Result of handing a completed fetch back to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image was decoded and is now current.
    Ready(Dimensions),
    /// A newer request was issued meanwhile; this completion was ignored.
    Stale,
}

/// Holds the current source image.
#[derive(Debug, Default)]
pub struct ImageSurface {
    current: Option<SourceImage>,
    latest_generation: u64,
    pending: bool,
}

impl ImageSurface {
    /// Create a surface with no image.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `uri`, superseding any load still in flight.
    pub fn begin_load(&mut self, uri: impl Into<String>) -> LoadRequest {
        self.latest_generation += 1;
        self.pending = true;
        let request = LoadRequest {
            generation: self.latest_generation,
            uri: uri.into(),
        };
        tracing::debug!(generation = request.generation, uri = %request.uri, "image load started");
        request
    }

    /// Finish a load started with [`begin_load`](Self::begin_load).
    ///
    /// # Errors
    ///
    /// If `request` is the latest one and `fetched` is an error, or the
    /// bytes are empty or cannot be decoded, the error is returned and
    /// the previous image stays current. Errors for stale requests are
    /// swallowed and reported as [`LoadOutcome::Stale`].
    pub fn complete_load(
        &mut self,
        request: LoadRequest,
        fetched: Result<Vec<u8>, LoadError>,
    ) -> Result<LoadOutcome, LoadError> {
        if request.generation != self.latest_generation {
            tracing::debug!(
                generation = request.generation,
                latest = self.latest_generation,
                "ignoring stale image load"
            );
            return Ok(LoadOutcome::Stale);
        }
        self.pending = false;

        let pixels = fetched.and_then(|bytes| decode(&bytes)).inspect_err(|e| {
            tracing::warn!(
                uri = %request.uri,
                error = %e,
                "image load failed; keeping previous image"
            );
        })?;

        let image = SourceImage {
            uri: request.uri,
            pixels,
        };
        let dimensions = image.dimensions();
        tracing::info!(
            uri = %image.uri,
            width = dimensions.width,
            height = dimensions.height,
            "image loaded"
        );
        self.current = Some(image);
        Ok(LoadOutcome::Ready(dimensions))
    }

    /// The current image, if any load has succeeded.
    #[must_use]
    pub const fn current(&self) -> Option<&SourceImage> {
        self.current.as_ref()
    }

    /// Natural dimensions of the current image.
    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.current.as_ref().map(SourceImage::dimensions)
    }

    /// Returns `true` while the latest request has not completed.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending
    }
}

/// Decode encoded image bytes (PNG, JPEG, BMP, WebP) to RGBA.
///
/// # Errors
///
/// Returns [`LoadError::EmptyInput`] if `bytes` is empty and
/// [`LoadError::Decode`] if the format is unrecognized or corrupt.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::EmptyInput);
    }
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}
