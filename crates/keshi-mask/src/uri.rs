//! Image URI resolution.
//!
//! Uploaded files arrive as `data:` URIs carrying the image inline;
//! gallery images and local files arrive as plain locations that only
//! the platform can fetch. Inline payloads are decoded here so the core
//! can load them without any loader at all.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::types::LoadError;

/// Platform facility that turns a URI into encoded image bytes.
///
/// Implementations live in the glue layer (filesystem, HTTP, browser
/// fetch). The core treats them as trusted and never inspects the URI
/// beyond recognising inline `data:` payloads.
pub trait ImageLoader {
    /// Fetch the encoded bytes behind `uri`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when the resource cannot be fetched.
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, LoadError>;
}

impl<F> ImageLoader for F
where
    F: Fn(&str) -> Result<Vec<u8>, LoadError>,
{
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, LoadError> {
        self(uri)
    }
}

/// Resolve `uri` to encoded bytes: inline `data:` payloads are decoded
/// directly, everything else goes through `loader`.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedUri`] for an empty URI or a `data:`
/// URI that is not base64-encoded, [`LoadError::DataUri`] for a
/// malformed base64 payload, and whatever `loader` returns otherwise.
pub fn fetch_bytes(uri: &str, loader: &impl ImageLoader) -> Result<Vec<u8>, LoadError> {
    if uri.trim().is_empty() {
        return Err(LoadError::UnsupportedUri("empty URI".into()));
    }
    match decode_data_uri(uri)? {
        Some(bytes) => Ok(bytes),
        None => loader.fetch(uri),
    }
}

/// Decode an inline `data:[<media type>];base64,<payload>` URI.
///
/// Returns `Ok(None)` if `uri` is not a `data:` URI.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedUri`] if the URI has no `,`
/// separator or is not base64-encoded, and [`LoadError::DataUri`] if
/// the payload is not valid base64.
pub fn decode_data_uri(uri: &str) -> Result<Option<Vec<u8>>, LoadError> {
    let Some(rest) = strip_prefix_ignore_case(uri.trim_start(), "data:") else {
        return Ok(None);
    };
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::UnsupportedUri("data URI without ',' separator".into()))?;

    let is_base64 = header
        .rsplit(';')
        .next()
        .is_some_and(|param| param.trim().eq_ignore_ascii_case("base64"));
    if !is_base64 {
        return Err(LoadError::UnsupportedUri(format!(
            "data URI with header {header:?} is not base64-encoded"
        )));
    }

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(Some(BASE64.decode(compact)?))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
