//! Rendering error taxonomy.
//!
//! These are the failures that surface lazily at flatten time. Inputs such
//! as URLs, prompts, and color strings are accepted without validation, so
//! a broken background URL or an undecodable payload is reported here
//! rather than at input time.

use thiserror::Error;

/// Errors produced while resolving or flattening the scene.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The remote background could not be fetched.
    #[error("background fetch failed: {0}")]
    Fetch(#[source] reqwest::Error),

    /// An image payload could not be decoded, or the output could not be encoded.
    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// The generated overlay markup was rejected by the SVG parser.
    #[error("overlay markup rejected: {0}")]
    Overlay(String),

    /// A raster surface of the requested size could not be allocated.
    #[error("could not allocate a {width}x{height} surface")]
    Surface { width: u32, height: u32 },
}
