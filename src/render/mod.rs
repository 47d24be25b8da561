//! Flattening the edited scene into a single raster image.
//!
//! The compositor reads the session state (background, standard captions,
//! layers) and produces one image, preserving the on-screen stacking order.
//! Remote backgrounds are fetched and decoded here, which is also where
//! unvalidated URLs finally fail; the session itself never touches the
//! network.

mod raster;
mod scene;

use std::io::Cursor;
use std::sync::Arc;

use chrono::Utc;
use image::{Rgba, RgbaImage, imageops};
use resvg::usvg::fontdb;

use crate::background::BackgroundContent;
use crate::error::RenderError;
use crate::session::EditorSession;

/// Edge length of the on-screen meme canvas.
pub const DEFAULT_CANVAS_SIZE: u32 = 500;

/// Ground color behind a letterboxed (or absent) background.
const CANVAS_GROUND: Rgba<u8> = Rgba([24, 24, 27, 255]);

// ============================================================================
// ExportFile
// ============================================================================

/// A flattened image packaged for download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    /// Timestamp-derived name, e.g. `meme-1754438400000.png`.
    pub file_name: String,
    /// Encoded PNG bytes.
    pub bytes: Vec<u8>,
}

/// Encodes a flattened image as a downloadable PNG with a
/// timestamp-derived filename.
pub fn export_png(image: &RgbaImage) -> Result<ExportFile, RenderError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(ExportFile {
        file_name: format!("meme-{}.png", Utc::now().timestamp_millis()),
        bytes,
    })
}

// ============================================================================
// Compositor
// ============================================================================

/// Renders sessions into flat raster images.
///
/// Construction loads the system font database once; keep one compositor
/// around rather than recreating it per flatten.
pub struct Compositor {
    width: u32,
    height: u32,
    http: reqwest::Client,
    fonts: Arc<fontdb::Database>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// A compositor at the default canvas size.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_CANVAS_SIZE, DEFAULT_CANVAS_SIZE)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            http: reqwest::Client::new(),
            fonts: raster::load_fonts(),
        }
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Fetches and decodes the live background content.
    ///
    /// `Remote` content is fetched with a plain GET; a broken or
    /// unreachable URL surfaces here, at render time, not when it was
    /// entered.
    pub async fn resolve_background(
        &self,
        content: &BackgroundContent,
    ) -> Result<RgbaImage, RenderError> {
        match content {
            BackgroundContent::Local(image) => Ok(image.clone()),
            BackgroundContent::Remote(url) => {
                let bytes = self
                    .http
                    .get(url)
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
                    .map_err(RenderError::Fetch)?
                    .bytes()
                    .await
                    .map_err(RenderError::Fetch)?;
                Ok(image::load_from_memory(&bytes)?.to_rgba8())
            }
        }
    }

    /// Renders the session into a single image: ground color, letterboxed
    /// background, then the overlay scene (standard text and layers) in
    /// stacking order.
    ///
    /// The background is passed in already resolved so this stays
    /// synchronous and deterministic; pass `None` to render without one.
    pub fn flatten(
        &self,
        session: &EditorSession,
        background: Option<&RgbaImage>,
    ) -> Result<RgbaImage, RenderError> {
        let mut canvas = RgbaImage::from_pixel(self.width, self.height, CANVAS_GROUND);

        if let Some(bg) = background {
            let (scaled, x, y) = raster::contain_fit(bg, self.width, self.height);
            imageops::overlay(&mut canvas, &scaled, x, y);
        }

        let svg = scene::overlay_svg(
            self.width,
            self.height,
            &session.standard_text,
            &session.layers,
        );
        let overlay = raster::render_overlay(&svg, &self.fonts)?;
        raster::composite_over(&mut canvas, &overlay, 0, 0);

        Ok(canvas)
    }
}

// ============================================================================
// Tests
// ============================================================================
