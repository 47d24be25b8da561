//! Background image sourcing: AI generation, local upload, or a direct URL.
//!
//! Three input channels feed a single live content slot. Switching the
//! active tab never clears another tab's input (the prompt and URL fields
//! survive), but whichever channel last produced content owns the slot, so
//! exactly zero or one background value is ever live for rendering.

use image::RgbaImage;
use rand::Rng;
use reqwest::Url;

/// Base endpoint of the external image-generation service.
pub const IMAGE_GEN_BASE: &str = "https://image.pollinations.ai";

/// Fixed output resolution requested from the generator.
const IMAGE_GEN_SIZE: u32 = 1024;

/// Seeds are drawn from `0..MAX_SEED` so repeated identical prompts don't
/// collide on an upstream cache.
const MAX_SEED: u32 = 1_000_000;

// ============================================================================
// Provider & content
// ============================================================================

/// Which input tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundProvider {
    #[default]
    Ai,
    Upload,
    Url,
}

/// The single live background value.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundContent {
    /// A URL to fetch at render time, AI-generated or user-supplied.
    /// Unreachable URLs surface as a broken background when flattening.
    Remote(String),
    /// An uploaded image, already decoded and directly embeddable.
    Local(RgbaImage),
}

// ============================================================================
// BackgroundState
// ============================================================================

/// Tracks the active provider tab, the per-channel inputs, and the one live
/// content value.
#[derive(Debug, Default)]
pub struct BackgroundState {
    provider: BackgroundProvider,
    prompt: String,
    url_input: String,
    content: Option<BackgroundContent>,
}

impl BackgroundState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches the active tab. Inputs and content are untouched.
    pub fn set_provider(&mut self, provider: BackgroundProvider) {
        self.provider = provider;
    }

    pub fn provider(&self) -> BackgroundProvider {
        self.provider
    }

    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_url_input(&mut self, url: &str) {
        self.url_input = url.to_string();
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn content(&self) -> Option<&BackgroundContent> {
        self.content.as_ref()
    }

    /// AI channel: synthesizes a generation URL from the current prompt and
    /// a freshly drawn seed, and makes it the live content immediately.
    ///
    /// Fire-and-forget: the actual fetch happens in the renderer, which is
    /// where a loading state belongs. Returns the URL, or `None` when the
    /// prompt is empty.
    pub fn generate(&mut self) -> Option<String> {
        if self.prompt.is_empty() {
            return None;
        }
        let seed = rand::thread_rng().gen_range(0..MAX_SEED);
        let url = generation_url(&self.prompt, seed);
        self.content = Some(BackgroundContent::Remote(url.clone()));
        Some(url)
    }

    /// Upload channel: decodes the file bytes into an embeddable image and
    /// makes it the live content. A decode failure leaves the slot as it was.
    pub fn set_upload(&mut self, bytes: &[u8]) -> Result<(), image::ImageError> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        self.content = Some(BackgroundContent::Local(decoded));
        Ok(())
    }

    /// URL channel: makes the entered URL the live content verbatim, with no
    /// validation. No-op when the field is empty.
    pub fn apply_url(&mut self) {
        if !self.url_input.is_empty() {
            self.content = Some(BackgroundContent::Remote(self.url_input.clone()));
        }
    }
}

/// Builds the image-generation request URL for a prompt and seed.
///
/// The prompt is percent-encoded into the path; the fixed resolution and
/// `nologo` flag ride along as query parameters.
pub fn generation_url(prompt: &str, seed: u32) -> String {
    let mut url = Url::parse(IMAGE_GEN_BASE).expect("image generation base URL is valid");
    url.path_segments_mut()
        .expect("image generation base URL is a full URL")
        .push("prompt")
        .push(prompt);
    url.query_pairs_mut()
        .append_pair("seed", &seed.to_string())
        .append_pair("width", &IMAGE_GEN_SIZE.to_string())
        .append_pair("height", &IMAGE_GEN_SIZE.to_string())
        .append_pair("nologo", "true");
    url.into()
}

// ============================================================================
// Tests
// ============================================================================
