//! memeforge: meme composition and AI-captioning library
//!
//! This crate is the editing core of a meme-creation app: an editor session
//! holding draggable text/shape layers, classic top/bottom captions, and a
//! background sourced from AI generation, a local upload, or a URL; clients
//! for an external text-generation service (meme-concept suggestions and
//! share captions); and a compositor that flattens the whole scene into an
//! exportable PNG.
//!
//! # Example
//!
//! ```
//! use memeforge::{Compositor, EditorSession, LayerKind};
//!
//! let mut session = EditorSession::new();
//! session.standard_text.set_top("when the build passes");
//! let id = session.layers.add(LayerKind::Text, Some("Hello"));
//! assert_eq!(session.layers.selected(), Some(id));
//!
//! let compositor = Compositor::new();
//! let image = compositor.flatten(&session, None).unwrap();
//! assert_eq!(image.dimensions(), (500, 500));
//! ```
//!
//! # Suggestions
//!
//! Suggestion and caption fetches go through [`TextGenClient`]. Applying a
//! suggestion is a purely local transition: it seeds the prompt and the
//! caption slots and clears the layers, but image generation stays a
//! separate, explicit step.
//!
//! ```
//! use memeforge::{EditorSession, Suggestion};
//!
//! let mut session = EditorSession::new();
//! session.apply_suggestion(&Suggestion {
//!     top_text: "me".into(),
//!     bottom_text: "also me".into(),
//!     visual_prompt: "a cat in a tiny office chair".into(),
//! });
//! assert_eq!(session.background.prompt(), "a cat in a tiny office chair");
//! assert!(session.background.content().is_none());
//! ```

mod ai;
mod background;
mod error;
mod layer;
mod render;
mod session;
mod share;
mod style;
mod text;

pub use ai::{
    AiError, Caption, CaptionRequest, MAX_SUGGESTIONS, Suggestion, SuggestionLanguage,
    TextGenClient, TextGenConfig,
};
pub use background::{
    BackgroundContent, BackgroundProvider, BackgroundState, IMAGE_GEN_BASE, generation_url,
};
pub use error::RenderError;
pub use layer::{
    DEFAULT_LAYER_CONTENT, Layer, LayerId, LayerKind, LayerPatch, LayerStore, StylePatch,
};
pub use render::{Compositor, DEFAULT_CANVAS_SIZE, ExportFile, export_png};
pub use session::{EditorSession, RequestSequence, RequestToken};
pub use share::{SharePayload, ShareError, ShareTarget, build_share_payload, share_with};
pub use style::{LayerStyle, Position, StandardTextStyle, parse_color};
pub use text::StandardText;
