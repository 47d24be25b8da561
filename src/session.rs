//! The editor session: one context object owning all mutable editing state.
//!
//! Nothing in the crate is a global. The embedding screen creates an
//! [`EditorSession`] and threads it through explicitly; the layer store,
//! background state, and caption slots are plain public fields accessed
//! directly.
//!
//! # Request fencing
//!
//! Network completions apply to the state current at completion time, and
//! a superseded request must not overwrite a newer one. Each logical
//! operation (suggestion fetch, caption fetch) has its own
//! [`RequestSequence`]: starting a request issues a token, and a completion
//! is only accepted while its token is still the most recent. Requests are
//! not aborted in flight; a stale completion is simply discarded when it
//! arrives.

use crate::ai::{CaptionRequest, Suggestion};
use crate::background::{BackgroundProvider, BackgroundState};
use crate::layer::LayerStore;
use crate::text::StandardText;

// ============================================================================
// Request fencing
// ============================================================================

/// Token identifying one issued request of a logical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Monotonic sequence that makes superseded completions detectable.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    /// Issues a token for a new request, superseding all earlier ones.
    pub fn begin(&mut self) -> RequestToken {
        self.issued = self.issued.wrapping_add(1);
        RequestToken(self.issued)
    }

    /// True while the token belongs to the most recently issued request.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }
}

// ============================================================================
// EditorSession
// ============================================================================

/// All mutable editing state for one meme.
#[derive(Debug, Default)]
pub struct EditorSession {
    pub layers: LayerStore,
    pub background: BackgroundState,
    pub standard_text: StandardText,
    suggestions: Vec<Suggestion>,
    suggestion_requests: RequestSequence,
    caption_requests: RequestSequence,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The suggestion batch currently offered to the user.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Registers a new suggestion fetch, superseding any in flight.
    pub fn begin_suggestion_fetch(&mut self) -> RequestToken {
        self.suggestion_requests.begin()
    }

    /// Stores a completed suggestion batch if its request is still current.
    ///
    /// Returns false, and changes nothing, for a stale completion.
    pub fn accept_suggestions(
        &mut self,
        token: RequestToken,
        suggestions: Vec<Suggestion>,
    ) -> bool {
        if !self.suggestion_requests.is_current(token) {
            log::debug!("discarding superseded suggestion response");
            return false;
        }
        self.suggestions = suggestions;
        true
    }

    /// Registers a new caption fetch, superseding any in flight.
    pub fn begin_caption_fetch(&mut self) -> RequestToken {
        self.caption_requests.begin()
    }

    /// True while the caption completion holding this token may be applied.
    pub fn caption_fetch_is_current(&self, token: RequestToken) -> bool {
        self.caption_requests.is_current(token)
    }

    /// Applies a suggestion: copies its visual prompt into the AI prompt
    /// field, its captions into the standard text slots, switches the
    /// active background provider to AI, and clears every layer (a fresh
    /// concept starts from an uncluttered canvas).
    ///
    /// Does not trigger image generation; the user invokes that
    /// separately.
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion) {
        self.background.set_prompt(&suggestion.visual_prompt);
        self.background.set_provider(BackgroundProvider::Ai);
        self.standard_text.set_top(&suggestion.top_text);
        self.standard_text.set_bottom(&suggestion.bottom_text);
        self.layers.clear();
    }

    /// Builds the caption-request context from the current editing state.
    pub fn caption_request(&self) -> CaptionRequest {
        CaptionRequest {
            top_text: self.standard_text.top().to_string(),
            bottom_text: self.standard_text.bottom().to_string(),
            desc: self.background.prompt().to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
