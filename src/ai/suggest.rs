//! Meme-concept suggestions from the text-generation service.

use serde::{Deserialize, Serialize};

use super::{AiError, TextGenClient, strip_code_fence};

/// Upper bound on suggestions kept from one response.
pub const MAX_SUGGESTIONS: usize = 10;

/// Caption language requested from the service.
///
/// The visual prompt is always English regardless of the caption language,
/// since it feeds the image generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionLanguage {
    English,
    #[default]
    Telugu,
}

/// One AI-proposed meme concept: classic top/bottom captions plus an image
/// prompt to seed the background generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub top_text: String,
    pub bottom_text: String,
    pub visual_prompt: String,
}

#[derive(Serialize)]
struct SuggestRequest<'a> {
    language: SuggestionLanguage,
    topic: &'a str,
}

impl TextGenClient {
    /// Requests a batch of meme concepts for a language and optional topic
    /// (empty topic means no constraint).
    ///
    /// The response is a JSON array, possibly fence-wrapped; at most
    /// [`MAX_SUGGESTIONS`] entries are kept.
    pub async fn fetch_suggestions(
        &self,
        language: SuggestionLanguage,
        topic: &str,
    ) -> Result<Vec<Suggestion>, AiError> {
        let text = self
            .post_for_text("suggest", &SuggestRequest { language, topic })
            .await?;
        let mut suggestions: Vec<Suggestion> = serde_json::from_str(&strip_code_fence(&text))?;
        suggestions.truncate(MAX_SUGGESTIONS);
        Ok(suggestions)
    }

    /// Like [`fetch_suggestions`](Self::fetch_suggestions), but failures
    /// surface as an empty list plus a log entry. This is the form the
    /// rendering path consumes; it never sees an error.
    pub async fn suggestions_or_empty(
        &self,
        language: SuggestionLanguage,
        topic: &str,
    ) -> Vec<Suggestion> {
        match self.fetch_suggestions(language, topic).await {
            Ok(suggestions) => suggestions,
            Err(err) => {
                log::warn!("suggestion fetch failed: {err}");
                Vec::new()
            }
        }
    }
}
