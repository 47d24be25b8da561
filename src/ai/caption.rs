//! Share captions from the text-generation service.

use serde::{Deserialize, Serialize};

use super::{AiError, TextGenClient, strip_code_fence};

/// Context sent when requesting a caption: the meme's current captions and
/// a description of the visual.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    pub top_text: String,
    pub bottom_text: String,
    pub desc: String,
}

/// A social caption plus a single space-separated hashtag string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub caption: String,
    pub hashtags: String,
}

impl Caption {
    /// The hard-coded stand-in used when captioning fails. Sharing must
    /// never block on the caption service.
    pub fn fallback() -> Self {
        Self {
            caption: "Check out this meme!".to_string(),
            hashtags: "#meme #viral".to_string(),
        }
    }
}

impl TextGenClient {
    /// Requests a caption and hashtags for the current meme context.
    ///
    /// The response is a single JSON object (not an array), possibly
    /// fence-wrapped.
    pub async fn fetch_caption(&self, request: &CaptionRequest) -> Result<Caption, AiError> {
        let text = self.post_for_text("caption", request).await?;
        Ok(serde_json::from_str(&strip_code_fence(&text))?)
    }
}
