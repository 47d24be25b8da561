//! Clients for the external text-generation service.
//!
//! Two endpoints share one configuration and HTTP client: meme-concept
//! suggestions ([`TextGenClient::fetch_suggestions`]) and share captions
//! ([`TextGenClient::fetch_caption`]). The service is a generative language
//! model behind an HTTP facade, so its JSON payloads sometimes arrive
//! wrapped in a markdown code fence; both clients strip the fence before
//! parsing, and fenced and unfenced payloads parse identically.
//!
//! No request is ever retried: every failure is terminal for the user
//! action that triggered it.

mod caption;
mod suggest;

pub use caption::{Caption, CaptionRequest};
pub use suggest::{MAX_SUGGESTIONS, Suggestion, SuggestionLanguage};

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the text-generation service.
///
/// The API credential is held by the embedding application, never baked into
/// the library. Its absence is a configuration error reported before any
/// network I/O happens.
#[derive(Debug, Clone, Default)]
pub struct TextGenConfig {
    /// Base URL of the service; `suggest` and `caption` paths are appended.
    pub base_url: String,
    /// Bearer credential for the service. `None` (or empty) means
    /// unconfigured.
    pub api_key: Option<String>,
}

// ============================================================================
// Errors
// ============================================================================

/// Failures of the text-generation clients.
#[derive(Debug, Error)]
pub enum AiError {
    /// Configuration error: the credential is missing. Raised before any
    /// request is issued.
    #[error("text-generation API key is not configured")]
    MissingCredential,

    /// The service answered with a server-side failure, the class that a
    /// missing server-held credential also lands in.
    #[error("text-generation service unavailable (HTTP {0})")]
    ServiceUnavailable(u16),

    /// Transport-level failure (network, TLS, non-5xx error status).
    #[error("text-generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not valid JSON after fence stripping.
    #[error("malformed text-generation response: {0}")]
    Malformed(#[from] serde_json::Error),
}

// ============================================================================
// TextGenClient
// ============================================================================

/// HTTP client for both text-generation endpoints.
#[derive(Debug, Clone)]
pub struct TextGenClient {
    http: reqwest::Client,
    config: TextGenConfig,
}

impl TextGenClient {
    pub fn new(config: TextGenConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn credential(&self) -> Result<&str, AiError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(AiError::MissingCredential)
    }

    /// Posts a JSON body and returns the raw response text.
    ///
    /// 5xx responses map to [`AiError::ServiceUnavailable`] so callers can
    /// distinguish a misconfigured service from a garbled one.
    pub(crate) async fn post_for_text(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<String, AiError> {
        let key = self.credential()?;
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let response = self.http.post(&url).bearer_auth(key).json(body).send().await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(AiError::ServiceUnavailable(status.as_u16()));
        }
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Strips a markdown code fence from a service response.
///
/// The model is asked for raw JSON but sometimes wraps it anyway.
pub(crate) fn strip_code_fence(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_stripping_is_transparent_to_parsing() {
        let raw = r#"[{"topText":"A","bottomText":"B","visualPrompt":"C"}]"#;
        let fenced = format!("```json\n{raw}\n```");

        let from_raw: Vec<Suggestion> =
            serde_json::from_str(&strip_code_fence(raw)).unwrap();
        let from_fenced: Vec<Suggestion> =
            serde_json::from_str(&strip_code_fence(&fenced)).unwrap();

        assert_eq!(from_raw, from_fenced);
    }

    #[test]
    fn bare_fence_and_whitespace_are_stripped() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("{}"), "{}");
    }

    #[tokio::test]
    async fn missing_credential_short_circuits_before_any_request() {
        // base_url is not even routable; the call must fail on configuration
        // alone, without attempting the network.
        let client = TextGenClient::new(TextGenConfig {
            base_url: "http://invalid.invalid".to_string(),
            api_key: None,
        });

        let err = client
            .fetch_suggestions(SuggestionLanguage::English, "")
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::MissingCredential));

        let err = client
            .fetch_caption(&CaptionRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::MissingCredential));
    }

    #[tokio::test]
    async fn empty_credential_counts_as_missing() {
        let client = TextGenClient::new(TextGenConfig {
            base_url: "http://invalid.invalid".to_string(),
            api_key: Some(String::new()),
        });

        let err = client
            .fetch_suggestions(SuggestionLanguage::Telugu, "tech life")
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::MissingCredential));
    }
}
