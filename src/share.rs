//! Packaging a flattened meme for the platform share flow.
//!
//! The share bundle pairs the exported image with the AI caption. Caption
//! failures degrade to a stock caption instead of blocking the share, and
//! a platform without a native share capability reports that explicitly
//! rather than failing silently.

use thiserror::Error;

use crate::ai::{AiError, Caption};
use crate::render::ExportFile;

/// Transient bundle handed to the platform share capability. Dropped when
/// the share dialog is dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct SharePayload {
    pub file: ExportFile,
    pub caption: String,
    pub hashtags: String,
}

/// Failures of the share flow itself.
#[derive(Debug, Error)]
pub enum ShareError {
    /// No native share capability on this platform.
    #[error("sharing is not supported on this platform")]
    Unsupported,

    /// The platform share capability rejected the payload.
    #[error("share failed: {0}")]
    Failed(String),
}

/// The platform's native share capability, where one exists.
pub trait ShareTarget {
    fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}

/// Assembles the share bundle from an export and the caption result.
///
/// A failed caption fetch is logged and substituted with
/// [`Caption::fallback`]; captioning never prevents sharing.
pub fn build_share_payload(file: ExportFile, caption: Result<Caption, AiError>) -> SharePayload {
    let caption = caption.unwrap_or_else(|err| {
        log::warn!("caption fetch failed, using fallback: {err}");
        Caption::fallback()
    });
    SharePayload {
        file,
        caption: caption.caption,
        hashtags: caption.hashtags,
    }
}

/// Hands the bundle to the platform target, or reports that sharing is
/// unavailable.
pub fn share_with(
    target: Option<&dyn ShareTarget>,
    payload: &SharePayload,
) -> Result<(), ShareError> {
    match target {
        Some(target) => target.share(payload),
        None => Err(ShareError::Unsupported),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn export() -> ExportFile {
        ExportFile {
            file_name: "meme-0.png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn caption_failure_falls_back_instead_of_blocking() {
        let payload = build_share_payload(export(), Err(AiError::MissingCredential));
        assert_eq!(payload.caption, "Check out this meme!");
        assert_eq!(payload.hashtags, "#meme #viral");
        assert_eq!(payload.file.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn successful_caption_is_used_verbatim() {
        let caption = Caption {
            caption: "release day energy".to_string(),
            hashtags: "#memes".to_string(),
        };
        let payload = build_share_payload(export(), Ok(caption));
        assert_eq!(payload.caption, "release day energy");
        assert_eq!(payload.hashtags, "#memes");
    }

    #[test]
    fn missing_target_reports_unsupported() {
        let payload = build_share_payload(export(), Err(AiError::MissingCredential));
        let err = share_with(None, &payload).unwrap_err();
        assert!(matches!(err, ShareError::Unsupported));
    }

    #[test]
    fn present_target_receives_the_payload() {
        struct Recorder(RefCell<Vec<String>>);
        impl ShareTarget for Recorder {
            fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
                self.0.borrow_mut().push(payload.file.file_name.clone());
                Ok(())
            }
        }

        let recorder = Recorder(RefCell::new(Vec::new()));
        let payload = build_share_payload(export(), Ok(Caption::fallback()));
        share_with(Some(&recorder), &payload).unwrap();
        assert_eq!(*recorder.0.borrow(), vec!["meme-0.png".to_string()]);
    }
}
