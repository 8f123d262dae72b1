//! Document extractor plugin trait.
//!
//! An extractor turns the raw content of one [`FormatTag`] into normalized text.
//! Extractors for uploaded files receive bytes; extractors for remote sources
//! receive the URL and fetch through their own collaborator.

use crate::core::config::ExtractionConfig;
use crate::plugins::Plugin;
use crate::types::FormatTag;
use crate::{FlattextError, Result};
use async_trait::async_trait;

/// Raw content handed to an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionInput {
    Bytes(Vec<u8>),
    Url(String),
}

impl ExtractionInput {
    /// Take the uploaded bytes, failing if this input is a URL.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            ExtractionInput::Bytes(bytes) => Ok(bytes),
            ExtractionInput::Url(url) => Err(FlattextError::validation(format!(
                "Expected file content but received URL '{}'",
                url
            ))),
        }
    }

    /// Take the URL, failing if this input is file content.
    pub fn into_url(self) -> Result<String> {
        match self {
            ExtractionInput::Url(url) => Ok(url),
            ExtractionInput::Bytes(bytes) => Err(FlattextError::validation(format!(
                "Expected a URL but received {} bytes of file content",
                bytes.len()
            ))),
        }
    }
}

/// Trait for document extractor plugins.
///
/// # Thread Safety
///
/// Extractors are shared behind `Arc` and invoked from spawned tasks, so they
/// must be `Send + Sync + 'static` and hold no per-request state.
///
/// # Example
///
/// ```rust
/// use flattext::plugins::{DocumentExtractor, ExtractionInput, Plugin};
/// use flattext::{ExtractionConfig, FormatTag, Result};
/// use async_trait::async_trait;
///
/// struct UppercaseText;
///
/// impl Plugin for UppercaseText {
///     fn name(&self) -> &str { "uppercase-text" }
///     fn version(&self) -> String { "1.0.0".to_string() }
///     fn initialize(&self) -> Result<()> { Ok(()) }
///     fn shutdown(&self) -> Result<()> { Ok(()) }
/// }
///
/// #[async_trait]
/// impl DocumentExtractor for UppercaseText {
///     async fn extract(&self, input: ExtractionInput, _config: &ExtractionConfig) -> Result<String> {
///         let bytes = input.into_bytes()?;
///         Ok(String::from_utf8_lossy(&bytes).to_uppercase())
///     }
///
///     fn supported_formats(&self) -> &[FormatTag] {
///         &[FormatTag::Text]
///     }
///
///     fn priority(&self) -> i32 {
///         60
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let text = UppercaseText
///     .extract(ExtractionInput::Bytes(b"quiet".to_vec()), &ExtractionConfig::default())
///     .await
///     .unwrap();
/// assert_eq!(text, "QUIET");
/// # });
/// ```
#[async_trait]
pub trait DocumentExtractor: Plugin {
    /// Extract normalized text from the input.
    ///
    /// # Errors
    ///
    /// - `FlattextError::Parsing` when the content is malformed
    /// - `FlattextError::Network` when a remote fetch fails
    /// - `FlattextError::TranscriptUnavailable` when a video has no usable captions
    async fn extract(&self, input: ExtractionInput, config: &ExtractionConfig) -> Result<String>;

    /// Format tags this extractor handles.
    fn supported_formats(&self) -> &[FormatTag];

    /// Priority used when several extractors claim the same format.
    ///
    /// Higher wins. Built-in extractors use 50.
    fn priority(&self) -> i32 {
        50
    }

    /// Whether this extractor handles the given format.
    fn can_handle(&self, format: FormatTag) -> bool {
        self.supported_formats().contains(&format)
    }
}
