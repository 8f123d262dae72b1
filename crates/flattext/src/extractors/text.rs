//! Plain text extractor.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::text::decode_text;
use crate::plugins::{DocumentExtractor, ExtractionInput, Plugin};
use crate::types::FormatTag;
use async_trait::async_trait;

/// Plain text extractor.
///
/// Returns .txt content verbatim after UTF-8 validation.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain-text-extractor"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> &str {
        "Returns plain text files unchanged"
    }
}

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    async fn extract(&self, input: ExtractionInput, _config: &ExtractionConfig) -> Result<String> {
        decode_text(&input.into_bytes()?)
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Text]
    }
}
