//! HTML document extractor.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::html::extract_html_bytes;
use crate::plugins::{DocumentExtractor, ExtractionInput, Plugin};
use crate::types::FormatTag;
use async_trait::async_trait;

/// Extractor for uploaded .html/.htm files.
///
/// Fetched web pages go through [`crate::extractors::WebPageExtractor`], which
/// shares the same text normalization.
pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for HtmlExtractor {
    fn name(&self) -> &str {
        "html-extractor"
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
        "Extracts visible text from HTML documents"
    }
}

#[async_trait]
impl DocumentExtractor for HtmlExtractor {
    async fn extract(&self, input: ExtractionInput, _config: &ExtractionConfig) -> Result<String> {
        extract_html_bytes(&input.into_bytes()?)
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Html]
    }
}
