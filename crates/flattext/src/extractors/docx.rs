//! Word document extractor.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::docx::extract_docx_text;
use crate::extractors::run_blocking;
use crate::plugins::{DocumentExtractor, ExtractionInput, Plugin};
use crate::types::FormatTag;
use async_trait::async_trait;

/// Extractor for .docx files.
///
/// Produces paragraph text in document order, one space between paragraphs.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DocxExtractor {
    fn name(&self) -> &str {
        "docx-extractor"
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
        "Extracts paragraph text from Word documents"
    }
}

#[async_trait]
impl DocumentExtractor for DocxExtractor {
    async fn extract(&self, input: ExtractionInput, _config: &ExtractionConfig) -> Result<String> {
        let bytes = input.into_bytes()?;
        run_blocking("DOCX", move || extract_docx_text(&bytes)).await
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Word]
    }
}
