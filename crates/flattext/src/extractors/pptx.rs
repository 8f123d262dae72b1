//! PowerPoint presentation extractor.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::pptx::extract_pptx_text;
use crate::extractors::run_blocking;
use crate::plugins::{DocumentExtractor, ExtractionInput, Plugin};
use crate::types::FormatTag;
use async_trait::async_trait;

/// Extractor for .pptx presentations.
pub struct PptxExtractor;

impl PptxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PptxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PptxExtractor {
    fn name(&self) -> &str {
        "pptx-extractor"
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
        "Extracts shape text from PowerPoint presentations"
    }
}

#[async_trait]
impl DocumentExtractor for PptxExtractor {
    async fn extract(&self, input: ExtractionInput, _config: &ExtractionConfig) -> Result<String> {
        let bytes = input.into_bytes()?;
        run_blocking("PPTX", move || extract_pptx_text(&bytes)).await
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Pptx]
    }
}
