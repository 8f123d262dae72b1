//! PDF document extractor.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::pdf::extract_pdf_text;
use crate::extractors::run_blocking;
use crate::plugins::{DocumentExtractor, ExtractionInput, Plugin};
use crate::types::FormatTag;
use async_trait::async_trait;

/// PDF extractor backed by `lopdf`.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
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
        "Extracts page text from PDF documents"
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract(&self, input: ExtractionInput, _config: &ExtractionConfig) -> Result<String> {
        let bytes = input.into_bytes()?;
        tracing::debug!(size_bytes = bytes.len(), "Extracting PDF");
        run_blocking("PDF", move || extract_pdf_text(&bytes)).await
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Pdf]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlattextError;

    #[test]
    fn test_pdf_plugin_interface() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.name(), "pdf-extractor");
        assert!(extractor.initialize().is_ok());
        assert!(extractor.shutdown().is_ok());
        assert_eq!(extractor.supported_formats(), &[FormatTag::Pdf]);
    }

    #[tokio::test]
    async fn test_invalid_pdf_is_parse_error() {
        let err = PdfExtractor::new()
            .extract(ExtractionInput::Bytes(b"%PDF-oops".to_vec()), &ExtractionConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FlattextError::Parsing { .. }));
    }
}
