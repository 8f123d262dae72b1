//! Excel spreadsheet extractor.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::excel::extract_excel_text;
use crate::extractors::run_blocking;
use crate::plugins::{DocumentExtractor, ExtractionInput, Plugin};
use crate::types::FormatTag;
use async_trait::async_trait;

/// Extractor for .xlsx workbooks.
///
/// Every cell of every sheet is emitted in row-major order, blanks included.
pub struct ExcelExtractor;

impl ExcelExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExcelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ExcelExtractor {
    fn name(&self) -> &str {
        "excel-extractor"
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
        "Extracts cell values from Excel workbooks"
    }
}

#[async_trait]
impl DocumentExtractor for ExcelExtractor {
    async fn extract(&self, input: ExtractionInput, _config: &ExtractionConfig) -> Result<String> {
        let bytes = input.into_bytes()?;
        run_blocking("Excel", move || extract_excel_text(&bytes)).await
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Excel]
    }
}
