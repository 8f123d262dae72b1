//! Extractors for structured data formats: CSV, XML and JSON.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::{extract_csv_text, extract_xml_text, normalize_json};
use crate::plugins::{DocumentExtractor, ExtractionInput, Plugin};
use crate::types::FormatTag;
use async_trait::async_trait;

/// CSV extractor. Every row is data; there is no header handling.
pub struct CsvExtractor;

impl CsvExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for CsvExtractor {
    fn name(&self) -> &str {
        "csv-extractor"
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
        "Flattens CSV rows into space-separated text"
    }
}

#[async_trait]
impl DocumentExtractor for CsvExtractor {
    async fn extract(&self, input: ExtractionInput, _config: &ExtractionConfig) -> Result<String> {
        extract_csv_text(&input.into_bytes()?)
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Csv]
    }
}

/// XML extractor.
pub struct XmlExtractor;

impl XmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for XmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for XmlExtractor {
    fn name(&self) -> &str {
        "xml-extractor"
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
        "Extracts element text from XML documents"
    }
}

#[async_trait]
impl DocumentExtractor for XmlExtractor {
    async fn extract(&self, input: ExtractionInput, _config: &ExtractionConfig) -> Result<String> {
        extract_xml_text(&input.into_bytes()?)
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Xml]
    }
}

/// JSON extractor.
///
/// Output is the compact re-serialization of the parsed document.
pub struct JsonExtractor;

impl JsonExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for JsonExtractor {
    fn name(&self) -> &str {
        "json-extractor"
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
        "Re-serializes JSON documents in compact form"
    }
}

#[async_trait]
impl DocumentExtractor for JsonExtractor {
    async fn extract(&self, input: ExtractionInput, _config: &ExtractionConfig) -> Result<String> {
        normalize_json(&input.into_bytes()?)
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Json]
    }
}
