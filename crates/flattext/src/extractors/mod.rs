//! Built-in document extractors.
//!
//! One extractor per supported [`FormatTag`]. Each wraps a function from
//! [`crate::extraction`] in the `DocumentExtractor` plugin trait; the two
//! remote extractors also own the collaborator that does their network I/O.

use crate::Result;
use crate::plugins::ExtractorRegistry;
use std::sync::Arc;

pub mod docx;
pub mod excel;
pub mod html;
pub mod pdf;
pub mod pptx;
pub mod structured;
pub mod text;
pub mod video;
pub mod web;

pub use docx::DocxExtractor;
pub use excel::ExcelExtractor;
pub use html::HtmlExtractor;
pub use pdf::PdfExtractor;
pub use pptx::PptxExtractor;
pub use structured::{CsvExtractor, JsonExtractor, XmlExtractor};
pub use text::PlainTextExtractor;
pub use video::{TranscriptFetcher, VideoTranscriptExtractor, YoutubeTranscriptFetcher};
pub use web::{PageFetcher, ReqwestPageFetcher, WebPageExtractor};

/// Run CPU-bound parsing on the blocking pool, keeping the caller's span.
///
/// A panic inside the closure is re-raised on the calling task so the
/// dispatcher reports it like any other extractor panic.
pub(crate) async fn run_blocking<F>(format: &'static str, parse: F) -> Result<String>
where
    F: FnOnce() -> Result<String> + Send + 'static,
{
    let span = tracing::Span::current();
    match tokio::task::spawn_blocking(move || {
        let _guard = span.entered();
        parse()
    })
    .await
    {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(crate::FlattextError::parsing(format!(
            "{} extraction task failed: {}",
            format, e
        ))),
    }
}

/// Register one built-in extractor per supported format.
///
/// # Example
///
/// ```rust
/// use flattext::extractors::register_default_extractors;
/// use flattext::plugins::ExtractorRegistry;
///
/// # fn main() -> flattext::Result<()> {
/// let mut registry = ExtractorRegistry::new();
/// register_default_extractors(&mut registry)?;
/// assert_eq!(registry.list().len(), 11);
/// # Ok(())
/// # }
/// ```
pub fn register_default_extractors(registry: &mut ExtractorRegistry) -> Result<()> {
    registry.register(Arc::new(PdfExtractor::new()))?;
    registry.register(Arc::new(DocxExtractor::new()))?;
    registry.register(Arc::new(ExcelExtractor::new()))?;
    registry.register(Arc::new(CsvExtractor::new()))?;
    registry.register(Arc::new(PlainTextExtractor::new()))?;
    registry.register(Arc::new(PptxExtractor::new()))?;
    registry.register(Arc::new(HtmlExtractor::new()))?;
    registry.register(Arc::new(XmlExtractor::new()))?;
    registry.register(Arc::new(JsonExtractor::new()))?;
    registry.register(Arc::new(WebPageExtractor::new()))?;
    registry.register(Arc::new(VideoTranscriptExtractor::new()))?;

    Ok(())
}
