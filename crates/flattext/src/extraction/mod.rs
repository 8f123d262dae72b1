//! Format-specific text extraction.
//!
//! Each submodule turns raw document bytes into a flat string. These are plain
//! synchronous functions; the async plugin wrappers live in [`crate::extractors`].

pub mod csv;
pub mod docx;
pub mod excel;
pub mod html;
pub mod json;
pub mod pdf;
pub mod pptx;
pub mod text;
pub mod transcript;
pub mod xml;

pub(crate) mod package;

pub use csv::extract_csv_text;
pub use docx::extract_docx_text;
pub use excel::extract_excel_text;
pub use html::{extract_html_bytes, extract_html_text};
pub use json::normalize_json;
pub use pdf::extract_pdf_text;
pub use pptx::extract_pptx_text;
pub use text::decode_text;
pub use transcript::{CaptionTrack, parse_caption_tracks, parse_innertube_api_key, parse_timed_text, select_track};
pub use xml::extract_xml_text;
