//! Flattext - document and web content to plain text
//!
//! Flattext accepts an uploaded document or a URL, decides which extraction
//! strategy applies, and returns normalized text or a categorized failure.
//!
//! # Quick Start
//!
//! ```rust
//! use flattext::{Dispatcher, ExtractionResult, Submission};
//!
//! # tokio_test::block_on(async {
//! let dispatcher = Dispatcher::with_defaults().unwrap();
//!
//! let result = dispatcher
//!     .resolve_and_dispatch(Submission::with_file("data.json", br#"{"b": 2, "a": 1}"#.to_vec()))
//!     .await;
//! assert_eq!(result, ExtractionResult::success(r#"{"b":2,"a":1}"#));
//! # });
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): source resolution, format classification, dispatch, config loading
//! - **Plugin System** (`plugins`): extractor traits and the format registry
//! - **Extraction** (`extraction`): synchronous per-format parsing
//! - **Extractors** (`extractors`): built-in plugins, including the web page and transcript fetchers
//! - **API** (`api`, feature `api`): HTTP front end
//!
//! # Supported inputs
//!
//! Uploads: `.pdf`, `.docx`, `.xlsx`, `.csv`, `.txt`, `.pptx`, `.html`/`.htm`,
//! `.xml`, `.json`. URLs: any http(s) page, plus video watch links, for which
//! the caption transcript is returned.

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod plugins;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use error::{FlattextError, Result};
pub use types::{ErrorKind, ExtractionRequest, ExtractionResult, FormatTag, TranscriptEntry};

pub use core::classify::{classify, classify_file_name, classify_url, supported_extensions};
pub use core::config::ExtractionConfig;
pub use core::dispatcher::Dispatcher;
pub use core::resolver::{Submission, UploadedFile, extract_video_id, resolve};

pub use plugins::{DocumentExtractor, ExtractionInput, ExtractorRegistry, Plugin};
