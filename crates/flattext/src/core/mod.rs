//! Core extraction pipeline: configuration, input resolution, classification
//! and dispatch.

pub mod classify;
pub mod config;
pub mod dispatcher;
pub mod resolver;

pub use classify::{classify, classify_file_name, classify_url, supported_extensions};
pub use config::ExtractionConfig;
pub use dispatcher::Dispatcher;
pub use resolver::{Submission, UploadedFile, extract_video_id, resolve};
