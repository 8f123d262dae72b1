//! Error types for flattext.
//!
//! Every fallible operation in the library returns [`FlattextError`]. Errors are
//! grouped by where they come from, and each group maps onto exactly one
//! [`ErrorKind`] once it reaches the dispatcher:
//!
//! - `Validation` - the caller's submission was malformed (no file, empty name, bad URL)
//! - `UnsupportedFormat` - the input classified to a format nothing can extract
//! - `Parsing` / `Io` - an underlying parser rejected the content
//! - `Network` - a remote fetch failed (unreachable, non-2xx, timeout)
//! - `TranscriptUnavailable` - the video has no usable captions, or no id could be parsed
//!
//! # Example
//!
//! ```rust
//! use flattext::{ErrorKind, FlattextError, Result};
//!
//! fn require_name(name: &str) -> Result<&str> {
//!     if name.is_empty() {
//!         return Err(FlattextError::validation("No selected file"));
//!     }
//!     Ok(name)
//! }
//!
//! let err = require_name("").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidInput);
//! assert_eq!(err.detail(), "No selected file");
//! ```
use thiserror::Error;

use crate::types::ErrorKind;

/// Result type alias using `FlattextError`.
pub type Result<T> = std::result::Result<T, FlattextError>;

/// Main error type for all flattext operations.
#[derive(Debug, Error)]
pub enum FlattextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Transcript unavailable: {message}")]
    TranscriptUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Plugin error in '{plugin_name}': {message}")]
    Plugin { message: String, plugin_name: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for FlattextError {
    fn from(err: serde_json::Error) -> Self {
        FlattextError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<calamine::XlsxError> for FlattextError {
    fn from(err: calamine::XlsxError) -> Self {
        FlattextError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<zip::result::ZipError> for FlattextError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io_err) => FlattextError::Io(io_err),
            other => FlattextError::Parsing {
                message: format!("Invalid archive: {}", other),
                source: Some(Box::new(other)),
            },
        }
    }
}

impl From<csv::Error> for FlattextError {
    fn from(err: csv::Error) -> Self {
        FlattextError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<lopdf::Error> for FlattextError {
    fn from(err: lopdf::Error) -> Self {
        FlattextError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl FlattextError {
    error_constructor!(parsing, Parsing);
    error_constructor!(validation, Validation);
    error_constructor!(network, Network);
    error_constructor!(transcript_unavailable, TranscriptUnavailable);

    /// The uniform failure category this error reports as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlattextError::Validation { .. } => ErrorKind::InvalidInput,
            FlattextError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            FlattextError::Network { .. } => ErrorKind::NetworkError,
            FlattextError::TranscriptUnavailable { .. } => ErrorKind::TranscriptUnavailable,
            FlattextError::Io(_)
            | FlattextError::Parsing { .. }
            | FlattextError::Plugin { .. }
            | FlattextError::Other(_) => ErrorKind::ExtractionError,
        }
    }

    /// Human-readable message without the category prefix used by `Display`.
    pub fn detail(&self) -> String {
        match self {
            FlattextError::Io(err) => err.to_string(),
            FlattextError::Parsing { message, .. }
            | FlattextError::Validation { message, .. }
            | FlattextError::Network { message, .. }
            | FlattextError::TranscriptUnavailable { message, .. }
            | FlattextError::Plugin { message, .. } => message.clone(),
            FlattextError::UnsupportedFormat(message) | FlattextError::Other(message) => message.clone(),
        }
    }
}
