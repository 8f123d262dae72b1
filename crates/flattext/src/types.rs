//! Core request and result shapes shared by every stage of extraction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FlattextError;

/// One document or URL to be flattened into text.
///
/// Built once per incoming call by the resolver and consumed by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionRequest {
    /// Uploaded file content with the name the caller declared for it.
    LocalFile { bytes: Vec<u8>, name: String },
    /// An absolute http(s) URL pointing at a web page or a video.
    RemoteUrl(String),
}

impl ExtractionRequest {
    pub fn local_file(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::LocalFile {
            bytes: bytes.into(),
            name: name.into(),
        }
    }

    pub fn remote_url(url: impl Into<String>) -> Self {
        Self::RemoteUrl(url.into())
    }

    /// Short description used in log lines.
    pub fn describe(&self) -> String {
        match self {
            Self::LocalFile { bytes, name } => format!("file '{}' ({} bytes)", name, bytes.len()),
            Self::RemoteUrl(url) => format!("url '{}'", url),
        }
    }
}

/// Which extraction strategy applies to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    Pdf,
    Word,
    Excel,
    Csv,
    Text,
    Pptx,
    Html,
    Xml,
    Json,
    Webpage,
    VideoTranscript,
    Unsupported,
}

impl FormatTag {
    /// Every tag that has an extraction strategy, in table order.
    pub const SUPPORTED: [FormatTag; 11] = [
        FormatTag::Pdf,
        FormatTag::Word,
        FormatTag::Excel,
        FormatTag::Csv,
        FormatTag::Text,
        FormatTag::Pptx,
        FormatTag::Html,
        FormatTag::Xml,
        FormatTag::Json,
        FormatTag::Webpage,
        FormatTag::VideoTranscript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Pdf => "pdf",
            FormatTag::Word => "word",
            FormatTag::Excel => "excel",
            FormatTag::Csv => "csv",
            FormatTag::Text => "text",
            FormatTag::Pptx => "pptx",
            FormatTag::Html => "html",
            FormatTag::Xml => "xml",
            FormatTag::Json => "json",
            FormatTag::Webpage => "webpage",
            FormatTag::VideoTranscript => "video_transcript",
            FormatTag::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure categories reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidInput,
    UnsupportedFormat,
    ExtractionError,
    NetworkError,
    TranscriptUnavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::UnsupportedFormat => "UnsupportedFormat",
            ErrorKind::ExtractionError => "ExtractionError",
            ErrorKind::NetworkError => "NetworkError",
            ErrorKind::TranscriptUnavailable => "TranscriptUnavailable",
        }
    }

    /// Client errors are the caller's fault; everything else is on the server side.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorKind::InvalidInput | ErrorKind::UnsupportedFormat)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one extraction. Exactly one variant is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionResult {
    Success { text: String },
    Failure { kind: ErrorKind, detail: String },
}

impl ExtractionResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn failure(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            detail: detail.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text } => Some(text),
            Self::Failure { .. } => None,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<FlattextError> for ExtractionResult {
    fn from(err: FlattextError) -> Self {
        Self::failure(err.kind(), err.detail())
    }
}

/// One timed caption line of a video transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    pub duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_with_status_tag() {
        let ok = serde_json::to_value(ExtractionResult::success("hello")).unwrap();
        assert_eq!(ok, serde_json::json!({"status": "success", "text": "hello"}));

        let failed = serde_json::to_value(ExtractionResult::failure(
            ErrorKind::UnsupportedFormat,
            "Unsupported filetype",
        ))
        .unwrap();
        assert_eq!(
            failed,
            serde_json::json!({"status": "failure", "kind": "UnsupportedFormat", "detail": "Unsupported filetype"})
        );
    }

    #[test]
    fn test_result_from_error_keeps_detail() {
        let result: ExtractionResult = FlattextError::validation("No file or URL provided").into();
        assert_eq!(
            result,
            ExtractionResult::failure(ErrorKind::InvalidInput, "No file or URL provided")
        );
        assert!(result.text().is_none());
    }

    #[test]
    fn test_supported_tags_exclude_unsupported() {
        assert!(!FormatTag::SUPPORTED.contains(&FormatTag::Unsupported));
        assert_eq!(FormatTag::SUPPORTED.len(), 11);
    }

    #[test]
    fn test_client_error_kinds() {
        assert!(ErrorKind::InvalidInput.is_client_error());
        assert!(ErrorKind::UnsupportedFormat.is_client_error());
        assert!(!ErrorKind::NetworkError.is_client_error());
        assert!(!ErrorKind::TranscriptUnavailable.is_client_error());
    }
}
