//! Source resolution.
//!
//! Turns what a caller submitted (an uploaded file, a URL, both or neither)
//! into a single [`ExtractionRequest`]. Validation of the submission happens
//! here, before any classification.

use crate::types::ExtractionRequest;
use crate::{FlattextError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

static VIDEO_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Video id regex pattern is valid and should compile"));

/// A file part of a caller submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Raw caller input, mirroring a form with optional `file` and `url` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub file: Option<UploadedFile>,
    pub url: Option<String>,
}

impl Submission {
    pub fn with_file(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file: Some(UploadedFile::new(name, bytes)),
            url: None,
        }
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            file: None,
            url: Some(url.into()),
        }
    }
}

/// Build the extraction request for a submission.
///
/// A file takes precedence over a URL when both are present.
///
/// # Errors
///
/// Returns a `Validation` error (reported as `InvalidInput`) when:
/// - the uploaded file has an empty name
/// - neither a file nor a non-empty URL was submitted
/// - the URL is not an absolute http(s) URL
///
/// # Example
///
/// ```rust
/// use flattext::core::resolver::{Submission, resolve};
/// use flattext::ExtractionRequest;
///
/// let request = resolve(Submission::with_url("https://example.com/about")).unwrap();
/// assert_eq!(request, ExtractionRequest::remote_url("https://example.com/about"));
///
/// let err = resolve(Submission::default()).unwrap_err();
/// assert_eq!(err.detail(), "No file or URL provided");
/// ```
pub fn resolve(submission: Submission) -> Result<ExtractionRequest> {
    let Submission { file, url } = submission;

    if let Some(file) = file {
        if file.name.is_empty() {
            return Err(FlattextError::validation("No selected file"));
        }
        return Ok(ExtractionRequest::LocalFile {
            bytes: file.bytes,
            name: file.name,
        });
    }

    let url = url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| FlattextError::validation("No file or URL provided"))?;

    validate_url(&url)?;

    Ok(ExtractionRequest::RemoteUrl(url))
}

fn validate_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url).map_err(|e| FlattextError::validation(format!("Invalid URL '{}': {}", url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FlattextError::validation(format!(
            "Invalid URL '{}': only http and https are supported",
            url
        )));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(FlattextError::validation(format!("Invalid URL '{}': missing host", url)));
    }

    Ok(())
}

/// Pull the video identifier out of a video-hosting URL.
///
/// Watch links carry the id in the `v` query parameter, which ends at the next
/// `&`. Short links carry it as the first path segment. Returns `None` when no
/// well-formed id is present.
///
/// ```rust
/// use flattext::core::resolver::extract_video_id;
///
/// assert_eq!(
///     extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").as_deref(),
///     Some("dQw4w9WgXcQ")
/// );
/// assert_eq!(extract_video_id("https://youtube.com/watch?x=1"), None);
/// ```
pub fn extract_video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();

    let candidate = if host == "youtu.be" {
        parsed.path_segments()?.next()?.to_string()
    } else {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?
    };

    VIDEO_ID_PATTERN.is_match(&candidate).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;

    #[test]
    fn test_file_submission() {
        let request = resolve(Submission::with_file("a.csv", b"a,b".to_vec())).unwrap();
        assert_eq!(request, ExtractionRequest::local_file("a.csv", b"a,b".to_vec()));
    }

    #[test]
    fn test_file_with_empty_name_is_invalid() {
        let err = resolve(Submission::with_file("", b"data".to_vec())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.detail(), "No selected file");
    }

    #[test]
    fn test_empty_submission_is_invalid() {
        let err = resolve(Submission::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.detail(), "No file or URL provided");

        let err = resolve(Submission::with_url("   ")).unwrap_err();
        assert_eq!(err.detail(), "No file or URL provided");
    }

    #[test]
    fn test_file_takes_precedence_over_url() {
        let submission = Submission {
            file: Some(UploadedFile::new("notes.txt", b"hi".to_vec())),
            url: Some("https://example.com".to_string()),
        };
        let request = resolve(submission).unwrap();
        assert!(matches!(request, ExtractionRequest::LocalFile { .. }));
    }

    #[test]
    fn test_url_is_trimmed() {
        let request = resolve(Submission::with_url("  https://example.com/page \n")).unwrap();
        assert_eq!(request, ExtractionRequest::remote_url("https://example.com/page"));
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        for url in ["not a url", "ftp://example.com/file", "file:///etc/passwd", "mailto:a@b.c"] {
            let err = resolve(Submission::with_url(url)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{} should be rejected", url);
        }
    }

    #[test]
    fn test_extract_video_id_stops_at_next_parameter() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL123&t=5").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_extract_video_id_short_link() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=10").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_extract_video_id_rejects_malformed_ids() {
        assert_eq!(extract_video_id("https://youtube.com/watch?x=1"), None);
        assert_eq!(extract_video_id("https://youtube.com/watch?v="), None);
        assert_eq!(extract_video_id("https://youtube.com/watch?v=short"), None);
        assert_eq!(extract_video_id("https://youtube.com/watch?v=has%20space1"), None);
        assert_eq!(extract_video_id("garbage"), None);
    }
}
