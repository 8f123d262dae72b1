//! Format classification.
//!
//! Maps an [`ExtractionRequest`] to the [`FormatTag`] that decides which
//! extractor runs. Classification is pure and total: every input yields a tag,
//! and `FormatTag::Unsupported` is an ordinary outcome rather than an error.

use crate::types::{ExtractionRequest, FormatTag};
use once_cell::sync::Lazy;
use reqwest::Url;
use std::collections::HashMap;
use std::path::Path;

/// Extension to format mapping, in the order formats are listed to users.
pub const EXTENSION_TABLE: &[(&str, FormatTag)] = &[
    ("pdf", FormatTag::Pdf),
    ("docx", FormatTag::Word),
    ("xlsx", FormatTag::Excel),
    ("csv", FormatTag::Csv),
    ("txt", FormatTag::Text),
    ("pptx", FormatTag::Pptx),
    ("html", FormatTag::Html),
    ("htm", FormatTag::Html),
    ("xml", FormatTag::Xml),
    ("json", FormatTag::Json),
];

static EXT_TO_FORMAT: Lazy<HashMap<&'static str, FormatTag>> =
    Lazy::new(|| EXTENSION_TABLE.iter().copied().collect());

const VIDEO_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com", "music.youtube.com"];
const SHORT_VIDEO_HOST: &str = "youtu.be";

/// Classify a request.
///
/// # Example
///
/// ```rust
/// use flattext::{ExtractionRequest, FormatTag, core::classify::classify};
///
/// let upload = ExtractionRequest::local_file("report.PDF", b"%PDF-1.5".to_vec());
/// assert_eq!(classify(&upload), FormatTag::Pdf);
///
/// let video = ExtractionRequest::remote_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
/// assert_eq!(classify(&video), FormatTag::VideoTranscript);
/// ```
pub fn classify(request: &ExtractionRequest) -> FormatTag {
    match request {
        ExtractionRequest::LocalFile { name, .. } => classify_file_name(name),
        ExtractionRequest::RemoteUrl(url) => classify_url(url),
    }
}

/// Classify a declared file name by its extension, case-insensitively.
pub fn classify_file_name(name: &str) -> FormatTag {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .and_then(|ext| EXT_TO_FORMAT.get(ext.as_str()).copied())
        .unwrap_or(FormatTag::Unsupported)
}

/// Classify a URL as a video watch link or an ordinary web page.
///
/// Strings that do not parse as URLs classify as web pages; the resolver and
/// the fetcher reject them later with a proper error.
pub fn classify_url(url: &str) -> FormatTag {
    if is_video_url(url) {
        FormatTag::VideoTranscript
    } else {
        FormatTag::Webpage
    }
}

/// Whether the URL points at a video on the supported video host.
pub fn is_video_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return false;
    };

    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();

    if host == SHORT_VIDEO_HOST {
        return parsed.path().len() > 1;
    }

    VIDEO_HOSTS.contains(&host.as_str()) && parsed.path().trim_end_matches('/') == "/watch"
}

/// Extensions accepted for uploaded files.
pub fn supported_extensions() -> Vec<&'static str> {
    EXTENSION_TABLE.iter().map(|(ext, _)| *ext).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_table() {
        let cases = [
            ("a.pdf", FormatTag::Pdf),
            ("a.docx", FormatTag::Word),
            ("a.xlsx", FormatTag::Excel),
            ("a.csv", FormatTag::Csv),
            ("a.txt", FormatTag::Text),
            ("a.pptx", FormatTag::Pptx),
            ("a.html", FormatTag::Html),
            ("a.htm", FormatTag::Html),
            ("a.xml", FormatTag::Xml),
            ("a.json", FormatTag::Json),
        ];
        for (name, expected) in cases {
            assert_eq!(classify_file_name(name), expected, "wrong tag for {}", name);
        }
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(classify_file_name("doc.PDF"), FormatTag::Pdf);
        assert_eq!(classify_file_name("doc.pdf"), FormatTag::Pdf);
        assert_eq!(classify_file_name("Sheet.XlSx"), FormatTag::Excel);
    }

    #[test]
    fn test_unknown_and_missing_extensions_are_unsupported() {
        assert_eq!(classify_file_name("archive.zip"), FormatTag::Unsupported);
        assert_eq!(classify_file_name("legacy.doc"), FormatTag::Unsupported);
        assert_eq!(classify_file_name("README"), FormatTag::Unsupported);
        assert_eq!(classify_file_name(".pdf"), FormatTag::Unsupported);
        assert_eq!(classify_file_name(""), FormatTag::Unsupported);
    }

    #[test]
    fn test_only_last_extension_counts() {
        assert_eq!(classify_file_name("report.pdf.zip"), FormatTag::Unsupported);
        assert_eq!(classify_file_name("backup.zip.json"), FormatTag::Json);
    }

    #[test]
    fn test_video_urls() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?v=dQw4w9WgXcQ&t=42",
            "http://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtube.com/watch?x=1",
        ] {
            assert_eq!(classify_url(url), FormatTag::VideoTranscript, "{}", url);
        }
    }

    #[test]
    fn test_web_page_urls() {
        for url in [
            "https://example.com/",
            "https://www.youtube.com/",
            "https://www.youtube.com/channel/abc",
            "https://notyoutube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/",
            "not a url",
            "",
        ] {
            assert_eq!(classify_url(url), FormatTag::Webpage, "{}", url);
        }
    }

    #[test]
    fn test_classify_is_deterministic() {
        let request = ExtractionRequest::local_file("notes.TXT", b"hi".to_vec());
        assert_eq!(classify(&request), classify(&request));
        assert_eq!(classify(&request), FormatTag::Text);
    }

    #[test]
    fn test_supported_extensions_lists_table() {
        let exts = supported_extensions();
        assert_eq!(exts.first(), Some(&"pdf"));
        assert!(exts.contains(&"htm"));
        assert_eq!(exts.len(), EXTENSION_TABLE.len());
    }
}
