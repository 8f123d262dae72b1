//! HTML visible-text extraction using `scraper`.
//!
//! Text nodes are visited in document order. Nodes under `script`, `style`
//! and `template` are skipped; everything else, including `<title>` and
//! `<noscript>` content, is whitespace-collapsed and kept when non-empty.

use crate::{FlattextError, Result};
use scraper::{Html, Node};

/// Elements whose text is code or inert markup rather than document text.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Extract visible text from an HTML document held in memory as bytes.
///
/// The bytes must be UTF-8.
pub fn extract_html_bytes(html_bytes: &[u8]) -> Result<String> {
    let html = std::str::from_utf8(html_bytes)
        .map_err(|e| FlattextError::parsing_with_source(format!("HTML is not valid UTF-8: {}", e), e))?;
    Ok(extract_html_text(html))
}

/// Extract visible text from an HTML string, joined with single spaces.
///
/// HTML parsing never fails; malformed markup is repaired the way browsers do.
///
/// ```rust
/// use flattext::extraction::html::extract_html_text;
///
/// let html = "<html><head><title>T</title></head><body><p>Hi   there</p><script>x()</script></body></html>";
/// assert_eq!(extract_html_text(html), "T Hi there");
/// ```
pub fn extract_html_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut pieces = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            pieces.push(collapsed);
        }
    }

    pieces.join(" ")
}
