//! XML text extraction using `roxmltree`.
//!
//! Each element contributes its leading text (the text before its first child
//! element), in document order. Comments and processing instructions inside
//! that leading run are stepped over, so `<a><!-- c -->x</a>` yields `x`.
//! Tail text after a child element is not attributed to any element and is
//! skipped.

use crate::{FlattextError, Result};
use roxmltree::{Document, Node, ParsingOptions};

/// Extract element text from an XML document, joined with single spaces.
///
/// ```rust
/// use flattext::extraction::xml::extract_xml_text;
///
/// let text = extract_xml_text(b"<r><a>one</a><b> two </b><c/></r>").unwrap();
/// assert_eq!(text, "one two");
/// ```
pub fn extract_xml_text(xml_bytes: &[u8]) -> Result<String> {
    let xml = std::str::from_utf8(xml_bytes)
        .map_err(|e| FlattextError::parsing_with_source(format!("XML is not valid UTF-8: {}", e), e))?;

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)
        .map_err(|e| FlattextError::parsing_with_source(format!("Failed to parse XML: {}", e), e))?;

    let texts: Vec<String> = doc
        .descendants()
        .filter(|node| node.is_element())
        .map(leading_text)
        .filter_map(|text| {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect();

    Ok(texts.join(" "))
}

/// Text children of `element` up to its first child element.
fn leading_text(element: Node<'_, '_>) -> String {
    let mut text = String::new();
    for child in element.children() {
        if child.is_element() {
            break;
        }
        if child.is_text()
            && let Some(value) = child.text()
        {
            text.push_str(value);
        }
    }
    text
}
