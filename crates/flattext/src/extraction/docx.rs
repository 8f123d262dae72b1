//! Word (.docx) text extraction.
//!
//! Reads the main document part and flattens it paragraph by paragraph, in
//! document order. Empty paragraphs are kept as empty strings so the
//! paragraph count is preserved in the joined output.
//!
//! The walk deliberately goes beyond top-level body paragraphs: paragraphs
//! inside table cells and block content controls (`w:sdt`) are included
//! where they sit in the body, so text typed into tables or form fields is
//! not silently lost.

use crate::extraction::package::{
    Package, open_package, parse_relationships, parse_xml_part, read_part, resolve_target,
};
use crate::{FlattextError, Result};
use roxmltree::Node;

const DEFAULT_MAIN_PART: &str = "word/document.xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// Extract paragraph text from a .docx file, joined with single spaces.
///
/// ```rust
/// use flattext::extraction::docx::extract_docx_text;
///
/// // Anything that is not a zip package is a parse error.
/// assert!(extract_docx_text(b"not a docx").is_err());
/// ```
pub fn extract_docx_text(docx_bytes: &[u8]) -> Result<String> {
    let paragraphs = extract_paragraphs(docx_bytes)?;
    Ok(paragraphs.join(" "))
}

/// Extract the text of every paragraph, in document order.
pub fn extract_paragraphs(docx_bytes: &[u8]) -> Result<Vec<String>> {
    let mut archive = open_package(docx_bytes)?;

    let main_part = find_main_part(&mut archive)?;
    let xml = read_part(&mut archive, &main_part)?.ok_or_else(|| {
        FlattextError::parsing(format!("Word document is missing its main part '{}'", main_part))
    })?;

    let doc = parse_xml_part(&main_part, &xml)?;

    let body = doc
        .root_element()
        .children()
        .find(|node| node.has_tag_name("body"))
        .ok_or_else(|| FlattextError::parsing("Word document has no body element"))?;

    let mut paragraphs = Vec::new();
    collect_block_paragraphs(body, &mut paragraphs);
    Ok(paragraphs)
}

fn find_main_part(archive: &mut Package<'_>) -> Result<String> {
    if let Some(rels_xml) = read_part(archive, "_rels/.rels")?
        && let Ok(rels) = parse_relationships("_rels/.rels", &rels_xml)
        && let Some(rel) = rels.iter().find(|rel| rel.rel_type.ends_with(OFFICE_DOCUMENT_REL))
    {
        return Ok(resolve_target("", &rel.target));
    }

    Ok(DEFAULT_MAIN_PART.to_string())
}

/// Walk block-level content (body, table cell, content control).
fn collect_block_paragraphs(container: Node, paragraphs: &mut Vec<String>) {
    for child in container.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "p" => paragraphs.push(paragraph_text(child)),
            "tbl" => {
                for row in child.children().filter(|n| n.has_tag_name("tr")) {
                    for cell in row.children().filter(|n| n.has_tag_name("tc")) {
                        collect_block_paragraphs(cell, paragraphs);
                    }
                }
            }
            "sdt" => {
                if let Some(content) = child.children().find(|n| n.has_tag_name("sdtContent")) {
                    collect_block_paragraphs(content, paragraphs);
                }
            }
            _ => {}
        }
    }
}

fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    collect_run_text(paragraph, &mut text);
    text
}

fn collect_run_text(node: Node, out: &mut String) {
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            // Property subtrees hold tab stops and styling, not content.
            "pPr" | "rPr" => {}
            "t" => {
                if let Some(text) = child.text() {
                    out.push_str(text);
                }
            }
            "tab" => out.push('\t'),
            "br" | "cr" => out.push('\n'),
            _ => collect_run_text(child, out),
        }
    }
}
