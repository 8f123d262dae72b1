//! PowerPoint (.pptx) text extraction.
//!
//! Slides are read in presentation order. On each slide the shape tree is
//! walked in z-order; every shape that carries a text body contributes its
//! paragraphs joined by newlines.
//!
//! Group shapes are deliberately descended into, so text in grouped shapes
//! is extracted rather than dropped along with the group. Pictures and
//! other shapes without a text body contribute nothing.

use crate::extraction::package::{
    Package, open_package, parse_relationships, parse_xml_part, read_part, resolve_target,
};
use crate::{FlattextError, Result};
use roxmltree::Node;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";
const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Extract shape text from a .pptx file, joined with single spaces.
pub fn extract_pptx_text(pptx_bytes: &[u8]) -> Result<String> {
    let mut archive = open_package(pptx_bytes)?;

    let slide_paths = slide_paths(&mut archive)?;
    if slide_paths.is_empty() && archive.by_name(PRESENTATION_PART).is_err() {
        return Err(FlattextError::parsing("Presentation is missing ppt/presentation.xml"));
    }

    let mut shape_texts = Vec::new();
    for path in &slide_paths {
        let xml = read_part(&mut archive, path)?
            .ok_or_else(|| FlattextError::parsing(format!("Presentation references missing slide '{}'", path)))?;
        let doc = parse_xml_part(path, &xml)?;

        if let Some(tree) = doc.descendants().find(|n| n.has_tag_name("spTree")) {
            collect_shape_texts(tree, &mut shape_texts);
        }
    }

    tracing::debug!(
        "Extracted {} text shape(s) from {} slide(s)",
        shape_texts.len(),
        slide_paths.len()
    );

    Ok(shape_texts.join(" "))
}

/// Slide part paths in presentation order.
///
/// Order comes from `p:sldIdLst` resolved through the presentation
/// relationships. When that cannot be read, slide parts are sorted by number.
fn slide_paths(archive: &mut Package<'_>) -> Result<Vec<String>> {
    if let Some(paths) = ordered_slide_paths(archive)? {
        return Ok(paths);
    }

    let mut numbered: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse::<u32>()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    numbered.sort_unstable_by_key(|(number, _)| *number);

    Ok(numbered.into_iter().map(|(_, name)| name).collect())
}

fn ordered_slide_paths(archive: &mut Package<'_>) -> Result<Option<Vec<String>>> {
    let Some(presentation_xml) = read_part(archive, PRESENTATION_PART)? else {
        return Ok(None);
    };
    let Some(rels_xml) = read_part(archive, PRESENTATION_RELS)? else {
        return Ok(None);
    };

    let presentation = parse_xml_part(PRESENTATION_PART, &presentation_xml)?;
    let rels = parse_relationships(PRESENTATION_RELS, &rels_xml)?;

    let Some(id_list) = presentation.descendants().find(|n| n.has_tag_name("sldIdLst")) else {
        return Ok(None);
    };

    let paths = id_list
        .children()
        .filter(|n| n.has_tag_name("sldId"))
        .filter_map(|n| n.attribute((RELATIONSHIPS_NS, "id")))
        .filter_map(|rel_id| rels.iter().find(|rel| rel.id == rel_id))
        .map(|rel| resolve_target("ppt", &rel.target))
        .collect();

    Ok(Some(paths))
}

fn collect_shape_texts(container: Node, out: &mut Vec<String>) {
    for shape in container.children().filter(Node::is_element) {
        match shape.tag_name().name() {
            "sp" => {
                if let Some(body) = shape.children().find(|n| n.has_tag_name("txBody")) {
                    out.push(text_body(body));
                }
            }
            "grpSp" => collect_shape_texts(shape, out),
            _ => {}
        }
    }
}

fn text_body(body: Node) -> String {
    body.children()
        .filter(|n| n.has_tag_name("p"))
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    for child in paragraph.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "r" | "fld" => {
                if let Some(t) = child.children().find(|n| n.has_tag_name("t"))
                    && let Some(value) = t.text()
                {
                    text.push_str(value);
                }
            }
            "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}
