//! Shared helpers for OOXML packages (zip containers of XML parts).

use crate::{FlattextError, Result};
use roxmltree::Document;
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub(crate) type Package<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// One `<Relationship>` entry from a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

pub(crate) fn open_package(bytes: &[u8]) -> Result<Package<'_>> {
    match ZipArchive::new(Cursor::new(bytes)) {
        Ok(archive) => Ok(archive),
        Err(zip::result::ZipError::Io(io_err)) => Err(io_err.into()),
        Err(e) => Err(FlattextError::parsing_with_source(
            format!("Failed to read document package (invalid format): {}", e),
            e,
        )),
    }
}

/// Read a part as UTF-8 text. Missing parts yield `Ok(None)`.
pub(crate) fn read_part(archive: &mut Package<'_>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| FlattextError::parsing_with_source(format!("Failed to read {}: {}", name, e), e))?;
    Ok(Some(contents))
}

pub(crate) fn parse_xml_part<'input>(name: &str, xml: &'input str) -> Result<Document<'input>> {
    Document::parse(xml).map_err(|e| FlattextError::parsing_with_source(format!("Failed to parse {}: {}", name, e), e))
}

pub(crate) fn parse_relationships(name: &str, xml: &str) -> Result<Vec<Relationship>> {
    let doc = parse_xml_part(name, xml)?;

    Ok(doc
        .descendants()
        .filter(|node| node.has_tag_name("Relationship"))
        .filter_map(|node| {
            Some(Relationship {
                id: node.attribute("Id")?.to_string(),
                rel_type: node.attribute("Type")?.to_string(),
                target: node.attribute("Target")?.to_string(),
            })
        })
        .collect())
}

/// Resolve a relationship target against the directory of its source part.
///
/// Absolute targets (leading `/`) are package-root relative.
pub(crate) fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
