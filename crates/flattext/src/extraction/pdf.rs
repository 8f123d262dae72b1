//! PDF text extraction using `lopdf`.
//!
//! Pages are read in page-tree order. Each page's reported text is trimmed and
//! the pages are joined with a single space; no page-break marker survives.

use crate::{FlattextError, Result};
use lopdf::Document;

/// Extract the text of every page of an in-memory PDF.
///
/// # Errors
///
/// Returns `FlattextError::Parsing` when the document cannot be loaded or any
/// page's content stream cannot be decoded. No partial text is returned.
pub fn extract_pdf_text(pdf_bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(pdf_bytes)
        .map_err(|e| FlattextError::parsing_with_source(format!("Failed to load PDF: {}", e), e))?;

    let pages = document.get_pages();
    let mut page_texts = Vec::with_capacity(pages.len());

    for page_number in pages.keys() {
        let text = document.extract_text(&[*page_number]).map_err(|e| {
            FlattextError::parsing_with_source(format!("Failed to extract text from page {}: {}", page_number, e), e)
        })?;
        page_texts.push(text.trim().to_string());
    }

    tracing::debug!("Extracted text from {} PDF page(s)", page_texts.len());

    Ok(page_texts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    /// Build a PDF with one page per entry, each showing the given line.
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_single_page() {
        let pdf = build_pdf(&["Hello PDF"]);
        let text = extract_pdf_text(&pdf).unwrap();
        assert!(text.contains("Hello PDF"), "unexpected text: {:?}", text);
    }

    #[test]
    fn test_pages_in_order_joined_with_space() {
        let pdf = build_pdf(&["First", "Second", "Third"]);
        let text = extract_pdf_text(&pdf).unwrap();

        let first = text.find("First").unwrap();
        let second = text.find("Second").unwrap();
        let third = text.find("Third").unwrap();
        assert!(first < second && second < third, "page order lost: {:?}", text);
        assert!(!text.contains('\n'), "page breaks must not survive: {:?}", text);
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = extract_pdf_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, FlattextError::Parsing { .. }));
        assert!(err.detail().contains("Failed to load PDF"));
    }
}
