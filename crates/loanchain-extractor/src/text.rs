//! PDF text extraction
//!
//! Flattens a paginated document into one plain-text buffer. Pages are read
//! in page-number order, text inside a page is joined by single spaces, and
//! pages are joined by newlines. Pages past the cap are dropped silently.

use crate::error::ExtractorError;
use lopdf::Document;
use std::path::Path;
use tracing::{debug, warn};

/// Reads page text from PDF documents
#[derive(Debug, Clone, Copy)]
pub struct TextExtractor {
    page_cap: usize,
}

impl TextExtractor {
    /// Create an extractor that reads at most `page_cap` pages
    pub fn new(page_cap: usize) -> Self {
        Self { page_cap }
    }

    /// Extract text from a PDF file on disk
    pub fn extract_from_path(&self, path: &Path) -> Result<String, ExtractorError> {
        let bytes = std::fs::read(path).map_err(|e| {
            ExtractorError::DocumentUnreadable(format!("failed to read {}: {}", path.display(), e))
        })?;
        self.extract_from_bytes(&bytes)
    }

    /// Extract text from PDF bytes
    ///
    /// # Errors
    ///
    /// Returns `DocumentUnreadable` if the bytes are not a PDF, the PDF is
    /// corrupt, or it is password-protected. A page whose text cannot be
    /// decoded contributes an empty line instead of failing the document.
    pub fn extract_from_bytes(&self, bytes: &[u8]) -> Result<String, ExtractorError> {
        let mut document = Document::load_mem(bytes)
            .map_err(|e| ExtractorError::DocumentUnreadable(format!("failed to load PDF: {}", e)))?;

        // Unprotected-but-encrypted PDFs open with the empty password
        if document.is_encrypted() && document.decrypt("").is_err() {
            return Err(ExtractorError::DocumentUnreadable(
                "cannot decrypt password-protected PDF".to_string(),
            ));
        }

        document.decompress();

        let pages = document.get_pages();
        let page_count = pages.len();
        let selected: Vec<u32> = pages.keys().copied().take(self.page_cap).collect();

        if page_count > selected.len() {
            debug!("Reading {} of {} pages", selected.len(), page_count);
        }

        let mut buffer = String::new();
        for (idx, page_number) in selected.iter().enumerate() {
            if idx > 0 {
                buffer.push('\n');
            }
            match document.extract_text(&[*page_number]) {
                Ok(raw) => buffer.push_str(&normalize_page_whitespace(&raw)),
                Err(e) => warn!("Skipping text of page {}: {}", page_number, e),
            }
        }

        debug!("Extracted {} chars from {} pages", buffer.len(), selected.len());
        Ok(buffer)
    }
}

/// Normalize the whitespace of one page
///
/// Items are joined by single spaces, and whitespace runs inside an item
/// (line breaks, tabs, repeated spaces) collapse to one space as well.
fn normalize_page_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Build an in-memory PDF with one page per entry, each entry a list of
    /// separately drawn text items
    pub(crate) fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
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

        let mut kids: Vec<Object> = Vec::new();
        for items in pages {
            // One text object per item, stacked down the page
            let mut operations = Vec::new();
            for (idx, item) in items.iter().enumerate() {
                let y = 750 - 14 * idx as i64;
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
                operations.push(Operation::new("Td", vec![50.into(), y.into()]));
                operations.push(Operation::new("Tj", vec![Object::string_literal(*item)]));
                operations.push(Operation::new("ET", vec![]));
            }

            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::build_pdf;
    use super::*;

    #[test]
    fn test_page_whitespace_collapses() {
        assert_eq!(
            normalize_page_whitespace("  Borrower:\n Acme\t\tCorp \n"),
            "Borrower: Acme Corp"
        );
        assert_eq!(normalize_page_whitespace(""), "");
    }

    #[test]
    fn test_whitespace_inside_one_item_collapses() {
        let pdf = build_pdf(&[&["Acme     Industrial", "Corp"]]);
        let text = TextExtractor::new(50).extract_from_bytes(&pdf).unwrap();

        assert!(text.contains("Acme Industrial"));
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_extracts_pages_in_order() {
        let pdf = build_pdf(&[&["Credit", "Agreement"], &["Borrower"]]);
        let text = TextExtractor::new(50).extract_from_bytes(&pdf).unwrap();

        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Credit"));
        assert!(lines[0].contains("Agreement"));
        assert!(lines[1].contains("Borrower"));
    }

    #[test]
    fn test_page_cap_truncates_silently() {
        let pdf = build_pdf(&[&["PageOne"], &["PageTwo"], &["PageThree"]]);
        let text = TextExtractor::new(2).extract_from_bytes(&pdf).unwrap();

        assert!(text.contains("PageOne"));
        assert!(text.contains("PageTwo"));
        assert!(!text.contains("PageThree"));
    }

    #[test]
    fn test_garbage_bytes_are_unreadable() {
        let result = TextExtractor::new(50).extract_from_bytes(b"this is not a pdf at all");
        assert!(matches!(result, Err(ExtractorError::DocumentUnreadable(_))));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let result = TextExtractor::new(50).extract_from_path(Path::new("/nonexistent/agreement.pdf"));
        assert!(matches!(result, Err(ExtractorError::DocumentUnreadable(_))));
    }
}
