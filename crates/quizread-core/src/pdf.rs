//! PDF inspection for the upload flow.
//!
//! The backend needs the page count when a book is added; it is extracted
//! locally before the file ever leaves the machine.

use std::path::Path;

use anyhow::{Context, Result};

/// Number of pages in the document.
///
/// Fails with a descriptive error when the bytes are not a parseable PDF.
pub fn page_count(bytes: &[u8]) -> Result<u32> {
    let document = lopdf::Document::load_mem(bytes)
        .context("Failed to extract page count: not a parseable PDF")?;
    Ok(document.get_pages().len() as u32)
}

/// Cheap pre-check on the file name before reading anything.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Document, Object, Stream};
    use std::path::PathBuf;

    /// Build a minimal n-page document in memory.
    fn pdf_with_pages(n: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = (0..n)
            .map(|_| {
                let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
                let page_id = doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "Contents" => content_id,
                });
                page_id.into()
            })
            .collect();

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => n as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("serialize test pdf");
        buf
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(&pdf_with_pages(1)).expect("one page"), 1);
        assert_eq!(page_count(&pdf_with_pages(3)).expect("three pages"), 3);
    }

    #[test]
    fn test_page_count_rejects_garbage() {
        let err = page_count(b"definitely not a pdf").expect_err("must fail");
        assert!(err.to_string().contains("page count"));
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(&PathBuf::from("book.pdf")));
        assert!(is_pdf(&PathBuf::from("BOOK.PDF")));
        assert!(!is_pdf(&PathBuf::from("book.epub")));
        assert!(!is_pdf(&PathBuf::from("book")));
    }
}
