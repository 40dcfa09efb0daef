use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct BookRef {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookExists {
    pub exists: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookIds {
    #[serde(rename = "bookIds", default)]
    pub book_ids: Vec<String>,
}

/// Upload target returned by prepareUpload: a signed URL to PUT the PDF
/// bytes to, and the storage URL to record on the book afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct PrepareUpload {
    #[serde(rename = "uploadUrl")]
    pub upload_url: String,
    #[serde(rename = "storageUrl")]
    pub storage_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "bookId")]
    pub book_id: String,
    #[serde(rename = "ownerId")]
    pub owner_id: Option<String>,
    pub title: String,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
    #[serde(rename = "storageUrl")]
    pub storage_url: Option<String>,
    #[serde(rename = "addedAt")]
    pub added_at: Option<String>,
}

impl Book {
    pub fn display_pages(&self) -> String {
        match self.total_pages {
            0 => "unknown length".to_string(),
            1 => "1 page".to_string(),
            n => format!("{} pages", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_row() {
        let json = r#"{"bookId":"b1","ownerId":"u1","title":"Dune","totalPages":412,"storageUrl":"gs://quizread/b1.pdf","addedAt":"2025-11-02T10:15:00Z"}"#;
        let book: Book = serde_json::from_str(json).expect("parse book row");
        assert_eq!(book.book_id, "b1");
        assert_eq!(book.total_pages, 412);
        assert_eq!(book.display_pages(), "412 pages");
    }

    #[test]
    fn test_parse_book_row_partial() {
        // Older rows lack totalPages and addedAt
        let json = r#"{"bookId":"b2","title":"Untitled"}"#;
        let book: Book = serde_json::from_str(json).expect("parse partial book row");
        assert_eq!(book.total_pages, 0);
        assert_eq!(book.display_pages(), "unknown length");
    }
}
