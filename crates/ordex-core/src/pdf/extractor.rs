//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{DocumentSource, Result};
use crate::error::PdfError;

/// PDF-backed document source. The whole text stream is pulled once at
/// load time; pages are served as line windows over it, since
/// pdf-extract emits a single stream for the document.
pub struct PdfExtractor {
    page_count: usize,
    full_text: String,
}

impl PdfExtractor {
    /// Load a PDF from bytes and extract its text.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty-password encryption
        let raw = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let full_text = pdf_extract::extract_text_from_mem(&raw)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        debug!(
            "loaded PDF: {} pages, {} chars of text",
            page_count,
            full_text.len()
        );

        Ok(Self {
            page_count,
            full_text,
        })
    }
}

impl DocumentSource for PdfExtractor {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, index: usize) -> Result<Option<String>> {
        if index >= self.page_count {
            return Err(PdfError::InvalidPage(index));
        }

        let lines: Vec<&str> = self.full_text.lines().collect();
        let per_page = lines.len() / self.page_count;
        if per_page == 0 {
            // Too little text to split; attribute all of it to page 0.
            return Ok(if index == 0 && !self.full_text.trim().is_empty() {
                Some(self.full_text.clone())
            } else {
                None
            });
        }

        let start = index * per_page;
        let end = if index + 1 == self.page_count {
            lines.len()
        } else {
            (index + 1) * per_page
        };
        let text = lines[start..end].join("\n");

        Ok(if text.trim().is_empty() {
            None
        } else {
            Some(text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let result = PdfExtractor::load(b"definitely not a pdf");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }
}
