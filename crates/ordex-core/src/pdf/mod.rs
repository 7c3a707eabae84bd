//! PDF text provider module.
//!
//! The pipeline never opens files itself; it consumes page-ordered
//! text through the [`DocumentSource`] trait. [`PdfExtractor`] is the
//! lopdf/pdf-extract backed implementation; [`PageSet`] holds already
//! extracted text for embedding callers and tests.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Page-ordered text access for one document.
pub trait DocumentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Text of one page. `Ok(None)` means extraction yielded nothing
    /// for that page; an `Err` is a provider failure and fatal for the
    /// whole document.
    fn page_text(&self, index: usize) -> Result<Option<String>>;
}

/// In-memory document source over already extracted page texts.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    pages: Vec<Option<String>>,
}

impl PageSet {
    pub fn new(pages: Vec<Option<String>>) -> Self {
        Self { pages }
    }

    /// Build a source where every page has text.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: texts.into_iter().map(|t| Some(t.into())).collect(),
        }
    }
}

impl DocumentSource for PageSet {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>> {
        self.pages
            .get(index)
            .cloned()
            .ok_or(PdfError::InvalidPage(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_set_round_trips_pages() {
        let source = PageSet::new(vec![Some("first".to_string()), None]);
        assert_eq!(source.page_count(), 2);
        assert_eq!(source.page_text(0).unwrap().as_deref(), Some("first"));
        assert_eq!(source.page_text(1).unwrap(), None);
        assert!(source.page_text(2).is_err());
    }
}
