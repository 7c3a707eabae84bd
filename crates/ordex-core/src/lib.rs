//! Purchase-order PDF extraction.
//!
//! ordex turns supplier purchase-order PDFs into an ordered sequence of
//! JSON records: once-per-document master metadata followed by one
//! record per article, with shared general-information fields inherited
//! by the items that follow them.
//!
//! ```no_run
//! use ordex_core::{OrderParser, PdfExtractor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("order.pdf")?;
//! let doc = PdfExtractor::load(&data)?;
//! let result = OrderParser::new().process(&doc)?;
//! println!("{}", result.to_json(true)?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod order;
pub mod pdf;

pub use error::{OrdexError, PdfError, Result};
pub use models::config::OrdexConfig;
pub use models::record::{ExtractionResult, FieldMap, Record};
pub use order::OrderParser;
pub use pdf::{DocumentSource, PageSet, PdfExtractor};
