//! Regex tables and token sets for purchase-order extraction.
//!
//! All patterns are compiled once. Identifier patterns are consumed in
//! specificity order by the rule tables in `item.rs`; see the note on
//! `ID_RULES` there.

use lazy_static::lazy_static;
use regex::Regex;

/// Heading phrase that opens a general-information section.
pub const GENERAL_HEADING: &str = "ARTICLE GENERAL INFORMATION";

/// Supplier footer line that terminates an item listing.
pub const SUPPLIER_SENTINEL: &str = "Suomen Osuuskauppojen Keskuskunta";

/// Stop tokens ending a free-text COLOUR capture. The nearest one after
/// the anchor wins.
pub const COLOUR_STOPS: &[&str] = &[
    "SIZE:",
    "SALES LOT",
    "BRAND:",
    "COUNTRY OF ORIGIN:",
    "CUSTOMS TARIFF",
    "PREHANDLING",
    "PARCEL LABEL",
];

/// Stop words bounding the free-text article line. Order matters: the
/// first word found in a line decides the cut when no style token is
/// known.
pub const ARTICLE_STOPWORDS: &[&str] = &[
    "HOUSE",
    "ANTI WIND",
    "ADULT",
    "AUTO OPEN",
    "WIND",
    "AUTO-OPEN",
    "OPEN",
];

lazy_static! {
    // Block boundaries
    pub static ref ITEM_START: Regex = Regex::new(r"(?m)^\d+\)").unwrap();
    pub static ref SENTINEL_LINE: Regex =
        Regex::new(r"(?m)^Suomen Osuuskauppojen Keskuskunta").unwrap();
    pub static ref HEADING: Regex = Regex::new(r"(?i)ARTICLE GENERAL INFORMATION").unwrap();

    // Item fields
    pub static ref STYLE: Regex = Regex::new(r"(?i)STYLE\s*[:\-]?\s*([A-Z0-9\-]{6,})").unwrap();
    pub static ref QUANTITY: Regex = Regex::new(r"(?i)\b([\d.,]+)\s+(PC)\b").unwrap();
    pub static ref PRICE: Regex = Regex::new(r"(?i)([\d.,]+)\s+USD\b").unwrap();
    pub static ref EAN: Regex = Regex::new(r"\b(\d{13})\b").unwrap();
    pub static ref ART_NO: Regex = Regex::new(r"\b(\d{8}|\d{11})\b").unwrap();
    pub static ref SUPP_ART_NO: Regex =
        Regex::new(r"(?i)\b(KTAW[A-Z0-9\-_]+|KT[A-Z0-9\-_]+|[A-Z]{2,}__\d+_[a-z0-9_]+)\b")
            .unwrap();
    pub static ref SUPP_ART_NO_HEADING: Regex =
        Regex::new(r"(?i)\b(SOK[A-Z0-9\-_]+|206[A-Z0-9]{7})\b").unwrap();
    pub static ref COLOUR_ANCHOR: Regex = Regex::new(r"(?i)COLOUR:\s*").unwrap();
    pub static ref SIZE: Regex =
        Regex::new(r"(?i)SIZE:\s*([A-Z0-9\- ]+?)(?:\s+SALES LOT SL|$)").unwrap();
    pub static ref SIZE_LINE: Regex = Regex::new(r"(?i)SIZE:\s*([A-Z0-9\- ]+)").unwrap();
    pub static ref SALES_LOT: Regex =
        Regex::new(r"(?i)SALES LOT\s*(?:SL)?:\s*(\d+\s*PC)").unwrap();
    pub static ref BRAND: Regex = Regex::new(r"BRAND:\s*(\S+)").unwrap();
    pub static ref ORIGIN: Regex = Regex::new(r"COUNTRY OF ORIGIN:\s*(\S+)").unwrap();
    pub static ref TARIFF: Regex = Regex::new(r"CUSTOMS TARIFF NUMBER:\s*(\d+)").unwrap();
    pub static ref PREHANDLING: Regex =
        Regex::new(r"PREHANDLING INFO:\s*(PREHANDLING INCLUDED)").unwrap();
    pub static ref PARCEL_LABEL: Regex = Regex::new(r"PARCEL LABEL CODE:\s*(\S+)").unwrap();
    pub static ref INFO_ANCHOR: Regex = Regex::new(r"(?i)\bINFO:\s*").unwrap();
    pub static ref INFO_STOP: Regex = Regex::new(r"\s+[A-Z ]+:").unwrap();
    pub static ref EMBEDDED_STYLE: Regex = Regex::new(r"(?i)Style\s*:\s*[A-Z0-9\-]+").unwrap();
    pub static ref TOTAL_QUANTITY: Regex =
        Regex::new(r"(?i)Total\s*(?:quantity\s*)?of\s*articles\s*:\s*(\d+\s*PC)").unwrap();

    // Heading-layout article naming
    pub static ref STYLE_LABELED: Regex =
        Regex::new(r"(?i)STYLE\s*[:\-]?\s*([A-Z0-9]{6,10})\b").unwrap();
    pub static ref STYLE_TOKEN: Regex = Regex::new(r"\b([A-Z0-9]{9,10})\b").unwrap();
    pub static ref ART_NO_LINE: Regex = Regex::new(r"\b(\d{8,11})\b").unwrap();
    pub static ref ITEM_LEAD: Regex = Regex::new(r"^\d+\)\s*").unwrap();
    pub static ref ARTICLE_NAME_PLAIN: Regex =
        Regex::new(r"^\d+\)\s*(.*?)(?:\s*(?:\d{1,4}\s*PC|\d{1,4},\d{1,2}\s*USD)|$)").unwrap();

    // Master metadata
    pub static ref ORDER_WORD: Regex = Regex::new(r"(?i)\bORDER\b").unwrap();
    pub static ref NO_WORD: Regex = Regex::new(r"(?i)\bNO\b").unwrap();
    pub static ref ORDER_NO: Regex = Regex::new(r"(?i)\bNO[:\s]*([A-Z0-9/\-]+)").unwrap();
    pub static ref DOTTED_DATE: Regex = Regex::new(r"\b(\d{1,2}\.\d{1,2}\.\d{2,4})\b").unwrap();
    pub static ref LABEL_LINE: Regex = Regex::new(r"^[A-Z][A-Z ]+:").unwrap();
    pub static ref PAGE_STAMP: Regex = Regex::new(r"No:\s*\d+\s*Page\s*\d+\s*\(\d+\)").unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse all whitespace runs to single spaces so cross-line fields
/// become matchable.
pub fn flatten(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}
