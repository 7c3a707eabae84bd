//! Output records produced by the extraction pipeline.
//!
//! The record sequence serializes as a JSON array of heterogeneous
//! objects. Field name spelling ("Art No", "EAN Code", "Price/Unit
//! Gross", ...) is part of the external contract and must not change.

use std::collections::BTreeMap;

use serde::Serialize;

/// Flat string-keyed field mapping. A `BTreeMap` keeps key order
/// deterministic so repeated runs serialize byte-for-byte identically.
pub type FieldMap = BTreeMap<String, String>;

/// One element of the output sequence, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// Once-per-document header metadata.
    Header {
        #[serde(rename = "MASTER METADATA")]
        fields: FieldMap,
    },

    /// Standalone total-quantity marker.
    TotalQuantity {
        #[serde(rename = "Total quantity of articles")]
        total: String,
    },

    /// Shared fields of one general-information section.
    GeneralInfo {
        #[serde(rename = "ARTICLE GENERAL INFORMATION")]
        fields: FieldMap,
    },

    /// One product entry.
    Item(FieldMap),
}

impl Record {
    pub fn is_item(&self) -> bool {
        matches!(self, Record::Item(_))
    }

    pub fn is_header(&self) -> bool {
        matches!(self, Record::Header { .. })
    }
}

/// Result of processing one document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted records, in the order they were discovered.
    pub records: Vec<Record>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// True when the document was readable but yielded no records at
    /// all. Distinct from a processing error.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize the record sequence as a JSON array.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(&self.records)
        } else {
            serde_json::to_string(&self.records)
        }
    }
}
