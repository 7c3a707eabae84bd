//! Document-level orchestration.
//!
//! One [`OrderParser::process`] call turns a [`DocumentSource`] into an
//! ordered [`ExtractionResult`]. The pipeline is pure over the page
//! text: processing the same document twice yields identical records.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::config::OrdexConfig;
use crate::models::record::{ExtractionResult, Record};
use crate::pdf::DocumentSource;

use super::layout::{Context, Layout};
use super::master::extract_master;
use super::rules::general::parse_general_info;
use super::rules::item::{parse_item_block, parse_product_block};
use super::rules::patterns::TOTAL_QUANTITY;
use super::segment::{general_sections, item_blocks, product_blocks};

/// Purchase-order extraction pipeline.
pub struct OrderParser {
    config: OrdexConfig,
}

impl OrderParser {
    pub fn new() -> Self {
        Self {
            config: OrdexConfig::default(),
        }
    }

    pub fn with_config(config: OrdexConfig) -> Self {
        Self { config }
    }

    /// Process one document end to end: master metadata first, then
    /// the layout-specific item pass. A readable document that yields
    /// nothing is an empty `Ok`, not an error.
    pub fn process(&self, doc: &dyn DocumentSource) -> Result<ExtractionResult> {
        let started = Instant::now();
        let mut records = Vec::new();
        let mut warnings = Vec::new();

        let master = extract_master(doc, self.config.master.scan_pages)?;
        if master.is_empty() {
            warn!("no master metadata found");
            warnings.push("no master metadata found".to_string());
        } else {
            records.push(Record::Header { fields: master });
        }

        let text = self.concat_pages(doc, 0, doc.page_count())?;
        match Layout::detect(&text) {
            Layout::Heading { before, after } => {
                debug!("general-information heading present");
                self.run_heading(before, after, &mut records);
            }
            Layout::NoHeading => {
                debug!("no heading, scanning the item page window");
                let region = self.item_region(doc, &text)?;
                for block in item_blocks(&region) {
                    let fields = parse_item_block(&block);
                    if !fields.is_empty() {
                        records.push(Record::Item(fields));
                    }
                }
            }
        }

        let items = records.iter().filter(|r| r.is_item()).count();
        if items == 0 {
            warn!("no item blocks recognized");
            warnings.push("no item blocks recognized".to_string());
        }
        info!(records = records.len(), items, "document processed");

        Ok(ExtractionResult {
            records,
            warnings,
            processing_time_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Heading layout: items ahead of the first heading parse without
    /// context, then every section emits its totals and shared fields
    /// before the product blocks that inherit them. A later section
    /// replaces the context outright.
    fn run_heading(&self, before: &str, after: &str, records: &mut Vec<Record>) {
        for block in item_blocks(before) {
            let fields = parse_item_block(&block);
            if !fields.is_empty() {
                records.push(Record::Item(fields));
            }
        }

        let global_total = TOTAL_QUANTITY
            .captures(after)
            .map(|caps| caps[1].trim().to_string());
        let mut total_emitted = false;

        for (i, section) in general_sections(after).iter().enumerate() {
            let mut context = Context::new(parse_general_info(section));

            if let Some(total) = context.remove("Total quantity of articles") {
                records.push(Record::TotalQuantity { total });
                total_emitted = true;
            } else if i == 0 && !total_emitted {
                if let Some(total) = global_total.clone() {
                    records.push(Record::TotalQuantity { total });
                    total_emitted = true;
                }
            }

            if !context.is_empty() {
                records.push(Record::GeneralInfo {
                    fields: context.fields().clone(),
                });
            }

            for block in product_blocks(section) {
                let item = parse_product_block(&block, &context);
                if !item.is_empty() {
                    records.push(Record::Item(item));
                }
            }
        }
    }

    /// Item region for the no-heading layout: the configured page
    /// window, clamped to the document. A window the document cannot
    /// fill falls back to the full text so short documents still parse.
    fn item_region(&self, doc: &dyn DocumentSource, full_text: &str) -> Result<String> {
        let from = self.config.pages.item_start.min(doc.page_count());
        let to = self.config.pages.item_end.min(doc.page_count());
        if from < to {
            self.concat_pages(doc, from, to)
        } else {
            Ok(full_text.to_string())
        }
    }

    fn concat_pages(&self, doc: &dyn DocumentSource, from: usize, to: usize) -> Result<String> {
        let mut text = String::new();
        for index in from..to {
            if let Some(page) = doc.page_text(index)? {
                text.push_str(&page);
                text.push('\n');
            }
        }
        Ok(text)
    }
}

impl Default for OrderParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pdf::PageSet;

    fn process(page: &str) -> ExtractionResult {
        let source = PageSet::from_texts(vec![page.to_string()]);
        OrderParser::new().process(&source).unwrap()
    }

    #[test]
    fn no_heading_layout_emits_header_and_items_only() {
        let page = "PURCHASE ORDER\n\
                    NO: PO-55219\n\
                    1) SUN PARASOL HOUSE\n\
                    6410000000137\n\
                    12345678\n\
                    2,00 PC 4,50 USD\n\
                    2) GARDEN PARASOL HOUSE\n\
                    KTAW2231-GR\n\
                    250,00 PC";
        let result = process(page);

        assert!(result.records[0].is_header());
        let items: Vec<_> = result.records.iter().filter(|r| r.is_item()).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(result.records.len(), 3);
        assert!(result.warnings.is_empty());

        match &result.records[1] {
            Record::Item(fields) => {
                assert_eq!(fields["EAN Code"], "6410000000137");
                assert_eq!(fields["Art No"], "12345678");
            }
            other => panic!("expected an item, got {other:?}"),
        }
    }

    #[test]
    fn heading_layout_emits_totals_shared_fields_and_inheriting_items() {
        let page = "order listing\n\
                    ARTICLE GENERAL INFORMATION\n\
                    STYLE: AB12CD34E\n\
                    BRAND: ACME\n\
                    Total quantity of articles: 120 PC\n\
                    1) BEACH TOWEL 60 PC 2,50 USD\n\
                    6410000000144 12345678\n\
                    2) BEACH MAT 60 PC 3,00 USD\n\
                    87654321";
        let result = process(page);

        assert_eq!(
            result.records[0],
            Record::TotalQuantity {
                total: "120 PC".to_string()
            }
        );
        match &result.records[1] {
            Record::GeneralInfo { fields } => {
                assert_eq!(fields["Style"], "AB12CD34E");
                assert_eq!(fields["Brand"], "ACME");
                assert!(!fields.contains_key("Total quantity of articles"));
            }
            other => panic!("expected shared fields, got {other:?}"),
        }
        match &result.records[2] {
            Record::Item(fields) => {
                assert_eq!(fields["Article Name"], "BEACH TOWEL");
                assert_eq!(fields["Art No"], "12345678");
                assert_eq!(fields["EAN Code"], "6410000000144");
                // inherited from the section
                assert_eq!(fields["Brand"], "ACME");
                assert_eq!(fields["Style"], "AB12CD34E");
            }
            other => panic!("expected an item, got {other:?}"),
        }
        match &result.records[3] {
            Record::Item(fields) => {
                assert_eq!(fields["Article Name"], "BEACH MAT");
                assert_eq!(fields["Art No"], "87654321");
                assert_eq!(fields["Brand"], "ACME");
            }
            other => panic!("expected an item, got {other:?}"),
        }
        assert_eq!(result.records.len(), 4);
    }

    #[test]
    fn items_ahead_of_the_heading_parse_without_context() {
        let page = "1) EARLY PARASOL HOUSE\n\
                    5 PC\n\
                    ARTICLE GENERAL INFORMATION\n\
                    BRAND: ACME\n\
                    2) LATE MAT 3 PC";
        let result = process(page);

        let kinds: Vec<bool> = result.records.iter().map(Record::is_item).collect();
        assert_eq!(kinds, vec![true, false, true]);
        match &result.records[0] {
            Record::Item(fields) => {
                assert_eq!(fields["Article"], "1) EARLY PARASOL HOUSE");
                assert!(!fields.contains_key("Brand"));
            }
            other => panic!("expected an item, got {other:?}"),
        }
        match &result.records[2] {
            Record::Item(fields) => assert_eq!(fields["Brand"], "ACME"),
            other => panic!("expected an item, got {other:?}"),
        }
    }

    #[test]
    fn processing_is_idempotent() {
        let page = "PURCHASE ORDER\n\
                    NO: PO-55219\n\
                    1) SUN PARASOL HOUSE\n\
                    2,00 PC 4,50 USD";
        let source = PageSet::from_texts(vec![page.to_string()]);
        let parser = OrderParser::new();
        let first = parser.process(&source).unwrap();
        let second = parser.process(&source).unwrap();
        assert_eq!(
            first.to_json(false).unwrap(),
            second.to_json(false).unwrap()
        );
    }

    #[test]
    fn unrecognized_text_yields_empty_result_not_error() {
        let result = process("lorem ipsum\nnothing recognizable here");
        assert!(result.is_empty());
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn configured_page_window_bounds_the_item_scan() {
        let pages = vec![
            "PURCHASE ORDER\nNO: PO-1".to_string(),
            "1) SKIPPED PARASOL HOUSE\n2 PC".to_string(),
            "1) WINDOWED PARASOL HOUSE\n3 PC".to_string(),
        ];
        let source = PageSet::from_texts(pages);
        let mut config = OrdexConfig::default();
        config.pages.item_start = 2;
        config.pages.item_end = 3;
        let result = OrderParser::with_config(config).process(&source).unwrap();

        let items: Vec<_> = result
            .records
            .iter()
            .filter_map(|r| match r {
                Record::Item(fields) => Some(fields["Article"].clone()),
                _ => None,
            })
            .collect();
        assert_eq!(items, vec!["1) WINDOWED PARASOL HOUSE".to_string()]);
    }
}
