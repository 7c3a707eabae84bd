//! Per-block item field extraction for both layout variants.

use lazy_static::lazy_static;

use crate::models::record::FieldMap;
use crate::order::layout::Context;

use super::article;
use super::colour::extract_colour;
use super::patterns::{
    flatten, EMBEDDED_STYLE, INFO_ANCHOR, INFO_STOP, QUANTITY, SIZE, SIZE_LINE, STYLE,
};
use super::{apply_rules, FieldRule};

lazy_static! {
    /// Identifier rules in specificity order. The order is a hard
    /// invariant, not a style choice: the 13-digit EAN must be claimed
    /// before the 8/11-digit article number, which must be claimed
    /// before the looser supplier-code shapes, or fields
    /// cross-contaminate. An 11-digit supplier code from an unseen
    /// layout would be taken by "Art No" first; that ambiguity is
    /// inherent to the length heuristics and resolved here by order.
    static ref ID_RULES: Vec<FieldRule> = vec![
        FieldRule::new("EAN Code", &super::patterns::EAN),
        FieldRule::new("Art No", &super::patterns::ART_NO),
        FieldRule::new("Supp. Art. No", &super::patterns::SUPP_ART_NO),
    ];

    /// Heading-layout identifiers: the article number comes from the
    /// per-line scan in `article_name_and_styles`, so only EAN and the
    /// supplier-code shapes are claimed from the flattened block.
    static ref ID_RULES_HEADING: Vec<FieldRule> = vec![
        FieldRule::new("EAN Code", &super::patterns::EAN),
        FieldRule::new("Supp. Art. No", &super::patterns::SUPP_ART_NO_HEADING),
    ];

    static ref PRICE_RULES: Vec<FieldRule> = vec![FieldRule::with_suffix(
        "Price/Unit Gross",
        &super::patterns::PRICE,
        " USD",
    )];

    static ref TAIL_RULES: Vec<FieldRule> = vec![
        FieldRule::new("Sales Lot", &super::patterns::SALES_LOT),
        FieldRule::new("Brand", &super::patterns::BRAND),
        FieldRule::new("Country of Origin", &super::patterns::ORIGIN),
        FieldRule::new("Customs Tariff Number", &super::patterns::TARIFF),
        FieldRule::new("Prehandling Info", &super::patterns::PREHANDLING),
        FieldRule::new("Parcel Label Code", &super::patterns::PARCEL_LABEL),
    ];
}

/// Parse one numbered item block with no inherited context (the
/// no-heading layout and the region ahead of the first heading).
pub fn parse_item_block(block: &str) -> FieldMap {
    let mut data = FieldMap::new();

    if let Some(caps) = STYLE.captures(block) {
        data.insert("Style".to_string(), caps[1].trim().to_string());
    }

    let style = data.get("Style").cloned();
    if let Some(line) = article::article_line(block, style.as_deref()) {
        data.insert("Article".to_string(), line);
    }

    if let Some(caps) = QUANTITY.captures(block) {
        data.insert("Quantity".to_string(), caps[1].trim().to_string());
        data.insert("Unit".to_string(), caps[2].trim().to_string());
    }

    if let Some(info) = extract_info(block) {
        data.insert("Info".to_string(), info);
    }

    let flat = flatten(block);
    apply_rules(&PRICE_RULES, &flat, &mut data);
    apply_rules(&ID_RULES, &flat, &mut data);
    extract_colour(&flat, &mut data);

    if let Some(caps) = SIZE.captures(&flat) {
        data.insert("Size".to_string(), caps[1].trim().to_string());
    }

    apply_rules(&TAIL_RULES, &flat, &mut data);

    data
}

/// Parse one product block under the heading layout and merge it over
/// the active general-information context. The block wins every field
/// collision; the context itself is never touched.
pub fn parse_product_block(block: &str, context: &Context) -> FieldMap {
    let mut fields = FieldMap::new();
    let flat = flatten(block);

    let (name, styles, art_no) = article::article_name_and_styles(block);
    if let Some(name) = name {
        let mut name = name;
        let already_named = styles.iter().any(|s| name.contains(s.as_str()));
        if !already_named && !styles.is_empty() && !context.contains("Style") {
            name = format!("{} {}", name, styles[0]);
        }
        fields.insert("Article Name".to_string(), name.trim().to_string());
    }
    if let Some(art_no) = art_no {
        fields.insert("Art No".to_string(), art_no);
    }
    if !styles.is_empty() && !context.contains("Style") {
        fields.insert("Style".to_string(), styles.join(", "));
    }

    if let Some(caps) = QUANTITY.captures(&flat) {
        fields.insert("Quantity".to_string(), caps[1].trim().to_string());
        fields.insert("Unit".to_string(), caps[2].trim().to_string());
    }

    apply_rules(&PRICE_RULES, &flat, &mut fields);
    apply_rules(&ID_RULES_HEADING, &flat, &mut fields);
    extract_colour(&flat, &mut fields);

    if let Some(caps) = SIZE.captures(&flat) {
        fields.insert("Size".to_string(), caps[1].trim().to_string());
    } else {
        // cross-line sizes survive a per-line pass
        for line in block.lines() {
            if let Some(caps) = SIZE_LINE.captures(line) {
                fields.insert("Size".to_string(), caps[1].trim().to_string());
                break;
            }
        }
    }

    if let Some(caps) = super::patterns::SALES_LOT.captures(&flat) {
        fields.insert("Sales Lot".to_string(), caps[1].trim().to_string());
    }

    context.merge(fields)
}

/// INFO: capture, skipping anchors that belong to the "PREHANDLING
/// INFO:" and "PARCEL LABEL CODE ... INFO:" labels. Ends at the next
/// all-caps label or end of block; an embedded style reference is
/// scrubbed from the value.
fn extract_info(block: &str) -> Option<String> {
    let flat = flatten(block);
    for m in INFO_ANCHOR.find_iter(&flat) {
        let before = flat[..m.start()].trim_end().to_ascii_uppercase();
        if before.ends_with("PREHANDLING") || before.ends_with("PARCEL LABEL CODE") {
            continue;
        }

        let tail = &flat[m.end()..];
        let end = INFO_STOP.find(tail).map(|s| s.start()).unwrap_or(tail.len());
        let value = EMBEDDED_STYLE.replace_all(tail[..end].trim(), "");
        let value = value.trim();
        return if value.is_empty() {
            None
        } else {
            Some(flatten(value))
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ean_and_art_no_never_swap() {
        let block = "1) SUN PARASOL HOUSE\n6410000000137\n12345678\n2,00 PC 4,50 USD";
        let data = parse_item_block(block);
        assert_eq!(data["EAN Code"], "6410000000137");
        assert_eq!(data["Art No"], "12345678");
    }

    #[test]
    fn colour_completes_and_size_follows() {
        let data = parse_item_block("COLOUR: 18-2043TCX RASPBERRY SIZE: M");
        assert_eq!(data["Colour"], "18-2043TCX RASPBERRY SORBET");
        assert_eq!(data["Size"], "M");
    }

    #[test]
    fn quantity_price_and_supplier_code() {
        let block = "1) GARDEN PARASOL HOUSE\nKTAW2231-GR\n250,00 PC 12,90 USD";
        let data = parse_item_block(block);
        assert_eq!(data["Quantity"], "250,00");
        assert_eq!(data["Unit"], "PC");
        assert_eq!(data["Price/Unit Gross"], "12,90 USD");
        assert_eq!(data["Supp. Art. No"], "KTAW2231-GR");
        assert_eq!(data["Article"], "1) GARDEN PARASOL HOUSE");
    }

    #[test]
    fn prehandling_anchor_does_not_feed_info() {
        let block = "1) PARASOL HOUSE\nPREHANDLING INFO: PREHANDLING INCLUDED";
        let data = parse_item_block(block);
        assert_eq!(data["Prehandling Info"], "PREHANDLING INCLUDED");
        assert!(!data.contains_key("Info"));
    }

    #[test]
    fn info_is_captured_up_to_next_label() {
        let block = "1) PARASOL HOUSE\nINFO: hang tag attached\nBRAND: ACME";
        let data = parse_item_block(block);
        assert_eq!(data["Info"], "hang tag attached");
        assert_eq!(data["Brand"], "ACME");
    }

    #[test]
    fn absent_fields_yield_no_keys() {
        let data = parse_item_block("1) PARASOL HOUSE");
        assert!(!data.contains_key("Size"));
        assert!(!data.contains_key("EAN Code"));
        assert!(!data.contains_key("Colour"));
    }

    #[test]
    fn product_block_inherits_and_overrides() {
        let mut ctx_fields = FieldMap::new();
        ctx_fields.insert("Brand".to_string(), "ACME".to_string());
        ctx_fields.insert("Country of Origin".to_string(), "FI".to_string());
        let context = Context::new(ctx_fields);

        let block = "1) RAIN PONCHO 4 PC 2,50 USD\n6410000000144 12345678\nCOLOUR: 18-3840TCX PURPLE SIZE: L";
        let item = parse_product_block(block, &context);

        // inherited
        assert_eq!(item["Brand"], "ACME");
        assert_eq!(item["Country of Origin"], "FI");
        // block-level
        assert_eq!(item["Article Name"], "RAIN PONCHO");
        assert_eq!(item["Art No"], "12345678");
        assert_eq!(item["EAN Code"], "6410000000144");
        assert_eq!(item["Colour"], "18-3840TCX PURPLE OPULENCE");
        assert_eq!(item["Size"], "L");
        // context untouched
        assert_eq!(context.fields().len(), 2);
    }

    #[test]
    fn context_style_suppresses_block_style_candidates() {
        let mut ctx_fields = FieldMap::new();
        ctx_fields.insert("Style".to_string(), "AB12CD34E".to_string());
        let context = Context::new(ctx_fields);

        let item = parse_product_block("1) BEACH TOWEL XY98ZW76Q 4 PC", &context);
        assert_eq!(item["Style"], "AB12CD34E");
        assert_eq!(item["Article Name"], "BEACH TOWEL XY98ZW76Q");
    }
}
