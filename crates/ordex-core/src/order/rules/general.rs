//! General-information section fields.

use lazy_static::lazy_static;

use crate::models::record::FieldMap;

use super::{apply_rules, FieldRule};

lazy_static! {
    static ref GENERAL_RULES: Vec<FieldRule> = vec![
        FieldRule::new("Style", &super::patterns::STYLE),
        FieldRule::new("Brand", &super::patterns::BRAND),
        FieldRule::new("Country of Origin", &super::patterns::ORIGIN),
        FieldRule::new("Customs Tariff Number", &super::patterns::TARIFF),
        FieldRule::new("Prehandling Info", &super::patterns::PREHANDLING),
        FieldRule::new("Parcel Label Code", &super::patterns::PARCEL_LABEL),
        FieldRule::new("Sales Lot", &super::patterns::SALES_LOT),
        FieldRule::new("Total quantity of articles", &super::patterns::TOTAL_QUANTITY),
    ];
}

/// Extract the inheritable fields of one general-information section.
pub fn parse_general_info(section: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    apply_rules(&GENERAL_RULES, section, &mut fields);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_inheritable_fields() {
        let section = "ARTICLE GENERAL INFORMATION\n\
                       STYLE: AB12CD\n\
                       BRAND: ACME\n\
                       COUNTRY OF ORIGIN: FI\n\
                       CUSTOMS TARIFF NUMBER: 66011000\n\
                       SALES LOT SL: 10 PC\n\
                       Total quantity of articles: 120 PC";
        let fields = parse_general_info(section);
        assert_eq!(fields["Style"], "AB12CD");
        assert_eq!(fields["Brand"], "ACME");
        assert_eq!(fields["Country of Origin"], "FI");
        assert_eq!(fields["Customs Tariff Number"], "66011000");
        assert_eq!(fields["Sales Lot"], "10 PC");
        assert_eq!(fields["Total quantity of articles"], "120 PC");
    }

    #[test]
    fn missing_sections_yield_empty_map() {
        assert!(parse_general_info("nothing of interest").is_empty());
    }
}
