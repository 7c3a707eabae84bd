//! Master metadata extraction from the leading pages.
//!
//! Master fields are anchored to label phrases rather than positions,
//! and every extractor is first-occurrence-wins: later repeats of an
//! anchor (page footers repeat several of them) never overwrite the
//! value already taken. Field name spellings are part of the output
//! contract.

use tracing::debug;

use crate::models::record::FieldMap;
use crate::pdf::{self, DocumentSource};

use super::rules::patterns::{
    flatten, DOTTED_DATE, LABEL_LINE, NO_WORD, ORDER_NO, ORDER_WORD, PAGE_STAMP,
};

/// Delivery-info anchors: keyword phrase on the line, value after the
/// last colon joined with the lines that follow until the next label
/// or a blank line.
const DELIVERY_FIELDS: &[(&str, &str)] = &[
    ("TIME OF DELIVERY", "Time of Delivery"),
    ("TERMS OF DELIVERY", "Delivery Terms"),
    ("TRANSPORT BY", "Transport By"),
    ("LOADING PLACE", "Loading Place"),
    ("DESTINATION", "Destination"),
    ("TERMS OF PAYMENT", "Terms of Payment"),
];

const CONFIRMATION_FIELDS: &[(&str, &str)] = &[
    ("ORDER CONFIRMATION", "Order Confirmation"),
    ("DELIVERY CONFIRMATION", "Delivery Confirmation"),
];

/// Extract master metadata from the first `scan_pages` pages.
pub fn extract_master(doc: &dyn DocumentSource, scan_pages: usize) -> pdf::Result<FieldMap> {
    let pages = scan_pages.min(doc.page_count());
    let mut text = String::new();
    for index in 0..pages {
        if let Some(page) = doc.page_text(index)? {
            text.push_str(&page);
            text.push('\n');
        }
    }
    let fields = extract_master_from_text(&text);
    debug!(pages, fields = fields.len(), "master metadata scan");
    Ok(fields)
}

/// Run every master-field extractor over already concatenated text.
pub fn extract_master_from_text(text: &str) -> FieldMap {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut fields = FieldMap::new();
    order_no_and_date(&lines, &mut fields);
    sok_block(&lines, &mut fields);
    supplier_block(&lines, &mut fields);
    contact_person(&lines, &mut fields);
    delivery_fields(&lines, &mut fields);
    confirmations(&lines, &mut fields);
    value_of_order(&lines, &mut fields);
    supply_planner(&lines, &mut fields);
    fields
}

/// ORDER on one line, NO on the next, a dotted date on the line after
/// that. The first ORDER line with a NO below it decides both fields.
fn order_no_and_date(lines: &[&str], out: &mut FieldMap) {
    for (i, line) in lines.iter().enumerate() {
        if !ORDER_WORD.is_match(line) {
            continue;
        }
        let Some(next) = lines.get(i + 1) else {
            continue;
        };
        if !NO_WORD.is_match(next) {
            continue;
        }
        if let Some(caps) = ORDER_NO.captures(next) {
            out.insert("Order No".to_string(), caps[1].to_string());
        }
        if let Some(after) = lines.get(i + 2) {
            if let Some(caps) = DOTTED_DATE.captures(after) {
                out.insert("Date".to_string(), caps[1].to_string());
            }
        }
        return;
    }
}

/// Buyer address block, scrubbed of the repeating page stamp and any
/// stray dates the footer interleaves with it.
fn sok_block(lines: &[&str], out: &mut FieldMap) {
    let Some(start) = lines.iter().position(|l| l.contains("SOK Consumer Goods")) else {
        return;
    };
    let mut parts = Vec::new();
    for (i, line) in lines.iter().enumerate().skip(start) {
        if i > start && (line.is_empty() || LABEL_LINE.is_match(line)) {
            break;
        }
        let cleaned = PAGE_STAMP.replace_all(line, "");
        let cleaned = DOTTED_DATE.replace_all(&cleaned, "");
        let cleaned = cleaned.trim().to_string();
        if !cleaned.is_empty() {
            parts.push(cleaned);
        }
    }
    if !parts.is_empty() {
        out.insert("SOK Consumer Goods".to_string(), flatten(&parts.join(" ")));
    }
}

fn supplier_block(lines: &[&str], out: &mut FieldMap) {
    let Some(start) = lines
        .iter()
        .position(|l| l.to_ascii_uppercase().contains("SUPPLIER"))
    else {
        return;
    };
    let upper = lines[start].to_ascii_uppercase();
    let first = match upper.find("SUPPLIER:") {
        Some(i) => lines[start][i + "SUPPLIER:".len()..].trim(),
        None => lines[start],
    };
    let mut parts = Vec::new();
    if !first.is_empty() {
        parts.push(first.to_string());
    }
    for line in lines.iter().skip(start + 1) {
        if line.is_empty() || LABEL_LINE.is_match(line) {
            break;
        }
        parts.push(line.to_string());
    }
    if !parts.is_empty() {
        out.insert("Supplier".to_string(), flatten(&parts.join(" ")));
    }
}

fn contact_person(lines: &[&str], out: &mut FieldMap) {
    for line in lines {
        if !line.to_ascii_uppercase().contains("CONTACT PERSON") {
            continue;
        }
        let value = line.rsplit(':').next().map(str::trim).unwrap_or("");
        if !value.is_empty() {
            out.insert("Contact Person".to_string(), value.to_string());
        }
        return;
    }
}

fn delivery_fields(lines: &[&str], out: &mut FieldMap) {
    for (i, line) in lines.iter().enumerate() {
        let upper = line.to_ascii_uppercase();
        for (keyword, field) in DELIVERY_FIELDS {
            if !upper.contains(keyword) || out.contains_key(*field) {
                continue;
            }
            let mut parts = Vec::new();
            let inline = line.rsplit(':').next().map(str::trim).unwrap_or("");
            if !inline.is_empty() {
                parts.push(inline.to_string());
            }
            for follow in lines.iter().skip(i + 1) {
                if follow.is_empty() || LABEL_LINE.is_match(follow) {
                    break;
                }
                parts.push(follow.to_string());
            }
            if !parts.is_empty() {
                out.insert(field.to_string(), flatten(&parts.join(" ")));
            }
        }
    }
}

fn confirmations(lines: &[&str], out: &mut FieldMap) {
    for line in lines {
        let upper = line.to_ascii_uppercase();
        for (keyword, field) in CONFIRMATION_FIELDS {
            if !upper.contains(keyword) || out.contains_key(*field) {
                continue;
            }
            let value = line.rsplit(':').next().map(str::trim).unwrap_or("");
            if !value.is_empty() {
                out.insert(field.to_string(), value.to_string());
            }
        }
    }
}

/// The order value may sit after the label or alone on the next line.
fn value_of_order(lines: &[&str], out: &mut FieldMap) {
    for (i, line) in lines.iter().enumerate() {
        if !line.to_ascii_uppercase().contains("VALUE OF ORDER") {
            continue;
        }
        let inline = line.rsplit(':').next().map(str::trim).unwrap_or("");
        let value = if inline.is_empty() {
            lines.get(i + 1).copied().unwrap_or("")
        } else {
            inline
        };
        if !value.is_empty() {
            out.insert("Value of Order".to_string(), flatten(value));
        }
        return;
    }
}

/// Planner name plus the V-code that ends it; the code may land on a
/// later line than the name.
fn supply_planner(lines: &[&str], out: &mut FieldMap) {
    let Some(start) = lines
        .iter()
        .position(|l| l.to_ascii_uppercase().contains("SUPPLY PLANNER"))
    else {
        return;
    };
    let mut parts: Vec<String> = Vec::new();
    let first = lines[start].rsplit(':').next().map(str::trim).unwrap_or("");
    if !first.is_empty() {
        parts.push(first.to_string());
    }
    let mut done = parts.iter().any(|p| has_planner_code(p));
    for line in lines.iter().skip(start + 1) {
        if done || line.is_empty() || LABEL_LINE.is_match(line) {
            break;
        }
        parts.push(line.to_string());
        done = has_planner_code(line);
    }
    if !parts.is_empty() {
        out.insert("Supply Planner".to_string(), flatten(&parts.join(" ")));
    }
}

fn has_planner_code(text: &str) -> bool {
    text.split_whitespace().any(|word| {
        let mut chars = word.chars();
        chars.next() == Some('V') && word.len() > 1 && chars.all(|c| c.is_ascii_digit())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pdf::PageSet;

    const FIRST_PAGE: &str = "PURCHASE ORDER\n\
                              NO: PO-55219\n\
                              15.3.2024\n\
                              SOK Consumer Goods\n\
                              PO Box 1 No: 55219 Page 1 (4)\n\
                              00088 S-GROUP\n\
                              SUPPLIER: Acme Trading Ltd\n\
                              CONTACT PERSON: JANE DOE\n\
                              TIME OF DELIVERY: WEEK 34\n\
                              TERMS OF DELIVERY: FOB SHANGHAI\n\
                              TERMS OF PAYMENT: 30 DAYS NET\n\
                              ORDER CONFIRMATION: YES\n\
                              VALUE OF ORDER:\n\
                              1 250,00 USD\n\
                              SUPPLY PLANNER:\n\
                              MERI VIRTA V12345";

    #[test]
    fn extracts_the_full_master_block() {
        let fields = extract_master_from_text(FIRST_PAGE);
        assert_eq!(fields["Order No"], "PO-55219");
        assert_eq!(fields["Date"], "15.3.2024");
        assert_eq!(
            fields["SOK Consumer Goods"],
            "SOK Consumer Goods PO Box 1 00088 S-GROUP"
        );
        assert_eq!(fields["Supplier"], "Acme Trading Ltd");
        assert_eq!(fields["Contact Person"], "JANE DOE");
        assert_eq!(fields["Time of Delivery"], "WEEK 34");
        assert_eq!(fields["Delivery Terms"], "FOB SHANGHAI");
        assert_eq!(fields["Terms of Payment"], "30 DAYS NET");
        assert_eq!(fields["Order Confirmation"], "YES");
        assert_eq!(fields["Value of Order"], "1 250,00 USD");
        assert_eq!(fields["Supply Planner"], "MERI VIRTA V12345");
    }

    #[test]
    fn first_occurrence_wins_for_repeated_anchors() {
        let text = "ORDER\nNO: 111/AA\n1.1.2024\nORDER\nNO: 222/BB\n2.2.2024";
        let fields = extract_master_from_text(text);
        assert_eq!(fields["Order No"], "111/AA");
        assert_eq!(fields["Date"], "1.1.2024");
    }

    #[test]
    fn order_number_requires_no_on_the_following_line() {
        let text = "ORDER something\nunrelated line\nNO: 999/XX";
        let fields = extract_master_from_text(text);
        assert!(!fields.contains_key("Order No"));
    }

    #[test]
    fn text_without_anchors_yields_empty_map() {
        assert!(extract_master_from_text("just noise\nnothing labelled").is_empty());
    }

    #[test]
    fn scan_stops_at_the_configured_page() {
        let source = PageSet::from_texts(vec![
            "ORDER\nNO: 111/AA".to_string(),
            "ORDER\nNO: 999/ZZ".to_string(),
        ]);
        let fields = extract_master(&source, 1).unwrap();
        assert_eq!(fields["Order No"], "111/AA");
        assert!(!fields.contains_key("Date"));
    }
}
