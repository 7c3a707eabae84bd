//! Rule-based field extraction for purchase-order blocks.

pub mod article;
pub mod colour;
pub mod general;
pub mod item;
pub mod patterns;

use regex::Regex;

use crate::models::record::FieldMap;

/// One ordered pattern rule: the output field it claims, the pattern
/// that matches it (first capture group is the value), and an optional
/// suffix appended to the captured text.
pub struct FieldRule {
    pub field: &'static str,
    pub pattern: &'static Regex,
    pub suffix: Option<&'static str>,
}

impl FieldRule {
    pub fn new(field: &'static str, pattern: &'static Regex) -> Self {
        Self {
            field,
            pattern,
            suffix: None,
        }
    }

    pub fn with_suffix(
        field: &'static str,
        pattern: &'static Regex,
        suffix: &'static str,
    ) -> Self {
        Self {
            field,
            pattern,
            suffix: Some(suffix),
        }
    }
}

/// Apply rules in slice order. A rule that does not match inserts no
/// key; matched values are trimmed before insertion.
pub fn apply_rules(rules: &[FieldRule], text: &str, out: &mut FieldMap) {
    for rule in rules {
        if let Some(caps) = rule.pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                let mut value = m.as_str().trim().to_string();
                if let Some(suffix) = rule.suffix {
                    value.push_str(suffix);
                }
                if !value.is_empty() {
                    out.insert(rule.field.to_string(), value);
                }
            }
        }
    }
}

/// Capture free text after `anchor`, ending at the nearest occurrence
/// of any stop token, or at end of text when none occurs.
pub fn capture_after(anchor: &Regex, stops: &[&str], text: &str) -> Option<String> {
    let m = anchor.find(text)?;
    let tail = &text[m.end()..];
    let upper = tail.to_ascii_uppercase();

    let cut = stops
        .iter()
        .filter_map(|stop| upper.find(*stop))
        .min()
        .unwrap_or(tail.len());

    let value = tail[..cut].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
