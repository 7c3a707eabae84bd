//! Layout selection and context inheritance.

use crate::models::record::FieldMap;

use super::rules::patterns::HEADING;

/// The two top-level document shapes, selected once per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout<'a> {
    /// No general-information heading anywhere; item blocks parse
    /// standalone with no inherited context.
    NoHeading,
    /// Heading present. `before` precedes the first heading, `after`
    /// starts at it.
    Heading { before: &'a str, after: &'a str },
}

impl<'a> Layout<'a> {
    /// Select the layout for a document's concatenated text.
    pub fn detect(text: &'a str) -> Self {
        match HEADING.find(text) {
            Some(m) => Layout::Heading {
                before: &text[..m.start()],
                after: &text[m.start()..],
            },
            None => Layout::NoHeading,
        }
    }
}

/// Inheritable fields scoped to the item blocks that follow one
/// general-information section. Records receive copies; producing a
/// record never mutates the context, and a later section replaces the
/// context entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    fields: FieldMap,
}

impl Context {
    pub fn new(fields: FieldMap) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Take a field out of the context, if present.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field)
    }

    /// Overlay block-level fields on a copy of the context. The block
    /// wins every collision; neither input aliases the result.
    pub fn merge(&self, block_fields: FieldMap) -> FieldMap {
        let mut merged = self.fields.clone();
        merged.extend(block_fields);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn detect_splits_at_first_heading() {
        let text = "items here\nARTICLE GENERAL INFORMATION\nrest";
        match Layout::detect(text) {
            Layout::Heading { before, after } => {
                assert_eq!(before, "items here\n");
                assert!(after.starts_with("ARTICLE GENERAL INFORMATION"));
            }
            Layout::NoHeading => panic!("heading not detected"),
        }
    }

    #[test]
    fn detect_without_heading() {
        assert_eq!(Layout::detect("1) ITEM\n2) ITEM"), Layout::NoHeading);
    }

    #[test]
    fn merge_prefers_block_fields() {
        let context = Context::new(fields(&[("Style", "OLD"), ("Brand", "ACME")]));
        let merged = context.merge(fields(&[("Style", "NEW")]));
        assert_eq!(merged["Style"], "NEW");
        assert_eq!(merged["Brand"], "ACME");
    }

    #[test]
    fn merge_does_not_alias_the_context() {
        let context = Context::new(fields(&[("Brand", "ACME")]));
        let mut merged = context.merge(FieldMap::new());
        merged.insert("Brand".to_string(), "OTHER".to_string());
        assert_eq!(context.fields()["Brand"], "ACME");
    }
}
