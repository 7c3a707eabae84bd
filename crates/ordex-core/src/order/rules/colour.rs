//! Colour capture and the known colour-name completion table.

use crate::models::record::FieldMap;

use super::capture_after;
use super::patterns::{COLOUR_ANCHOR, COLOUR_STOPS};

/// Suffix completions for colour values the source system truncates.
/// Keyed by the normalized (trimmed, upper-cased) captured text; kept
/// out of the general rule mechanism on purpose.
const COLOUR_COMPLETIONS: &[(&str, &str)] = &[
    ("18-2043TCX RASPBERRY", " SORBET"),
    ("18-3840TCX PURPLE", " OPULENCE"),
];

/// Apply the completion table to a captured colour value.
pub fn complete_colour(colour: &str) -> String {
    let trimmed = colour.trim();
    let key = trimmed.to_ascii_uppercase();
    match COLOUR_COMPLETIONS.iter().find(|(code, _)| key == *code) {
        Some((_, suffix)) => format!("{}{}", trimmed, suffix),
        None => trimmed.to_string(),
    }
}

/// Extract the Colour field from flattened block text: free text after
/// `COLOUR:` up to the nearest stop token, then completed.
pub fn extract_colour(flat: &str, out: &mut FieldMap) {
    if let Some(colour) = capture_after(&COLOUR_ANCHOR, COLOUR_STOPS, flat) {
        out.insert("Colour".to_string(), complete_colour(&colour));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_get_their_suffix() {
        assert_eq!(
            complete_colour("18-2043TCX RASPBERRY"),
            "18-2043TCX RASPBERRY SORBET"
        );
        assert_eq!(
            complete_colour("18-3840TCX PURPLE"),
            "18-3840TCX PURPLE OPULENCE"
        );
    }

    #[test]
    fn completion_key_is_case_insensitive() {
        assert_eq!(
            complete_colour("18-2043tcx raspberry"),
            "18-2043tcx raspberry SORBET"
        );
    }

    #[test]
    fn unknown_colours_pass_through() {
        assert_eq!(complete_colour("19-4052TCX CLASSIC BLUE"), "19-4052TCX CLASSIC BLUE");
    }

    #[test]
    fn extracts_and_completes_from_flat_text() {
        let mut out = FieldMap::new();
        extract_colour("COLOUR: 18-2043TCX RASPBERRY SIZE: M", &mut out);
        assert_eq!(out["Colour"], "18-2043TCX RASPBERRY SORBET");
    }
}
