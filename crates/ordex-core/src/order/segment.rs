//! Text segmentation: numbered item blocks and general-information
//! sections.
//!
//! Segmentation is offset based: boundary matches are collected first
//! and the text is sliced between them, so a block always runs from its
//! own start marker to the next marker (or the supplier footer).

use super::rules::patterns::{HEADING, ITEM_START, SENTINEL_LINE};

/// Split an item region into numbered blocks. Each block starts at a
/// `N)` marker and ends at the next marker, the supplier footer line,
/// or a general-information heading, whichever comes first. No markers
/// means no blocks.
///
/// A heading trailing the last marker carries section metadata, so its
/// text is appended to the final block rather than dropped, and stands
/// alone when the region has no markers at all.
pub fn item_blocks(region: &str) -> Vec<String> {
    let heading = HEADING.find(region).map(|m| m.start());
    let starts: Vec<usize> = ITEM_START.find_iter(region).map(|m| m.start()).collect();
    let mut blocks = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let mut end = starts.get(i + 1).copied().unwrap_or(region.len());
        if let Some(m) = SENTINEL_LINE.find(&region[start..]) {
            end = end.min(start + m.start());
        }
        if let Some(h) = heading {
            if h > start {
                end = end.min(h);
            }
        }
        let block = region[start..end].trim();
        if !block.is_empty() {
            blocks.push(block.to_string());
        }
    }

    if let Some(h) = heading {
        let past_markers = starts.last().is_none_or(|&last| h > last);
        let trailing = region[h..].trim();
        if past_markers && !trailing.is_empty() {
            match blocks.last_mut() {
                Some(last) => {
                    last.push('\n');
                    last.push_str(trailing);
                }
                None => blocks.push(trailing.to_string()),
            }
        }
    }

    blocks
}

/// Split a general-information section into product blocks. Same
/// boundaries as [`item_blocks`] but the supplier footer does not
/// terminate a block; heading-layout documents place it after the last
/// section.
pub fn product_blocks(section: &str) -> Vec<String> {
    let starts: Vec<usize> = ITEM_START.find_iter(section).map(|m| m.start()).collect();
    let mut blocks = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(section.len());
        let block = section[start..end].trim();
        if !block.is_empty() {
            blocks.push(block.to_string());
        }
    }
    blocks
}

/// Slice a document into general-information sections, one per heading
/// occurrence. Each section runs from its heading to the next heading
/// or end of text.
pub fn general_sections(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = HEADING.find_iter(text).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            text[start..end].trim()
        })
        .filter(|section| !section.is_empty())
        .collect()
}
