//! Article line and article-name recovery.
//!
//! Article names are free text with no label; they are bounded either
//! by a known style token or by the fixed stop-word set.

use super::patterns::{
    ARTICLE_NAME_PLAIN, ARTICLE_STOPWORDS, ART_NO_LINE, ITEM_LEAD, STYLE_LABELED, STYLE_TOKEN,
};

/// Pick the article line out of a block. When a style token is known,
/// the line carrying it is cut at the furthest end of any stop word or
/// the style token itself, so composite names ("ANTI WIND HOUSE ...")
/// survive whole. Without a style, the first line containing a stop
/// word is cut right after that word.
pub fn article_line(block: &str, style: Option<&str>) -> Option<String> {
    for line in block.lines() {
        let upper = line.to_ascii_uppercase();

        if let Some(style) = style {
            if line.contains(style) {
                let mut ends: Vec<usize> = ARTICLE_STOPWORDS
                    .iter()
                    .filter_map(|kw| upper.find(kw).map(|i| i + kw.len()))
                    .collect();
                if let Some(i) = line.find(style) {
                    ends.push(i + style.len());
                }
                return Some(match ends.into_iter().max() {
                    Some(cut) => line[..cut].trim().to_string(),
                    None => line.trim().to_string(),
                });
            }
        }

        for kw in ARTICLE_STOPWORDS {
            if let Some(i) = upper.find(kw) {
                return Some(line[..i + kw.len()].trim().to_string());
            }
        }
    }
    None
}

/// Article name, candidate style numbers and article number for a
/// heading-layout product block. A labelled STYLE bounds the name
/// directly; otherwise the name runs up to the first quantity or price
/// figure and standalone 9-10 character tokens become style candidates.
pub fn article_name_and_styles(block: &str) -> (Option<String>, Vec<String>, Option<String>) {
    let lines: Vec<&str> = block.trim().lines().collect();
    let flat = lines
        .iter()
        .take(6)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let mut name = None;
    let mut styles: Vec<String> = Vec::new();

    if let Some(caps) = STYLE_LABELED.captures(&flat) {
        let style = caps[1].trim().to_string();
        if let Some(m) = ITEM_LEAD.find(&flat) {
            let stripped = &flat[m.end()..];
            if let Some(pos) = find_token(stripped, &style) {
                let candidate = stripped[..pos].trim();
                if !candidate.is_empty() {
                    name = Some(candidate.to_string());
                }
            }
        }
        styles.push(style);
    } else {
        if let Some(caps) = ARTICLE_NAME_PLAIN.captures(&flat) {
            let candidate = caps[1].trim();
            if !candidate.is_empty() {
                name = Some(candidate.to_string());
            }
        }
        styles = style_tokens(&flat).into_iter().take(2).collect();
    }

    let art_no = lines
        .iter()
        .find_map(|line| ART_NO_LINE.captures(line).map(|caps| caps[1].to_string()));

    (name, styles, art_no)
}

/// Standalone style-number candidates: 9-10 char upper-alphanumeric
/// tokens not directly followed by a quantity or price unit.
fn style_tokens(flat: &str) -> Vec<String> {
    STYLE_TOKEN
        .captures_iter(flat)
        .filter_map(|caps| {
            let m = caps.get(1)?;
            let after = flat[m.end()..].trim_start();
            if after.starts_with("PC") || after.starts_with("USD") {
                None
            } else {
                Some(m.as_str().to_string())
            }
        })
        .collect()
}

/// First occurrence of `token` in `text` bounded by non-alphanumeric
/// neighbours.
fn find_token(text: &str, token: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(rel) = text[from..].find(token) {
        let start = from + rel;
        let end = start + token.len();
        let prev_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let next_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if prev_ok && next_ok {
            return Some(start);
        }
        from = start + 1;
    }
    None
}
