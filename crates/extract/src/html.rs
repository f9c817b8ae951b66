//! HTML to plain text: drop scripts and styles, strip tags, one text run per line.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref RE_HIDDEN: Regex = Regex::new(
        r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<noscript\b.*?</noscript\s*>"
    )
    .unwrap();
    static ref RE_COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref RE_TAG: Regex = Regex::new(r"(?s)<[^>]*>").unwrap();
    static ref RE_ENTITY: Regex = Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap();
}

fn decode_entity(caps: &Captures<'_>) -> String {
    let name = &caps[1];
    let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse().ok().and_then(char::from_u32)
    } else {
        match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some(' '),
            _ => None,
        }
    };
    decoded.map_or_else(|| caps[0].to_owned(), String::from)
}

/// Extracts visible text from an HTML document.
pub fn read_html_bytes(bytes: &[u8]) -> String {
    let html = String::from_utf8_lossy(bytes);
    let visible = RE_HIDDEN.replace_all(&html, "");
    let visible = RE_COMMENT.replace_all(&visible, "");
    let text = RE_TAG.replace_all(&visible, "\n");

    text.lines()
        .map(|line| RE_ENTITY.replace_all(line, decode_entity))
        .map(|line| line.trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
