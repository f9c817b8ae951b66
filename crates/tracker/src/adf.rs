//! Minimal Atlassian Document Format (ADF) builders.
//!
//! Jira Cloud's v3 API only accepts rich-text fields as ADF documents. The shapes produced here
//! are the smallest set Jira accepts: paragraphs, a heading and a bullet list.

use serde_json::{json, Value};

const ACCEPTANCE_HEADING: &str = "Acceptance Criteria";

/// A paragraph holding `text` with trailing whitespace removed; blank text gives an empty paragraph.
pub fn paragraph(text: &str) -> Value {
    let text = text.trim_end();
    if text.is_empty() {
        json!({ "type": "paragraph" })
    } else {
        json!({ "type": "paragraph", "content": [{ "type": "text", "text": text }] })
    }
}

pub fn heading(text: &str, level: u8) -> Value {
    json!({
        "type": "heading",
        "attrs": { "level": level },
        "content": [{ "type": "text", "text": text }],
    })
}

pub fn bullet_list<S: AsRef<str>>(items: &[S]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|item| json!({ "type": "listItem", "content": [paragraph(item.as_ref())] }))
        .collect();
    json!({ "type": "bulletList", "content": items })
}

/// Builds an ADF document: one paragraph per description line, then an
/// "Acceptance Criteria" heading and bullet list when criteria exist.
pub fn document<S: AsRef<str>>(description: &str, acceptance: &[S]) -> Value {
    let mut content: Vec<Value> = description.lines().map(paragraph).collect();
    if content.is_empty() {
        // Jira rejects an empty document body.
        content.push(json!({ "type": "paragraph", "content": [{ "type": "text", "text": " " }] }));
    }
    if !acceptance.is_empty() {
        content.push(heading(ACCEPTANCE_HEADING, 3));
        content.push(bullet_list(acceptance));
    }
    json!({ "type": "doc", "version": 1, "content": content })
}
