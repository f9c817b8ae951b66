//! Per-line field classification.
//!
//! [`classify_field`] turns a trimmed line into a [`FieldLine`] when it is an explicit
//! `Field: value` declaration. Field rules are tried in a fixed order and the first match wins,
//! so a line is never counted as two fields.

use crate::patterns;

/// An explicit field declaration found on a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldLine {
    Title(String),
    Labels(Vec<String>),
    Components(Vec<String>),
    Priority(String),
    /// A points line; `None` when the literal did not parse as a number.
    StoryPoints(Option<f64>),
    EpicLink(String),
}

type FieldRule = fn(&str) -> Option<FieldLine>;

fn labels_rule(line: &str) -> Option<FieldLine> {
    patterns::labels(line).map(FieldLine::Labels)
}

fn components_rule(line: &str) -> Option<FieldLine> {
    patterns::components(line).map(FieldLine::Components)
}

fn priority_rule(line: &str) -> Option<FieldLine> {
    patterns::priority(line).map(FieldLine::Priority)
}

fn story_points_rule(line: &str) -> Option<FieldLine> {
    patterns::story_points(line).map(FieldLine::StoryPoints)
}

fn epic_link_rule(line: &str) -> Option<FieldLine> {
    patterns::epic_link(line).map(FieldLine::EpicLink)
}

/// Precedence order for field declarations after the title.
const FIELD_RULES: [FieldRule; 5] = [
    labels_rule,
    components_rule,
    priority_rule,
    story_points_rule,
    epic_link_rule,
];

/// Classifies a trimmed line as an explicit field declaration.
///
/// The title rule only applies while `title_open` is set, i.e. until the first title has been
/// captured. Later `Title:` lines fall through to the remaining rules.
pub fn classify_field(line: &str, title_open: bool) -> Option<FieldLine> {
    if title_open {
        if let Some(title) = patterns::title(line) {
            return Some(FieldLine::Title(title));
        }
    }
    FIELD_RULES.iter().find_map(|rule| rule(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_only_while_open() {
        assert_eq!(
            classify_field("Title: First", true),
            Some(FieldLine::Title("First".into()))
        );
        assert_eq!(classify_field("Title: Second", false), None);
    }

    #[test]
    fn test_empty_title_is_still_a_title_line() {
        assert_eq!(
            classify_field("Title:", true),
            Some(FieldLine::Title(String::new()))
        );
        assert_eq!(classify_field("Summary:", true), Some(FieldLine::Title(String::new())));
    }

    #[test]
    fn test_field_order() {
        assert_eq!(
            classify_field("Labels: a, b", true),
            Some(FieldLine::Labels(vec!["a".into(), "b".into()]))
        );
        assert_eq!(
            classify_field("Components: Web", true),
            Some(FieldLine::Components(vec!["Web".into()]))
        );
        assert_eq!(
            classify_field("Priority: High", true),
            Some(FieldLine::Priority("high".into()))
        );
        assert_eq!(
            classify_field("SP: 2", true),
            Some(FieldLine::StoryPoints(Some(2.0)))
        );
        assert_eq!(
            classify_field("Epic: ABC-1", true),
            Some(FieldLine::EpicLink("ABC-1".into()))
        );
    }

    #[test]
    fn test_malformed_points_still_classified() {
        assert_eq!(
            classify_field("Points: 1..2.", true),
            Some(FieldLine::StoryPoints(None))
        );
    }

    #[test]
    fn test_prose_is_not_a_field() {
        assert_eq!(classify_field("As a user I want labels: yes", true), None);
        assert_eq!(classify_field("Some context here", true), None);
    }
}
