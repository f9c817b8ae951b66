//! Line patterns recognised in free-form story documents.
//!
//! Every function here looks at one trimmed line and either extracts a value or reports a match.
//! They are independent of one another; the order in which they are tried is decided by
//! [`crate::classify`].

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_TITLE: Regex = Regex::new(r"(?i)^(title|summary)\s*:\s*(.*)$").unwrap();
    static ref RE_LABELS: Regex = Regex::new(r"(?i)^labels?\s*:\s*(.+)$").unwrap();
    static ref RE_COMPONENTS: Regex = Regex::new(r"(?i)^components?\s*:\s*(.+)$").unwrap();
    static ref RE_PRIORITY: Regex = Regex::new(r"(?i)^priority\s*:\s*(.+)$").unwrap();
    static ref RE_POINTS: Regex =
        Regex::new(r"(?i)^(story points|sp|points)\s*:\s*([\d\.]+)$").unwrap();
    static ref RE_EPIC: Regex = Regex::new(r"(?i)^(epic|epic link)\s*:\s*(.+)$").unwrap();
    static ref RE_ACCEPTANCE: Regex =
        Regex::new(r"(?i)^(acceptance criteria|ac|criteria)\s*:\s*$").unwrap();
    static ref RE_USER_STORY: Regex = Regex::new(r"(?i)^(as\s+an?|as\s+the).+").unwrap();
    static ref RE_POINTS_INLINE: Regex =
        Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(story\s*points?|points?)\b").unwrap();
    static ref RE_PRIORITY_INLINE: Regex =
        Regex::new(r"(?i)\b(p0|p1|p2|p3|sev1|sev2|sev3|sev4|critical|high|medium|low)\b").unwrap();
    static ref RE_HASHTAG: Regex = Regex::new(r"(?:^|\s)#([A-Za-z0-9_\-]+)").unwrap();
}

/// Splits a comma-separated value into trimmed, non-empty tokens.
pub fn comma_words(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

fn capture<'a>(re: &Regex, line: &'a str, group: usize) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str().trim())
}

/// `Title: ...` / `Summary: ...`. Returns the trimmed value with its original case; a line of
/// only whitespace after the colon yields an empty value.
pub fn title(line: &str) -> Option<String> {
    capture(&RE_TITLE, line, 2).map(str::to_owned)
}

/// `Label: a, b` / `Labels: a, b`. Tokens are lowercased.
pub fn labels(line: &str) -> Option<Vec<String>> {
    capture(&RE_LABELS, line, 1).map(|value| comma_words(&value.to_lowercase()))
}

/// `Component: A, B` / `Components: A, B`. Tokens keep their case.
pub fn components(line: &str) -> Option<Vec<String>> {
    capture(&RE_COMPONENTS, line, 1).map(comma_words)
}

/// `Priority: P1`. Returns the raw token, lowercased.
pub fn priority(line: &str) -> Option<String> {
    capture(&RE_PRIORITY, line, 1).map(str::to_lowercase)
}

/// `Story Points: 3` / `SP: 3` / `Points: 3`.
///
/// The outer `Option` reports whether the line is a points line at all; the inner one is `None`
/// when the captured literal is not a valid number (for example `1.2.3`).
pub fn story_points(line: &str) -> Option<Option<f64>> {
    capture(&RE_POINTS, line, 2).map(|literal| literal.parse::<f64>().ok())
}

/// `Epic: KEY-1` / `Epic Link: KEY-1`.
pub fn epic_link(line: &str) -> Option<String> {
    capture(&RE_EPIC, line, 2)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Header opening an acceptance-criteria block: `Acceptance Criteria:`, `AC:` or `Criteria:`
/// with nothing after the colon.
pub fn is_acceptance_header(line: &str) -> bool {
    RE_ACCEPTANCE.is_match(line)
}

/// Lines in the classic "As a ... I want ..." form.
pub fn is_user_story(line: &str) -> bool {
    RE_USER_STORY.is_match(line)
}

/// First "<n> points" / "<n> story points" mention anywhere in the line.
pub fn inline_story_points(line: &str) -> Option<f64> {
    RE_POINTS_INLINE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// First whole-word priority token (`p0`..`p3`, `sev1`..`sev4`, `critical`, `high`, `medium`,
/// `low`), lowercased.
pub fn inline_priority(line: &str) -> Option<String> {
    RE_PRIORITY_INLINE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// Every `#tag` in the line, lowercased, in order of appearance.
pub fn hashtags(line: &str) -> Vec<String> {
    RE_HASHTAG
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_summary_keep_case() {
        assert_eq!(title("Title: Add login throttling").as_deref(), Some("Add login throttling"));
        assert_eq!(title("SUMMARY :  Export CSV ").as_deref(), Some("Export CSV"));
        assert_eq!(title("Title:   ").as_deref(), Some(""));
        assert_eq!(title("Subtitle: nope"), None);
    }

    #[test]
    fn test_labels_are_lowercased_and_split() {
        assert_eq!(
            labels("Labels: Security, , Backend ").unwrap(),
            vec!["security".to_string(), "backend".to_string()]
        );
        assert_eq!(labels("label: ux").unwrap(), vec!["ux".to_string()]);
    }

    #[test]
    fn test_components_keep_case() {
        assert_eq!(
            components("Components: Auth Service, API").unwrap(),
            vec!["Auth Service".to_string(), "API".to_string()]
        );
    }

    #[test]
    fn test_priority_token_lowercased() {
        assert_eq!(priority("Priority: P1").as_deref(), Some("p1"));
        assert_eq!(priority("priority:"), None);
    }

    #[test]
    fn test_story_points_line() {
        assert_eq!(story_points("Story Points: 5"), Some(Some(5.0)));
        assert_eq!(story_points("sp: 0.5"), Some(Some(0.5)));
        assert_eq!(story_points("Points: 1.2.3"), Some(None));
        assert_eq!(story_points("Points: three"), None);
    }

    #[test]
    fn test_epic_link_variants() {
        assert_eq!(epic_link("Epic: PROJ-12").as_deref(), Some("PROJ-12"));
        assert_eq!(epic_link("Epic Link: PROJ-7").as_deref(), Some("PROJ-7"));
    }

    #[test]
    fn test_acceptance_header_requires_empty_value() {
        assert!(is_acceptance_header("Acceptance Criteria:"));
        assert!(is_acceptance_header("AC :"));
        assert!(is_acceptance_header("criteria:"));
        assert!(!is_acceptance_header("AC: see below"));
    }

    #[test]
    fn test_user_story_lead_phrases() {
        assert!(is_user_story("As a user"));
        assert!(is_user_story("as an admin I want"));
        assert!(is_user_story("As the owner"));
        assert!(!is_user_story("Assuming nothing"));
        assert!(!is_user_story("I want things"));
    }

    #[test]
    fn test_inline_story_points() {
        assert_eq!(inline_story_points("Estimate is 8 story points."), Some(8.0));
        assert_eq!(inline_story_points("about 2.5points"), Some(2.5));
        assert_eq!(inline_story_points("checkpoints 3"), None);
    }

    #[test]
    fn test_inline_priority_whole_word_only() {
        assert_eq!(inline_priority("This is a Critical bug").as_deref(), Some("critical"));
        assert_eq!(inline_priority("sev2 incident").as_deref(), Some("sev2"));
        assert_eq!(inline_priority("highlights only"), None);
    }

    #[test]
    fn test_hashtags_collects_every_tag() {
        assert_eq!(
            hashtags("#Auth work for #mobile-app and #ux_2 but not issue#4"),
            vec!["auth".to_string(), "mobile-app".to_string(), "ux_2".to_string()]
        );
    }

    #[test]
    fn test_comma_words_drops_blanks() {
        assert_eq!(comma_words(" a ,, b,"), vec!["a".to_string(), "b".to_string()]);
    }
}
