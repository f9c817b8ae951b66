//! Acceptance-criteria normalisation.
//!
//! Raw lines collected from acceptance-criteria blocks are grouped into criteria (a blank line
//! closes the current criterion), Given/When/Then/And prefixes are rewritten into a uniform
//! `Role: rest` form, and the result is de-duplicated case-insensitively.

use crate::constants::MIN_CRITERION_CHARS;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref RE_GWT_LINE: Regex = Regex::new(r"(?i)^(given|when|then|and)\b[:\-\s]*(.+)$").unwrap();
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Rewrites `given a user` as `Given: a user`; other lines are returned trimmed.
fn normalise_line(line: &str) -> String {
    match RE_GWT_LINE.captures(line) {
        Some(caps) => format!("{}: {}", title_case(&caps[1]), caps[2].trim()),
        None => line.to_owned(),
    }
}

/// Groups raw block lines into distinct, non-trivial acceptance criteria.
///
/// Lines between blank separators are joined with single spaces. Criteria whose trimmed length
/// is at most [`MIN_CRITERION_CHARS`] are dropped, and later duplicates (compared
/// case-insensitively) are discarded in favour of the first occurrence.
pub fn normalize_acceptance_criteria<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut grouped = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for raw in lines {
        let line = raw.as_ref().trim();
        if line.is_empty() {
            if !current.is_empty() {
                grouped.push(current.join(" "));
                current.clear();
            }
            continue;
        }
        current.push(normalise_line(line));
    }
    if !current.is_empty() {
        grouped.push(current.join(" "));
    }

    let mut seen = HashSet::new();
    grouped
        .into_iter()
        .filter(|criterion| criterion.trim().chars().count() > MIN_CRITERION_CHARS)
        .filter(|criterion| seen.insert(criterion.trim().to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_given_line_is_rewritten() {
        let criteria = normalize_acceptance_criteria(&["given a user is logged in", ""]);
        assert_eq!(criteria, vec!["Given: a user is logged in".to_string()]);
    }

    #[test]
    fn test_prefix_separators_are_consumed() {
        let criteria = normalize_acceptance_criteria(&["WHEN: they click save", "and - nothing breaks"]);
        assert_eq!(
            criteria,
            vec!["When: they click save And: nothing breaks".to_string()]
        );
    }

    #[test]
    fn test_lines_without_blank_join_into_one_criterion() {
        let criteria = normalize_acceptance_criteria(&[
            "given 5 failed attempts",
            "then account is locked for 15 minutes",
        ]);
        assert_eq!(
            criteria,
            vec!["Given: 5 failed attempts Then: account is locked for 15 minutes".to_string()]
        );
    }

    #[test]
    fn test_blank_lines_separate_criteria() {
        let criteria = normalize_acceptance_criteria(&["Export works", "", "", "Import works"]);
        assert_eq!(criteria, vec!["Export works".to_string(), "Import works".to_string()]);
    }

    #[test]
    fn test_case_insensitive_duplicates_removed() {
        let criteria =
            normalize_acceptance_criteria(&["Shows a banner", "", "  shows A BANNER  ", ""]);
        assert_eq!(criteria, vec!["Shows a banner".to_string()]);
    }

    #[test]
    fn test_short_criteria_dropped() {
        let criteria = normalize_acceptance_criteria(&["ok", "", "yes", "", "done!"]);
        assert_eq!(criteria, vec!["done!".to_string()]);
    }

    #[test]
    fn test_non_prefix_words_are_left_alone() {
        let criteria = normalize_acceptance_criteria(&["Andromeda view renders"]);
        assert_eq!(criteria, vec!["Andromeda view renders".to_string()]);
    }

    #[test]
    fn test_empty_input() {
        let lines: [&str; 0] = [];
        assert!(normalize_acceptance_criteria(&lines).is_empty());
    }
}
