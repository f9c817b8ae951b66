//! Small text helpers shared by the story builder.

use crate::constants::TRUNCATION_MARKER;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_HORIZONTAL_SPACE: Regex = Regex::new(r"[ \t]+").unwrap();
}

/// Trims `s` and collapses every run of spaces and tabs into a single space.
pub fn squash_spaces(s: &str) -> String {
    RE_HORIZONTAL_SPACE.replace_all(s.trim(), " ").into_owned()
}

/// Cuts `s` to `max_chars` characters and appends [`TRUNCATION_MARKER`].
///
/// Text that already fits is returned unchanged.
pub fn clamp_text(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &s[..cut], TRUNCATION_MARKER),
        None => s.to_owned(),
    }
}

/// Returns the first `max_chars` characters of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => &s[..cut],
        None => s,
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}

/// Splits `s` into lines with trailing whitespace removed.
///
/// Every Unicode line boundary counts, `\r\n` is a single break, and a trailing break does not
/// produce an extra empty line.
pub fn split_lines(s: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = s;

    while !rest.is_empty() {
        let Some(idx) = rest.find(is_line_break) else {
            lines.push(rest.trim_end());
            break;
        };
        lines.push(rest[..idx].trim_end());

        let mut next = idx + rest[idx..].chars().next().map_or(1, char::len_utf8);
        if rest[idx..].starts_with("\r\n") {
            next += 1;
        }
        rest = &rest[next..];
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squash_spaces_collapses_tabs_and_spaces() {
        assert_eq!(squash_spaces("  Add \t  login   throttling \n"), "Add login throttling");
    }

    #[test]
    fn test_clamp_text_leaves_short_text_alone() {
        assert_eq!(clamp_text("short", 10), "short");
        assert_eq!(clamp_text("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_clamp_text_cuts_at_character_boundary() {
        let clamped = clamp_text("héllo wörld", 5);
        assert_eq!(clamped, format!("héllo{}", TRUNCATION_MARKER));
    }

    #[test]
    fn test_clamp_text_is_stable_for_fitting_text() {
        let once = clamp_text("abc", 3);
        assert_eq!(clamp_text(&once, 3), once);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
    }

    #[test]
    fn test_split_lines_handles_mixed_breaks() {
        assert_eq!(
            split_lines("one  \r\ntwo\rthree\n\nfour\n"),
            vec!["one", "two", "three", "", "four"]
        );
    }

    #[test]
    fn test_split_lines_empty_input() {
        assert!(split_lines("").is_empty());
    }
}
