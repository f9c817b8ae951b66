use crate::constants::DEFAULT_MAX_TEXT_CHARS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Knobs for a single [`crate::parse_story`] call.
///
/// Every field has a default, so callers can deserialise a partial mapping such as
/// `{"max_chars": 1000}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ParseOptions {
    /// Token to priority-name overrides consulted before the built-in table.
    pub priority_map: BTreeMap<String, String>,
    /// Maximum description length in characters before truncation.
    pub max_chars: usize,
    /// Turn `#tags` in prose into labels.
    pub label_hashtags: bool,
    /// Pick up "3 points" style mentions when no explicit points line exists.
    pub detect_points_from_text: bool,
    /// Pick up "p1"/"critical" style mentions when no explicit priority line exists.
    pub detect_priority_from_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            priority_map: BTreeMap::new(),
            max_chars: DEFAULT_MAX_TEXT_CHARS,
            label_hashtags: true,
            detect_points_from_text: true,
            detect_priority_from_text: true,
        }
    }
}

impl ParseOptions {
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_mapping_keeps_defaults() {
        let options: ParseOptions = serde_json::from_str(r#"{"max_chars": 1000}"#).unwrap();
        assert_eq!(options.max_chars, 1000);
        assert!(options.label_hashtags);
        assert!(options.detect_points_from_text);
        assert!(options.detect_priority_from_text);
        assert!(options.priority_map.is_empty());
    }
}
