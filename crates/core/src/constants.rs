//! Constants used throughout the docstory core crate.
//!
//! Field limits, fallback values and the markers written into generated descriptions live here
//! so the parser, the tracker payload builder and the HTTP layer agree on them.

/// Maximum number of characters a story summary may hold.
pub const SUMMARY_MAX_CHARS: usize = 255;

/// Summary used when a document yields no usable title line at all.
pub const FALLBACK_SUMMARY: &str = "Generated Story";

/// Appended to a description that was cut at `max_chars`.
pub const TRUNCATION_MARKER: &str = "\n\n[...truncated...]";

/// Default clamp applied to generated descriptions.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 400_000;

/// Priority label used for tokens that neither the override table nor the built-in table know.
pub const DEFAULT_PRIORITY: &str = "Medium";

/// Acceptance criteria at or below this many characters are treated as noise.
pub const MIN_CRITERION_CHARS: usize = 3;

/// Heading for the section holding "As a ..." lines.
pub const USER_STORY_HEADING: &str = "### User Story";

/// Heading for the section holding generic prose lines.
pub const DETAILS_HEADING: &str = "### Details / Context";

/// Heading for the section listing normalised acceptance criteria.
pub const ACCEPTANCE_HEADING: &str = "### Acceptance Criteria";

/// Issue type used when neither the caller nor the configuration names one.
pub const DEFAULT_ISSUE_TYPE: &str = "Story";

/// Form value that API explorers send for untouched string fields.
pub const DEFAULT_PLACEHOLDER_LITERAL: &str = "string";
