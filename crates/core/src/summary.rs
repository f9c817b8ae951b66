use crate::constants::{FALLBACK_SUMMARY, SUMMARY_MAX_CHARS};
use crate::error::SummaryError;
use crate::text::{squash_spaces, truncate_chars};

/// A story summary: never empty and at most [`SUMMARY_MAX_CHARS`] characters.
///
/// [`Summary::new`] rejects input that breaks either rule; [`Summary::from_line`] instead
/// normalises an arbitrary document line into a valid summary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Summary(String);

impl Summary {
    /// Creates a summary from already-clean text.
    ///
    /// The input is trimmed. Empty input and input longer than [`SUMMARY_MAX_CHARS`] characters
    /// are rejected.
    pub fn new(input: impl AsRef<str>) -> Result<Self, SummaryError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SummaryError::Empty);
        }
        if trimmed.chars().count() > SUMMARY_MAX_CHARS {
            return Err(SummaryError::TooLong {
                max: SUMMARY_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Squashes internal whitespace and cuts the line to [`SUMMARY_MAX_CHARS`] characters.
    ///
    /// Returns `None` when nothing but whitespace is left.
    pub fn from_line(line: &str) -> Option<Self> {
        let squashed = squash_spaces(line);
        let cut = truncate_chars(&squashed, SUMMARY_MAX_CHARS).trim_end();
        if cut.is_empty() {
            None
        } else {
            Some(Self(cut.to_owned()))
        }
    }

    /// The placeholder used when a document has no usable line.
    pub fn fallback() -> Self {
        Self(FALLBACK_SUMMARY.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Summary {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Summary {
    type Error = SummaryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Summary::new(value)
    }
}

impl From<Summary> for String {
    fn from(summary: Summary) -> Self {
        summary.0
    }
}
