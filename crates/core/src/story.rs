use crate::summary::Summary;
use serde::{Deserialize, Serialize};

/// A story parsed out of one document, shaped for an issue tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StoryRecord {
    pub project_key: String,
    pub summary: Summary,
    pub description: String,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    /// Lowercase, de-duplicated, sorted.
    #[serde(default)]
    pub labels: Vec<String>,
    /// De-duplicated, sorted.
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub story_points: Option<f64>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub epic_link: Option<String>,
    #[serde(default)]
    pub assignee_account_id: Option<String>,
    #[serde(default)]
    pub issuetype_name: Option<String>,
    #[serde(default)]
    pub epic_name: Option<String>,
}

impl StoryRecord {
    pub fn with_issue_type(mut self, issuetype_name: impl Into<String>) -> Self {
        self.issuetype_name = Some(issuetype_name.into());
        self
    }

    pub fn with_epic_name(mut self, epic_name: impl Into<String>) -> Self {
        self.epic_name = Some(epic_name.into());
        self
    }
}

/// What the parser noticed while building a [`StoryRecord`]. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Diagnostics {
    pub found_user_story_lines: usize,
    pub ac_count: usize,
    pub labels_auto: Vec<String>,
    pub priority_token: Option<String>,
    pub story_points_detected: Option<f64>,
}

/// Result of [`crate::parse_story`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStory {
    pub story: StoryRecord,
    pub diagnostics: Diagnostics,
}
