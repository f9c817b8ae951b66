//! Wire models for the HTTP API.

use docstory_core::{Diagnostics, ParsedStory, StoryRecord};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Health {
    pub status: String,
}

/// A parsed story with the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConvertResult {
    pub story: StoryRecord,
    pub raw_text: String,
    pub diagnostics: Diagnostics,
}

impl ConvertResult {
    pub fn new(parsed: ParsedStory, raw_text: String) -> Self {
        Self {
            story: parsed.story,
            raw_text,
            diagnostics: parsed.diagnostics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JiraCreateResponse {
    pub key: String,
    pub self_url: String,
    pub story: StoryRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JiraField {
    pub id: String,
    pub name: String,
    /// Jira's field schema (`type`, `custom`, ...); empty object when Jira omits it.
    #[schema(value_type = Object)]
    pub schema_info: serde_json::Value,
}

impl From<docstory_tracker::JiraField> for JiraField {
    fn from(field: docstory_tracker::JiraField) -> Self {
        Self {
            id: field.id,
            name: field.name,
            schema_info: field
                .schema
                .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IssueTypesRes {
    pub project_key: String,
    pub issuetypes: Vec<String>,
}

/// How `files` in a [`BulkConvertRequest`] are to be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BulkMode {
    /// Each entry is base64 content, optionally with a `data:` URI prefix.
    #[default]
    Base64,
    /// Each entry is a path on the server's filesystem.
    Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BulkConvertRequest {
    #[serde(default)]
    pub mode: BulkMode,
    pub filenames: Vec<String>,
    pub files: Vec<String>,
    pub project_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BulkConvertResult {
    pub items: Vec<ConvertResult>,
}
