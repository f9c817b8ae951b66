use crate::error::{TrackerError, TrackerResult};
use docstory_core::constants::DEFAULT_ISSUE_TYPE;
use docstory_core::Settings;
use serde::{Deserialize, Serialize};

/// Connection details and field policy for one Jira site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Site root without a trailing slash, e.g. `https://acme.atlassian.net`.
    pub base_url: String,
    pub email: String,
    pub api_token: String,
    pub default_issuetype: String,
    pub send_priority: bool,
    pub send_components: bool,
    pub placeholder_literal: String,
}

impl TrackerConfig {
    /// Builds the tracker config, failing when any credential is missing.
    pub fn from_settings(settings: &Settings) -> TrackerResult<Self> {
        let (Some(base_url), Some(email), Some(api_token)) = (
            settings.jira_base.as_deref(),
            settings.jira_email.as_deref(),
            settings.jira_api_token.as_deref(),
        ) else {
            return Err(TrackerError::NotConfigured);
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            email: email.to_owned(),
            api_token: api_token.to_owned(),
            default_issuetype: settings.default_issuetype.clone(),
            send_priority: settings.send_priority,
            send_components: settings.send_components,
            placeholder_literal: settings.ignore_placeholder_literal.clone(),
        })
    }

    /// Blank values and the placeholder literal (case-insensitive) count as "not provided".
    pub fn is_unset(&self, value: &str) -> bool {
        let value = value.trim();
        value.is_empty() || value.eq_ignore_ascii_case(&self.placeholder_literal)
    }

    /// Issue type used when a story does not name one.
    pub fn fallback_issuetype(&self) -> &str {
        let configured = self.default_issuetype.trim();
        if configured.is_empty() {
            DEFAULT_ISSUE_TYPE
        } else {
            configured
        }
    }
}

/// Site-specific custom field ids, e.g. `customfield_10016`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldIds {
    #[serde(default)]
    pub story_points: Option<String>,
    #[serde(default)]
    pub epic_link: Option<String>,
    #[serde(default)]
    pub epic_name: Option<String>,
}
