use crate::config::{CustomFieldIds, TrackerConfig};
use crate::error::{TrackerError, TrackerResult};
use crate::payload::issue_payload;
use docstory_core::StoryRecord;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-request timeout for every Jira call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response body of a successful issue creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedIssue {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
}

/// One entry of `GET /rest/api/3/field`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraField {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub schema: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct CreateMeta {
    #[serde(default)]
    projects: Vec<CreateMetaProject>,
}

#[derive(Debug, Default, Deserialize)]
struct CreateMetaProject {
    #[serde(default)]
    issuetypes: Vec<CreateMetaIssueType>,
}

#[derive(Debug, Default, Deserialize)]
struct CreateMetaIssueType {
    #[serde(default)]
    name: Option<String>,
}

/// Async Jira Cloud client using basic auth (account email + API token).
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    config: TrackerConfig,
}

impl JiraClient {
    pub fn new(config: TrackerConfig) -> TrackerResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.url(path))
            .basic_auth(&self.config.email, Some(&self.config.api_token))
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> TrackerResult<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TrackerError::Api {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .await
            .map_err(|e| TrackerError::Parse(e.to_string()))
    }

    /// Creates an issue for `story`. Anything other than 200/201 is an API error.
    pub async fn create_issue(
        &self,
        story: &StoryRecord,
        custom_fields: &CustomFieldIds,
    ) -> TrackerResult<CreatedIssue> {
        let payload = issue_payload(story, custom_fields, &self.config);
        let response = self
            .http
            .post(self.url("/rest/api/3/issue"))
            .basic_auth(&self.config.email, Some(&self.config.api_token))
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 && status != 201 {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status, %message, "Jira rejected issue creation");
            return Err(TrackerError::Api { status, message });
        }

        let created: CreatedIssue = response
            .json()
            .await
            .map_err(|e| TrackerError::Parse(e.to_string()))?;
        tracing::info!(key = %created.key, "created Jira issue");
        Ok(created)
    }

    pub async fn list_fields(&self) -> TrackerResult<Vec<JiraField>> {
        let response = self.get("/rest/api/3/field").send().await?;
        Self::read_json(response).await
    }

    /// Issue-type names available in `project_key`, unique in first-seen order.
    pub async fn list_project_issue_types(&self, project_key: &str) -> TrackerResult<Vec<String>> {
        let response = self
            .get("/rest/api/3/issue/createmeta")
            .query(&[("projectKeys", project_key)])
            .send()
            .await?;
        let meta: CreateMeta = Self::read_json(response).await?;

        let mut names: Vec<String> = Vec::new();
        for name in meta
            .projects
            .into_iter()
            .flat_map(|project| project.issuetypes)
            .filter_map(|issuetype| issuetype.name)
            .filter(|name| !name.is_empty())
        {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Raw user records matching `email`.
    pub async fn search_user_by_email(&self, email: &str) -> TrackerResult<Vec<serde_json::Value>> {
        let response = self
            .get("/rest/api/3/user/search")
            .query(&[("query", email)])
            .send()
            .await?;
        Self::read_json(response).await
    }
}
