//! Multipart upload forms.

use axum::extract::Multipart;
use axum::http::StatusCode;
use std::collections::HashMap;
use utoipa::ToSchema;

/// A document upload plus its text form fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub filename: String,
    pub bytes: Vec<u8>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drains a multipart body. The part named `file` is the document; every other part is text.
    pub async fn read(mut multipart: Multipart) -> Result<Self, (StatusCode, String)> {
        let mut form = UploadForm::default();
        let mut saw_file = false;

        while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
            let name = field.name().unwrap_or_default().to_owned();
            if name == "file" {
                form.filename = field.file_name().unwrap_or_default().to_owned();
                form.bytes = field.bytes().await.map_err(bad_request)?.to_vec();
                saw_file = true;
            } else {
                let value = field.text().await.map_err(bad_request)?;
                form.fields.insert(name, value);
            }
        }

        if !saw_file {
            return Err((StatusCode::BAD_REQUEST, "missing form field: file".into()));
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// A text field that must be present and non-blank.
    pub fn required(&self, name: &str) -> Result<&str, (StatusCode, String)> {
        self.text(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("missing form field: {name}")))
    }
}

fn bad_request(err: axum::extract::multipart::MultipartError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

/// `multipart/form-data` body of `POST /convert`.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ConvertForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub project_key: String,
    /// Comma-separated labels added to every story.
    pub default_labels: Option<String>,
    /// Comma-separated components added to every story.
    pub default_components: Option<String>,
}

/// `multipart/form-data` body of `POST /jira/create`.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct JiraCreateForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub project_key: String,
    pub default_labels: Option<String>,
    pub default_components: Option<String>,
    /// e.g. `customfield_10016`
    pub story_points_cf: Option<String>,
    /// e.g. `customfield_10014`
    pub epic_link_cf: Option<String>,
    /// Only used when the issue type is Epic.
    pub epic_name_cf: Option<String>,
    /// Defaults to the configured issue type.
    pub issuetype_name: Option<String>,
}
