use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::state::AppState;
use crate::upload::{ConvertForm, JiraCreateForm, UploadForm};
use api_shared::{
    clean_csv, clean_field_id, BulkConvertRequest, BulkConvertResult, BulkMode, ConvertResult,
    Health, HealthService, IssueTypesRes, JiraCreateResponse, JiraField,
};
use docstory_core::parse_story;
use docstory_extract::decode_base64;
use docstory_tracker::CustomFieldIds;

pub type ApiError = (StatusCode, String);

fn internal(err: impl std::fmt::Display) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

/// Runs extraction on the blocking pool; OCR and PDF parsing are CPU- and process-bound.
async fn extract(state: &AppState, filename: String, bytes: Vec<u8>) -> Result<String, ApiError> {
    let extractor = state.extractor.clone();
    tokio::task::spawn_blocking(move || extractor.extract(&filename, &bytes))
        .await
        .map_err(|e| {
            tracing::error!("Extraction task failed: {:?}", e);
            internal(e)
        })
}

async fn convert_upload(
    state: &AppState,
    form: &UploadForm,
    project_key: &str,
) -> Result<ConvertResult, ApiError> {
    let raw = extract(state, form.filename.clone(), form.bytes.clone()).await?;
    let labels = clean_csv(form.text("default_labels"), state.placeholder());
    let components = clean_csv(form.text("default_components"), state.placeholder());
    let parsed = parse_story(&raw, project_key, &labels, &components, &state.parse_options());
    Ok(ConvertResult::new(parsed, raw))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = Health)
    )
)]
/// Liveness probe.
pub async fn health() -> Json<Health> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/convert",
    request_body(content = ConvertForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Parsed story", body = ConvertResult),
        (status = 400, description = "Bad request")
    )
)]
/// Extract text from an uploaded document and parse it into a story
///
/// Nothing is sent to Jira. The extracted text is returned alongside the story so callers can
/// see what the parser worked from.
#[axum::debug_handler]
pub async fn convert(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ConvertResult>, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let project_key = form.required("project_key")?.to_owned();
    let result = convert_upload(&state, &form, &project_key).await?;
    tracing::info!(
        filename = %form.filename,
        summary = %result.story.summary,
        "converted document"
    );
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/jira/fields",
    responses(
        (status = 200, description = "All Jira fields", body = [JiraField]),
        (status = 500, description = "Jira not configured or request failed")
    )
)]
/// List every field on the Jira site, e.g. to find custom-field ids
#[axum::debug_handler]
pub async fn jira_fields(State(state): State<AppState>) -> Result<Json<Vec<JiraField>>, ApiError> {
    let tracker = state.tracker().map_err(internal)?;
    match tracker.list_fields().await {
        Ok(fields) => Ok(Json(fields.into_iter().map(JiraField::from).collect())),
        Err(e) => {
            tracing::error!("List Jira fields error: {:?}", e);
            Err(internal(e))
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IssueTypesQuery {
    /// Jira project key, e.g. `ACME`.
    pub project_key: String,
}

#[utoipa::path(
    get,
    path = "/jira/issue-types",
    params(IssueTypesQuery),
    responses(
        (status = 200, description = "Issue types available in the project", body = IssueTypesRes),
        (status = 500, description = "Jira not configured or request failed")
    )
)]
/// List the issue types a project accepts
#[axum::debug_handler]
pub async fn jira_issue_types(
    State(state): State<AppState>,
    Query(query): Query<IssueTypesQuery>,
) -> Result<Json<IssueTypesRes>, ApiError> {
    let tracker = state.tracker().map_err(internal)?;
    match tracker.list_project_issue_types(&query.project_key).await {
        Ok(issuetypes) => Ok(Json(IssueTypesRes {
            project_key: query.project_key,
            issuetypes,
        })),
        Err(e) => {
            tracing::error!("List issue types error: {:?}", e);
            Err(internal(e))
        }
    }
}

#[utoipa::path(
    post,
    path = "/jira/create",
    request_body(content = JiraCreateForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Issue created", body = JiraCreateResponse),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Jira not configured or rejected the issue")
    )
)]
/// Convert an uploaded document and create the resulting story in Jira
#[axum::debug_handler]
pub async fn jira_create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<JiraCreateResponse>, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let project_key = form.required("project_key")?.to_owned();
    let tracker = state.tracker().map_err(internal)?;

    let issuetype = form
        .text("issuetype_name")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(state.settings.default_issuetype.as_str())
        .to_owned();

    let result = convert_upload(&state, &form, &project_key).await?;
    let story = result.story.with_issue_type(issuetype);

    let placeholder = state.placeholder();
    let custom_fields = CustomFieldIds {
        story_points: clean_field_id(form.text("story_points_cf"), placeholder),
        epic_link: clean_field_id(form.text("epic_link_cf"), placeholder),
        epic_name: clean_field_id(form.text("epic_name_cf"), placeholder),
    };

    match tracker.create_issue(&story, &custom_fields).await {
        Ok(created) => Ok(Json(JiraCreateResponse {
            key: created.key,
            self_url: created.self_url,
            story,
        })),
        Err(e) => {
            tracing::error!("Create Jira issue error: {:?}", e);
            Err(internal(e))
        }
    }
}

#[utoipa::path(
    post,
    path = "/bulk/convert",
    request_body = BulkConvertRequest,
    responses(
        (status = 200, description = "One parsed story per file", body = BulkConvertResult),
        (status = 400, description = "Bad request")
    )
)]
/// Convert several documents at once
///
/// `files[i]` holds the content of `filenames[i]`: base64 (optionally a `data:` URI) in
/// `base64` mode, or a server-side path in `path` mode.
#[axum::debug_handler]
pub async fn bulk_convert(
    State(state): State<AppState>,
    Json(req): Json<BulkConvertRequest>,
) -> Result<Json<BulkConvertResult>, ApiError> {
    if req.filenames.len() != req.files.len() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!(
                "filenames and files differ in length ({} vs {})",
                req.filenames.len(),
                req.files.len()
            ),
        ));
    }

    let options = state.parse_options();
    let mut items = Vec::with_capacity(req.files.len());
    for (filename, file) in req.filenames.into_iter().zip(req.files) {
        let bytes = match req.mode {
            BulkMode::Base64 => decode_base64(&file)
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("{filename}: {e}")))?,
            BulkMode::Path => tokio::fs::read(&file)
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("{file}: {e}")))?,
        };
        let raw = extract(&state, filename, bytes).await?;
        let parsed = parse_story(&raw, &req.project_key, &[], &[], &options);
        items.push(ConvertResult::new(parsed, raw));
    }

    tracing::info!(count = items.len(), "bulk converted documents");
    Ok(Json(BulkConvertResult { items }))
}
