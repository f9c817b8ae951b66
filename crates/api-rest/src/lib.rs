//! # API REST
//!
//! REST API implementation for Docstory.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (multipart uploads, JSON serialization, CORS)
//!
//! Uses `api-shared` for wire models and form cleaning.

#![warn(rust_2018_idioms)]

pub mod handlers;
pub mod state;
pub mod upload;

pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    BulkConvertRequest, BulkConvertResult, BulkMode, ConvertResult, Health, IssueTypesRes,
    JiraCreateResponse, JiraField,
};
use docstory_core::{Diagnostics, StoryRecord, Summary};
use upload::{ConvertForm, JiraCreateForm};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::convert,
        handlers::jira_fields,
        handlers::jira_issue_types,
        handlers::jira_create,
        handlers::bulk_convert,
    ),
    components(schemas(
        Health,
        ConvertResult,
        ConvertForm,
        JiraCreateForm,
        JiraCreateResponse,
        JiraField,
        IssueTypesRes,
        BulkMode,
        BulkConvertRequest,
        BulkConvertResult,
        StoryRecord,
        Summary,
        Diagnostics,
    ))
)]
pub struct ApiDoc;

/// Builds the full HTTP application: API routes, Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    let mut openapi = ApiDoc::openapi();
    openapi.info.title = state.settings.api_title.clone();
    openapi.info.version = state.settings.api_version.clone();

    Router::new()
        .route("/health", get(handlers::health))
        .route("/convert", post(handlers::convert))
        .route("/jira/fields", get(handlers::jira_fields))
        .route("/jira/issue-types", get(handlers::jira_issue_types))
        .route("/jira/create", post(handlers::jira_create))
        .route("/bulk/convert", post(handlers::bulk_convert))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `state.settings.rest_addr` and serves [`router`] until the process stops.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = state.settings.rest_addr.clone();
    tracing::info!("++ Starting Docstory REST on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
