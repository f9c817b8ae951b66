use docstory_core::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the Docstory application
///
/// Loads `.env`, resolves [`Settings`] once and serves the REST API (with Swagger UI at
/// `/swagger-ui`) on `DOCSTORY_REST_ADDR` (default `0.0.0.0:8000`).
///
/// # Environment Variables
/// - `DOCSTORY_REST_ADDR`: REST server address
/// - `JIRA_BASE`, `JIRA_EMAIL`, `JIRA_API_TOKEN`: Jira Cloud credentials (optional)
/// - `ENABLE_HTML`, `ENABLE_OCR`, `OCR_LANG`, `MAX_PAGES`, `MAX_TEXT_CHARS`: extraction limits
/// - `RUST_LOG`: log filter
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server itself fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docstory=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    tracing::info!(
        html = settings.enable_html,
        ocr = settings.enable_ocr,
        jira = settings.jira_base.is_some(),
        "loaded settings"
    );

    api_rest::serve(api_rest::AppState::from_settings(settings)).await
}
