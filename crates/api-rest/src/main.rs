//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, without the workspace's `docstory-run` wrapper.
//!
//! ## Intended use
//! Useful for development and debugging. Configuration is read from the environment (after
//! loading `.env`); see `docstory_core::Settings` for the variables.

use api_rest::AppState;
use docstory_core::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the Docstory REST API server
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - an environment variable holds an invalid value,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    api_rest::serve(AppState::from_settings(settings)).await
}
