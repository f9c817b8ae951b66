use docstory_core::{ParseOptions, Settings};
use docstory_extract::TextExtractor;
use docstory_tracker::{JiraClient, TrackerConfig, TrackerError};
use std::sync::Arc;

/// Application state shared by every handler.
///
/// Built once from [`Settings`] at startup. `tracker` is `None` when Jira credentials are not
/// configured; tracker endpoints then answer with the configuration error.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub extractor: Arc<TextExtractor>,
    pub tracker: Option<JiraClient>,
}

impl AppState {
    pub fn from_settings(settings: Settings) -> Self {
        let tracker = match TrackerConfig::from_settings(&settings).and_then(JiraClient::new) {
            Ok(client) => Some(client),
            Err(TrackerError::NotConfigured) => {
                tracing::info!("Jira credentials not set; tracker endpoints disabled");
                None
            }
            Err(e) => {
                tracing::warn!("Jira client unavailable: {}", e);
                None
            }
        };

        Self {
            extractor: Arc::new(TextExtractor::from_settings(&settings)),
            settings: Arc::new(settings),
            tracker,
        }
    }

    pub fn tracker(&self) -> Result<&JiraClient, TrackerError> {
        self.tracker.as_ref().ok_or(TrackerError::NotConfigured)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default().with_max_chars(self.settings.max_text_chars)
    }

    pub fn placeholder(&self) -> &str {
        &self.settings.ignore_placeholder_literal
    }
}
