/// Errors raised while talking to the issue tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Set JIRA_BASE, JIRA_EMAIL, JIRA_API_TOKEN in .env")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Jira request failed: {status} {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse Jira response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TrackerError::Parse(err.to_string())
        } else {
            TrackerError::Network(err.to_string())
        }
    }
}

pub type TrackerResult<T> = std::result::Result<T, TrackerError>;
