/// Errors raised while resolving [`crate::Settings`] at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when constructing a [`crate::Summary`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SummaryError {
    /// The input was empty or contained only whitespace
    #[error("summary cannot be empty")]
    Empty,
    /// The input was longer than the tracker accepts
    #[error("summary exceeds {max} characters")]
    TooLong { max: usize },
}
