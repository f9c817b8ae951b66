use std::process::ExitStatus;

/// Errors raised by the individual readers.
///
/// [`crate::TextExtractor::extract`] never returns these; it folds them into diagnostic text.
/// They surface directly from [`crate::decode_base64`] and the reader functions.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{program} exited with {status}: {stderr}")]
    Command {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{0}")]
    Pdf(String),

    #[error("{0}")]
    Docx(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
