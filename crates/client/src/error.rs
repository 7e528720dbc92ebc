use morph_protocol::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MorphError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl MorphError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Failure while delivering a response document to the remote service.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("response rejected with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("transport failure: {0}")]
    Backend(#[source] anyhow::Error),
    #[error("submission cancelled")]
    Cancelled,
    #[error("failed to encode response document: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SubmissionError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
