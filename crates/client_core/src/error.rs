use shared::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("users service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid users service base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// True when the service could not be reached at all, as opposed to answering with an error.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Http(err) => err.is_connect() || err.is_timeout() || err.is_request(),
            Self::InvalidBaseUrl { .. } => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to save user: {0}")]
    Request(#[from] ClientError),
    #[error("no create or edit form is open")]
    NoOpenForm,
}
