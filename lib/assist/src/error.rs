use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssistError>;

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Completion endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion timed out after {0:?}")]
    Timeout(Duration),

    #[error("Completion response had no content")]
    EmptyResponse,
}
