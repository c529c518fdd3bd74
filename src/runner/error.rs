use thiserror::Error;

use crate::network::RequestError;

/// Failure raised by a provider while navigating
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl NavigationError {
    pub fn new(message: impl Into<String>) -> Self {
        NavigationError::Message(message.into())
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    /// Payload shape the host cannot present; the listing was ended as failed
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
