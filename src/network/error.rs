use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Name of the error kind a failed request is surfaced as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorKind(&'static str);

impl ErrorKind {
    pub const REQUEST: ErrorKind = ErrorKind("RequestError");
    pub const INVALID_JSON: ErrorKind = ErrorKind("InvalidJsonError");
    pub const LOGIN: ErrorKind = ErrorKind("LoginError");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl Default for ErrorKind {
    fn default() -> Self {
        Self::REQUEST
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    /// Connect, DNS, reset, timeout or request build failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Final non-success status after any retries
    #[error("{status} for url: {url}")]
    Status {
        status: StatusCode,
        url: String,
        body: Option<String>,
    },

    /// Response did not have the expected shape
    #[error("{message}")]
    InvalidResponse {
        message: String,
        body: Option<String>,
    },

    /// Error raised on behalf of the caller, chained to the original failure
    #[error("{message}")]
    Raised {
        kind: ErrorKind,
        message: String,
        #[source]
        source: Option<Box<RequestError>>,
    },
}

pub type Result<T> = std::result::Result<T, RequestError>;

impl RequestError {
    pub fn raised(kind: ErrorKind, message: impl Into<String>) -> Self {
        RequestError::Raised {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_response(message: impl Into<String>, body: Option<String>) -> Self {
        RequestError::InvalidResponse {
            message: message.into(),
            body,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::Raised { kind, .. } => *kind,
            RequestError::InvalidResponse { .. } => ErrorKind::INVALID_JSON,
            _ => ErrorKind::REQUEST,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Transport(error) => error.status(),
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Body of the response the failure carried, if any
    pub fn response_body(&self) -> Option<&str> {
        match self {
            RequestError::Status { body, .. } | RequestError::InvalidResponse { body, .. } => {
                body.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RequestError::Transport(_))
    }

    /// Attach `original` as the cause of this error
    pub fn caused_by(self, original: RequestError) -> RequestError {
        match self {
            RequestError::Raised {
                kind,
                message,
                source: None,
            } => RequestError::Raised {
                kind,
                message,
                source: Some(Box::new(original)),
            },
            other => RequestError::Raised {
                kind: other.kind(),
                message: other.to_string(),
                source: Some(Box::new(original)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn status_error() -> RequestError {
        RequestError::Status {
            status: StatusCode::BAD_GATEWAY,
            url: "https://example.com/api".to_string(),
            body: Some("upstream down".to_string()),
        }
    }

    #[test]
    fn test_status_display_and_body() {
        let error = status_error();
        assert_eq!(error.to_string(), "502 Bad Gateway for url: https://example.com/api");
        assert_eq!(error.response_body(), Some("upstream down"));
        assert_eq!(error.status(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(error.kind(), ErrorKind::REQUEST);
    }

    #[test]
    fn test_caused_by_fills_source() {
        let raised = RequestError::raised(ErrorKind::LOGIN, "Login failed").caused_by(status_error());

        assert_eq!(raised.kind(), ErrorKind::LOGIN);
        assert_eq!(raised.to_string(), "Login failed");
        let source = raised.source().unwrap();
        assert!(source.to_string().starts_with("502 Bad Gateway"));
    }

    #[test]
    fn test_caused_by_wraps_other_errors() {
        let instance = RequestError::invalid_response("bad payload", None);
        let raised = instance.caused_by(status_error());

        match raised {
            RequestError::Raised { kind, message, source } => {
                assert_eq!(kind, ErrorKind::INVALID_JSON);
                assert_eq!(message, "bad payload");
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
