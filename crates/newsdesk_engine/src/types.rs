use std::fmt;

use newsdesk_core::{Page, Payload, RequestToken};

/// Shown when the request never produced an HTTP response.
pub const NO_RESPONSE_MESSAGE: &str = "No response from server. Is the backend running?";
/// Shown when a 2xx body does not have the shape the page expects.
pub const MALFORMED_MESSAGE: &str = "Unexpected response format from server.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Completed {
        page: Page,
        token: RequestToken,
        result: Result<Payload, DispatchError>,
    },
}

/// A failed dispatch. `message` is what the page displays; `kind` is for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct DispatchError {
    pub kind: FailureKind,
    pub message: String,
}

impl DispatchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn no_response() -> Self {
        Self::new(FailureKind::NoResponse, NO_RESPONSE_MESSAGE)
    }

    pub(crate) fn malformed() -> Self {
        Self::new(FailureKind::MalformedResponse, MALFORMED_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    MalformedResponse,
    TooLarge { max_bytes: u64 },
    Timeout,
    NoResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::TooLarge { max_bytes } => {
                write!(f, "response too large (max {max_bytes})")
            }
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::NoResponse => write!(f, "no response"),
        }
    }
}
