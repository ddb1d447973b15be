//! Uniform error shape for REST calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure a view can observe is an `ApiError`: transport failures,
//! non-2xx statuses (carrying the backend's `message` field when present),
//! undecodable bodies, and client-side validation that stopped a request
//! before it was sent. Views turn these into user-facing text with
//! `user_message` and never propagate them further.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Fallback text when the server supplied no message.
pub const NETWORK_ERROR: &str = "Network error";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response was received.
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("request timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("bad request (400)")]
    BadRequest { message: Option<String> },
    #[error("unauthorized (401)")]
    Unauthorized { message: Option<String> },
    #[error("forbidden (403)")]
    Forbidden { message: Option<String> },
    #[error("not found (404)")]
    NotFound { message: Option<String> },
    #[error("conflict (409)")]
    Conflict { message: Option<String> },
    #[error("unexpected status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("could not encode request body: {0}")]
    Encode(String),
    /// A success response whose body did not match the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),
    /// Client-side validation failed; no request was sent.
    #[error("{0}")]
    Validation(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// Classify a non-2xx response, keeping the backend's `message` if any.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = message_from_body(body);
        match status {
            400 => Self::BadRequest { message },
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            409 => Self::Conflict { message },
            _ => Self::Status { status, message },
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status for errors that came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend-provided `message`, if the response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::BadRequest { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// 401 or 403.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::Forbidden { .. })
    }

    /// Text shown to the user, e.g. `Failed to load books: Network error`.
    ///
    /// Validation errors are shown as-is; they are already user-facing.
    pub fn user_message(&self, context: &str) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            _ => format!("{context}: {}", self.server_message().unwrap_or(NETWORK_ERROR)),
        }
    }
}

fn message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}
