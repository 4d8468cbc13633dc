//! Gateway error types.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the ticket backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The backend answered with a non-success status code.
    #[error("request failed ({status}): {body}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// HTTP transport error (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body is not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// A 204 from an endpoint that must return an entity.
    #[error("empty response where an entity was expected")]
    EmptyResponse,
}

/// Error body emitted by the backend's exception handlers.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl GatewayError {
    /// HTTP status for [`Self::RequestFailed`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short human-readable description.
    ///
    /// Backend error bodies of the form `{"error": "...", "message": "..."}`
    /// are reduced to their message; anything else falls back to the raw
    /// body or the display form.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::RequestFailed { status, body } => {
                let parsed = serde_json::from_str::<ErrorBody>(body).ok();
                match parsed.and_then(|b| b.message.or(b.error)) {
                    Some(message) if !message.trim().is_empty() => {
                        format!("{status}: {}", message.trim())
                    }
                    _ if body.trim().is_empty() => format!("{status}"),
                    _ => format!("{status}: {}", body.trim()),
                }
            }
            other => other.to_string(),
        }
    }
}
