//! Cross-cutting error types for Triage Desk.
//!
//! Transport errors (`GatewayError`), configuration errors (`ConfigError`) and
//! clipboard errors live in their own crates. The CLI converges all of them
//! through `anyhow`.

use thiserror::Error;

/// Errors raised while building or validating domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A string did not name a known enum value.
    #[error("invalid {field} '{value}'. Allowed: {}", allowed.join(", "))]
    InvalidEnum {
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },

    /// Data failed validation (required fields, formats).
    #[error("Validation error: {0}")]
    Validation(String),
}
