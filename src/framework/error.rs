//! # Framework Errors
//!
//! Every terminal verb (`provision`, `apply`, `delete`, `refresh`, `get`, `list`) reports a
//! [`ShortcutsError`]. Fluent setters never fail.
//!
//! Errors reported by the external management clients arrive as
//! [`ApiError`](crate::clients::ApiError) and are mapped here without any recovery:
//! a not-found stays a not-found, a rejected request keeps the server's message verbatim.

use crate::clients::ApiError;

/// Errors surfaced to callers of the lifecycle core.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ShortcutsError {
    /// A required field is missing or malformed. Detected locally, nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The remote service reports that the resource does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The remote service could not be reached or refused the credentials.
    /// The effect of the call is unknown.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The remote service was reached but rejected the request.
    #[error("Remote API rejected the request ({code}): {message}")]
    RemoteApi { code: String, message: String },

    /// An update needed the region of the existing resource and could not read it.
    #[error("{kind} '{name}' could not be resolved for update")]
    UnresolvedForUpdate {
        kind: &'static str,
        name: String,
        #[source]
        source: Option<Box<ShortcutsError>>,
    },

    /// Session bootstrap failed (unreadable or invalid configuration).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ApiError> for ShortcutsError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::NotFound(what) => ShortcutsError::NotFound(what),
            ApiError::Transport(msg) => ShortcutsError::Transport(msg),
            ApiError::Rejected { code, message } => ShortcutsError::RemoteApi { code, message },
        }
    }
}

impl ShortcutsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ShortcutsError::NotFound(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShortcutsError>;
