//! # Error Types
//!
//! Two families, matching where a failure is detected:
//!
//! - [`ValidationError`]: detected locally before any request is issued.
//!   Blocks submission; nothing reaches the backend.
//! - [`RemoteError`]: a transport failure or a failure reported by the
//!   backend. Carries the backend's human-readable `detail` when one was sent.

use thiserror::Error;

use crate::field::FieldType;

/// Client-side validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The structure name is blank or no field has a non-blank name.
    #[error("name and at least one field required")]
    MissingNameOrFields,

    /// A required field has no value. Only raised by the strict check.
    #[error("required field '{field}' has no value")]
    RequiredValueMissing {
        /// Name of the field.
        field: String,
    },

    /// A value does not conform to its field's declared type. Only raised by
    /// the strict check.
    #[error("field '{field}' expects a {expected} value")]
    TypeMismatch {
        /// Name of the field.
        field: String,
        /// Declared type of the field.
        expected: FieldType,
    },
}

/// Failure of a gateway call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct RemoteError {
    /// Gateway operation that failed (e.g. `"getStructure"`).
    pub operation: String,
    /// HTTP status, when the backend answered.
    pub status: Option<u16>,
    /// Human-readable detail sent by the backend, if any.
    pub detail: Option<String>,
    /// Diagnostic message for logs.
    pub message: String,
}

impl RemoteError {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: None,
            detail: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The backend-provided detail, or `fallback` when none was sent.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.detail.as_deref().unwrap_or(fallback)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}
