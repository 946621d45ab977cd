//! # API Error Type
//!
//! Every failure is rendered as `{"detail": "<message>"}` with the matching
//! status code, the body shape clients read their user-facing message from.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed path parameter (400).
    #[error("{0}")]
    BadRequest(String),

    /// Unknown structure (404).
    #[error("{0}")]
    NotFound(String),

    /// Duplicate structure name (409).
    #[error("{0}")]
    Conflict(String),

    /// Body or query string could not be parsed (422).
    #[error("{0}")]
    Unprocessable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn structure_not_found() -> Self {
        Self::NotFound("Structure not found".to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), detail = %self, "request rejected");
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
