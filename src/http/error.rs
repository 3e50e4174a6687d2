//! Translation of service failures and extractor rejections into HTTP
//! responses.

use crate::task::{ports::TaskRepositoryError, services::TaskServiceError};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::error;

/// Error returned by every handler.
///
/// Responses carry `{"message": ..., "details": ...}`; `details` is only
/// present for validation failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was well-formed but semantically invalid.
    #[error("{0}")]
    BadRequest(String),
    /// The resource does not exist in the caller's organization.
    #[error("{0}")]
    NotFound(&'static str),
    /// The request clashes with existing state.
    #[error("{0}")]
    Conflict(String),
    /// The request could not be parsed.
    #[error("Validation Failed")]
    ValidationFailed {
        /// Part of the request that was rejected: `body`, `path` or `query`.
        location: &'static str,
        /// Parser message describing the rejected input.
        reason: String,
    },
    /// An unexpected failure. The cause is logged, never returned.
    #[error("Internal Server Error")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) | Self::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body: Value = match &self {
            Self::ValidationFailed { location, reason } => {
                let mut details = Map::new();
                details.insert((*location).to_owned(), Value::String(reason.clone()));
                json!({ "message": self.to_string(), "details": details })
            }
            Self::Internal(cause) => {
                error!(error = %cause, "request failed");
                json!({ "message": self.to_string() })
            }
            Self::BadRequest(_) | Self::NotFound(_) | Self::Conflict(_) => {
                json!({ "message": self.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Domain(source) => Self::BadRequest(source.to_string()),
            TaskServiceError::EmptyPatch => {
                Self::BadRequest("No fields provided to update".to_owned())
            }
            TaskServiceError::TaskNotFound(_) => Self::NotFound("Task not found"),
            TaskServiceError::ControlNotFound(_) => Self::NotFound("Control not found"),
            TaskServiceError::EvidenceNotFound(_) => Self::NotFound("Evidence not found"),
            TaskServiceError::Repository(
                source @ (TaskRepositoryError::DuplicateTask(_)
                | TaskRepositoryError::DuplicateEvidence(_)),
            ) => Self::Conflict(source.to_string()),
            TaskServiceError::Repository(source) => Self::Internal(source.to_string()),
            TaskServiceError::Tenancy(source) => Self::Internal(source.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::ValidationFailed {
            location: "body",
            reason: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::ValidationFailed {
            location: "path",
            reason: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::ValidationFailed {
            location: "query",
            reason: rejection.body_text(),
        }
    }
}
