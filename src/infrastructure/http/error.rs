//! Mapping from domain errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::errors::InterviewError;

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason
    pub detail: String,
}

/// Handler error rendered as `{"detail": ...}` with a status code
#[derive(Debug)]
pub struct ApiError {
    /// Response status
    pub status: StatusCode,
    /// Message placed in the body
    pub detail: String,
}

impl ApiError {
    /// Error with an explicit status
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<InterviewError> for ApiError {
    fn from(err: InterviewError) -> Self {
        let status = match err {
            InterviewError::InsufficientBankSize { .. } => StatusCode::BAD_REQUEST,
            InterviewError::QuestionNotFound(_) | InterviewError::SessionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            InterviewError::RegistrationIncomplete(_) | InterviewError::EmptyFeedback => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            InterviewError::SessionStateViolation { .. } | InterviewError::OutOfRange { .. } => {
                StatusCode::CONFLICT
            }
            InterviewError::InvalidQuestionBank(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = %self.status, detail = %self.detail, "request failed");
        }
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SessionPhase;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                InterviewError::InsufficientBankSize {
                    requested: 25,
                    available: 3,
                },
                StatusCode::BAD_REQUEST,
            ),
            (InterviewError::QuestionNotFound(9), StatusCode::NOT_FOUND),
            (InterviewError::SessionNotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (
                InterviewError::RegistrationIncomplete("institute is required".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                InterviewError::SessionStateViolation {
                    operation: "submit an answer",
                    phase: SessionPhase::Completed,
                },
                StatusCode::CONFLICT,
            ),
            (
                InterviewError::OutOfRange { cursor: 25, total: 25 },
                StatusCode::CONFLICT,
            ),
            (InterviewError::EmptyFeedback, StatusCode::UNPROCESSABLE_ENTITY),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[test]
    fn test_detail_keeps_message() {
        let err = ApiError::from(InterviewError::QuestionNotFound(42));
        assert_eq!(err.detail, "Question ID not found: 42");
    }
}
