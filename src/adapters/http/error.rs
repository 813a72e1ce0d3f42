//! Mapping from domain errors to HTTP responses.
//!
//! Every error body has the same shape:
//!
//! ```json
//! { "code": "PRECONDITION_FAILED", "message": "..." }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Standard error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// A domain error on its way out through HTTP.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

/// HTTP status for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::PreconditionFailed | ErrorCode::ConcurrentModification => StatusCode::CONFLICT,
        ErrorCode::ReferentialIntegrity => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::ExternalServiceError => StatusCode::BAD_GATEWAY,
        ErrorCode::StorageError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status = status_for(code);

        // Internal details stay in the log.
        let message = match code {
            ErrorCode::StorageError | ErrorCode::InternalError => {
                tracing::error!(code = %code, error = %self.0, "Request failed");
                "An unexpected error occurred".to_string()
            }
            ErrorCode::ExternalServiceError => {
                tracing::warn!(error = %self.0, "Upstream service failed");
                self.0.message().to_string()
            }
            _ => self.0.message().to_string(),
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_map_to_4xx() {
        assert_eq!(status_for(ErrorCode::InvalidInput), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorCode::PreconditionFailed), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorCode::ReferentialIntegrity),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn collaborator_errors_map_to_5xx() {
        assert_eq!(status_for(ErrorCode::ExternalServiceError), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(ErrorCode::StorageError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn external_service_message_is_passed_through() {
        let response =
            ApiError(DomainError::external_service("Question generation failed")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn error_response_uses_code_names() {
        let body = ErrorResponse::new(ErrorCode::PreconditionFailed, "nope");
        assert_eq!(body.code, "PRECONDITION_FAILED");
    }
}
