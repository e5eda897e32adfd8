//! Error responses shared by every HTTP feature module.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error body.
///
/// `success` is always false so clients can branch on one field for both
/// failures and structured "no answer" results.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::InsufficientAmount => StatusCode::BAD_REQUEST,
        ErrorCode::MissingRiskAssessment
        | ErrorCode::NoProjectsAvailable
        | ErrorCode::ComputationPrecondition => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::UserNotFound
        | ErrorCode::ProjectNotFound
        | ErrorCode::RecommendationNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::LedgerError => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::CacheError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0;
        let status = status_for(error.code);

        // Collaborator failures keep their detail in the logs only.
        let body = if error.code.is_client_error() {
            let mut body = ErrorResponse::new(error.code.to_string(), error.message());
            if !error.details.is_empty() {
                body.details = serde_json::to_value(&error.details).ok();
            }
            body
        } else {
            tracing::error!(code = %error.code, "Request failed: {}", error.message());
            ErrorResponse::new(error.code.to_string(), "An unexpected error occurred")
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_codes_map_to_404() {
        for code in [
            ErrorCode::UserNotFound,
            ErrorCode::ProjectNotFound,
            ErrorCode::RecommendationNotFound,
        ] {
            assert_eq!(status_for(code), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn no_answer_results_are_unprocessable() {
        let response = ApiError(DomainError::new(ErrorCode::NoProjectsAvailable, "none")).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn ledger_failures_are_bad_gateway() {
        assert_eq!(status_for(ErrorCode::LedgerError), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn error_body_has_success_false() {
        let body = serde_json::to_value(ErrorResponse::bad_request("nope")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "nope");
    }
}
