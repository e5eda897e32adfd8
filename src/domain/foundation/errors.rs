//! Domain error types.
//!
//! `ValidationError` is raised while building value objects; `DomainError`
//! is what every port and handler returns. The HTTP layer maps an
//! `ErrorCode` to a status without inspecting messages.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Machine-readable failure category, rendered as `error_code` in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    InsufficientAmount,
    MissingRiskAssessment,

    UserNotFound,
    ProjectNotFound,
    RecommendationNotFound,

    Conflict,

    NoProjectsAvailable,
    ComputationPrecondition,

    Unauthorized,
    Forbidden,

    LedgerError,
    DatabaseError,
    CacheError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InsufficientAmount => "INSUFFICIENT_AMOUNT",
            ErrorCode::MissingRiskAssessment => "MISSING_RISK_ASSESSMENT",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::ProjectNotFound => "PROJECT_NOT_FOUND",
            ErrorCode::RecommendationNotFound => "RECOMMENDATION_NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::NoProjectsAvailable => "NO_PROJECTS_AVAILABLE",
            ErrorCode::ComputationPrecondition => "COMPUTATION_PRECONDITION",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::LedgerError => "LEDGER_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::CacheError => "CACHE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// False for faults in our own collaborators; their messages stay in the logs.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            ErrorCode::LedgerError
                | ErrorCode::DatabaseError
                | ErrorCode::CacheError
                | ErrorCode::InternalError
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    /// Structured context (offending field, identifiers, limits).
    pub details: BTreeMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    pub fn user_not_found(user_id: impl fmt::Display) -> Self {
        let id = user_id.to_string();
        Self::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
            .with_detail("user_id", id)
    }

    pub fn project_not_found(project_id: impl fmt::Display) -> Self {
        let id = project_id.to_string();
        Self::new(ErrorCode::ProjectNotFound, format!("Project not found: {}", id))
            .with_detail("project_id", id)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::validation(err.field().to_string(), err.to_string())
    }
}
