use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::auth::Role;
use crate::repositories::RepositoryError;

/// Why an authenticated caller was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    #[error("not {}", .required.with_article())]
    WrongRole { required: Role },
    #[error("not the owner of this record")]
    NotOwner,
}

/// Machine-readable error category, stable across messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    NotFound,
    ValidationFailed,
    Conflict,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Forbidden: {0}")]
    Forbidden(DenyReason),
    #[error("{0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Unauthenticated => ErrorKind::Unauthenticated,
            CoreError::Forbidden(_) => ErrorKind::Forbidden,
            CoreError::NotFound(_) => ErrorKind::NotFound,
            CoreError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            CoreError::EmailAlreadyExists => ErrorKind::Conflict,
            CoreError::Storage(RepositoryError::Conflict(_)) => ErrorKind::Conflict,
            CoreError::Storage(_) => ErrorKind::Internal,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        CoreError::NotFound(what.into())
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        CoreError::ValidationFailed(reason.into())
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let message = match &self {
            // Storage details stay in the logs
            CoreError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": kind.as_str(),
            "message": message,
        }));

        (kind.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_reason_messages() {
        let wrong_role = DenyReason::WrongRole {
            required: Role::Trainer,
        };
        assert_eq!(wrong_role.to_string(), "not a trainer");
        assert_eq!(
            CoreError::Forbidden(DenyReason::NotOwner).to_string(),
            "Forbidden: not the owner of this record"
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = vec![
            (CoreError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                CoreError::Forbidden(DenyReason::NotOwner),
                StatusCode::FORBIDDEN,
            ),
            (CoreError::not_found("Trainer not found"), StatusCode::NOT_FOUND),
            (CoreError::validation("notes"), StatusCode::BAD_REQUEST),
            (CoreError::EmailAlreadyExists, StatusCode::CONFLICT),
            (
                CoreError::Storage(RepositoryError::Corrupt("bad row".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
