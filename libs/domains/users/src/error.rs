use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("schema check failed: {0}")]
    Validation(String),

    #[error("Same username not allowed for {0}")]
    DuplicateUsername(String),

    #[error("Not found for {0}")]
    NotFound(String),

    #[error("auth check: incorrect")]
    WrongPassword,

    #[error("Password hashing error: {0}")]
    Credential(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    /// Status mapping is part of the observable contract: every domain
    /// failure surfaces as 500 with the error message in the body, except
    /// a failed password check which maps to 401.
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            UserError::Validation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "validation_error",
                format!("schema check failed: {}", msg),
            ),
            UserError::DuplicateUsername(username) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "duplicate",
                format!("Same username not allowed for {}", username),
            ),
            UserError::NotFound(what) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "not_found",
                format!("Not found for {}", what),
            ),
            UserError::WrongPassword => (
                StatusCode::UNAUTHORIZED,
                "wrong_password",
                "auth check: incorrect".to_string(),
            ),
            UserError::Credential(msg) => {
                tracing::error!("Password hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "credential_error",
                    format!("Password hashing error: {}", msg),
                )
            }
            UserError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    format!("Database error: {}", msg),
                )
            }
        };

        (
            status,
            Json(json!({
                "error": {
                    "type": error_type,
                    "message": message
                }
            })),
        )
            .into_response()
    }
}
