/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mixtape_core::MixtapeError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Authorization failed: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{message}")]
    RateLimited { message: String, retry_after: u64 },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] MixtapeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<mixtape_storage::StorageError> for ServerError {
    fn from(err: mixtape_storage::StorageError) -> Self {
        // Convert StorageError -> MixtapeError -> ServerError
        ServerError::Core(err.into())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message, retry_after) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ServerError::Unauthorized(msg) => (StatusCode::FORBIDDEN, msg, None),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ServerError::RateLimited {
                message,
                retry_after,
            } => (StatusCode::TOO_MANY_REQUESTS, message, Some(retry_after)),
            ServerError::Core(err) => return core_error_response(err),
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                    None,
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO error".to_string(),
                    None,
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid token".to_string(),
                    None,
                )
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                    None,
                )
            }
        };

        error_body(status, &error_message, retry_after)
    }
}

/// Map core domain errors onto the HTTP taxonomy: authorization failures,
/// not-found, and validation failures are all distinct to callers.
fn core_error_response(err: MixtapeError) -> Response {
    let (status, message) = match &err {
        MixtapeError::PermissionDenied
        | MixtapeError::PermissionDeniedWithContext(_)
        | MixtapeError::GuestForbidden(_) => (StatusCode::FORBIDDEN, err.to_string()),
        MixtapeError::NotFound { .. }
        | MixtapeError::PlaylistNotFound(_)
        | MixtapeError::CommentNotFound(_)
        | MixtapeError::UserNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        MixtapeError::InvalidInput(_) | MixtapeError::Duplicate(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        _ => {
            tracing::error!("Storage error: {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error".to_string(),
            )
        }
    };

    error_body(status, &message, None)
}

fn error_body(status: StatusCode, message: &str, retry_after: Option<u64>) -> Response {
    let body = Json(json!({
        "success": false,
        "errorMessage": message,
    }));

    let mut response = (status, body).into_response();
    if let Some(secs) = retry_after {
        if let Ok(value) = secs.to_string().parse() {
            response.headers_mut().insert("Retry-After", value);
        }
    }
    response
}
