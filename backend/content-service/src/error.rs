/// Error types for the content service.
///
/// Domain errors from `content-core` are mapped onto HTTP responses here;
/// handlers only ever return [`AppError`].
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use content_core::{CreatePostError, StoreError};
use thiserror::Error;

/// Result type for content-service handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed local validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller identity missing or malformed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed request (bad cursor, bad parameters)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The store rejected or failed an operation
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<CreatePostError> for AppError {
    fn from(err: CreatePostError) -> Self {
        match err {
            CreatePostError::Store(store) => AppError::Store(store),
            validation => AppError::Validation(validation.to_string()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        HttpResponse::build(status).json(serde_json::json!({
            "error": error_msg,
            "status": status.as_u16(),
        }))
    }
}
