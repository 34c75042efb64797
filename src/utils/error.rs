use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::services::EventError;
use crate::store::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg) | AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                tracing::warn!(error = ?self, message = %msg, "Request rejected");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::ResourceNotFound { .. } => AppError::NotFound(err.to_string()),
            EventError::Validation(msg) => AppError::ValidationError(msg),
            EventError::Store(StoreError::ConstraintViolation(msg)) => {
                AppError::ValidationError(msg)
            }
            // The row vanished between lookup and save.
            EventError::Store(StoreError::RowNotFound(id)) => {
                AppError::NotFound(format!("Event not found with ID : {}", id))
            }
            EventError::Store(StoreError::Database(e)) => AppError::DatabaseError(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        self.log();

        // Only expose high-level message to the client
        let public_message = match self {
            AppError::ValidationError(msg) | AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                msg
            }
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
        };

        error_response(public_message, status)
    }
}
