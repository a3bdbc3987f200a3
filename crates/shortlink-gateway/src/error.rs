use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortlink_core::ShortenerError;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The request itself could not be read.
    BadRequest(String),
    Internal(String),
    Shortener(ShortenerError),
}

impl From<ShortenerError> for AppError {
    fn from(error: ShortenerError) -> Self {
        Self::Shortener(error)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Shortener(ShortenerError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            AppError::Shortener(ShortenerError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Shortener(ShortenerError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Shortener(ShortenerError::GenerationExhausted { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest(message) => message.clone(),
            AppError::Internal(_) => "internal error".to_string(),
            AppError::Shortener(ShortenerError::NotFound(_)) => "no such link".to_string(),
            AppError::Shortener(ShortenerError::Unavailable(_)) => {
                "storage temporarily unavailable, retry later".to_string()
            }
            AppError::Shortener(ShortenerError::GenerationExhausted { .. }) => {
                "could not allocate a short code".to_string()
            }
            AppError::Shortener(other) => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, status = status.as_u16(), "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.message(),
            }),
        )
            .into_response()
    }
}
