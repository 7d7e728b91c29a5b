use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::utils::response::{error_body, not_found_body};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid JSON or no data provided")]
    EmptyBody,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid event_date format. Use YYYY-MM-DD HH:MM:SS")]
    InvalidEventDate,

    #[error("Event not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyBody => StatusCode::BAD_REQUEST,
            AppError::MissingFields(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidEventDate => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::Database(e) => {
                error!(error = ?e, "Database error");
            }
            other => {
                error!(error = %other, "Request rejected");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        self.log();

        // "Not found" answers with a message key; every other failure with
        // an error key.
        match self {
            AppError::NotFound => not_found_body(status, "Event not found"),
            AppError::Database(e) => {
                error_body(status, format!("An error occurred: {e}"))
            }
            other => error_body(status, other.to_string()),
        }
    }
}
