use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::database::StoreError;
use crate::handlers::shared::ApiResponse;
use crate::scanner::DeviceError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed code; never reaches the store.
    #[error("{0}")]
    Validation(String),

    /// Well-formed code without a matching team.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    StoreRead(String),

    /// Attendance insert failed after a successful lookup. Only ever reported
    /// as a notification on an otherwise successful check-in.
    #[error("{0}")]
    StoreWrite(String),

    #[error("Camera error: {0}")]
    Device(#[from] DeviceError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StoreWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Device(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        if status_code.is_server_error() {
            log::error!(
                "Request failed with status {}: {}",
                status_code,
                error_message
            );
        } else {
            log::warn!(
                "Request failed with status {}: {}",
                status_code,
                error_message
            );
        }

        let response_body = ApiResponse::<()>::error(&error_message);

        HttpResponse::build(status_code).json(response_body)
    }
}

impl AppError {
    /// Wrap a failed read. The store detail goes to the log; the caller only
    /// sees a retryable message.
    pub fn store_read(error: StoreError, message: impl Into<String>) -> Self {
        log::error!("Store read failed: {}", error);
        AppError::StoreRead(message.into())
    }

    pub fn store_write(error: StoreError) -> Self {
        log::error!("Store write failed: {}", error);
        AppError::StoreWrite("Error recording attendance. Please try again.".to_string())
    }

    /// Whether the failure should block display of team data.
    pub fn blocks_display(&self) -> bool {
        !matches!(self, AppError::StoreWrite(_))
    }
}
