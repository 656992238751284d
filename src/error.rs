use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::ErrorResponse;

/// Failures surfaced to HTTP callers.
///
/// Provider errors are logged where they happen and collapse into
/// `GenerationFailed` / `SendFailed`; their detail never reaches the response.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Failed to generate email")]
    GenerationFailed,

    #[error("Failed to send email")]
    SendFailed,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::GenerationFailed | AppError::SendFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_failures_map_to_500_with_generic_text() {
        assert_eq!(AppError::SendFailed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::SendFailed.to_string(), "Failed to send email");
        assert_eq!(
            AppError::GenerationFailed.to_string(),
            "Failed to generate email"
        );
    }

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::Validation("Prompt is required".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Prompt is required");
    }
}
