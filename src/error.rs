// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;
use crate::services::gemini::GenerateError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("generation failed: {0}")]
    Upstream(#[from] GenerateError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            // Upstream detail stays in the server log.
            AppError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get a response from the generation service".to_string(),
            ),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
