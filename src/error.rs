// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorBody;
use crate::services::gemini::GenerationError;

/// Message returned to clients whenever the relay fails after validation.
pub const GENERIC_FAILURE: &str = "Error processing your request.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("upstream generation failed: {0}")]
    Upstream(#[from] GenerationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(err) => {
                // The cause stays in the server log, clients only see the generic text.
                tracing::error!(error = %err, "Error with AI chat");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
