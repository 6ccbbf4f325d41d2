//! HTTP boundary errors for the relay.

use axum::{
    Json,
    http::StatusCode,
    response::{ IntoResponse, Response },
};
use thiserror::Error;

use crate::models::chat::ErrorResponse;
use crate::relay::RelayError;

/// Body returned for every failed forward, whatever went wrong.
pub const AI_SERVICE_ERROR: &str = "Failed to get response from AI service.";

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Relay(_) => (StatusCode::INTERNAL_SERVER_ERROR, AI_SERVICE_ERROR.to_string()),
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
