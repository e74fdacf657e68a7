// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failure to complete a prompt/answer round trip with the answering service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to answering service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("answering service returned an unreadable body: {0}")]
    Decode(String),

    #[error("answering service responded with status {0}")]
    Status(u16),

    #[error("answering service response has no `ans` field")]
    MissingAnswer,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
