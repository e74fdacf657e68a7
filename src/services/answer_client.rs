// src/services/answer_client.rs
use async_trait::async_trait;
use serde_json::Value;

use crate::{config::AnswerClientConfig, error::TransportError, message::AskRequest};

/// Text appended when the answering service replies without an `ans` field.
pub const MISSING_ANSWER_TEXT: &str = "undefined";

/// Turns a prompt into an answer from the remote answering service.
#[async_trait]
pub trait AnswerClient: Send + Sync {
    async fn ask(&self, prompt: &str) -> Result<String, TransportError>;
}

#[derive(Clone, Debug)]
pub struct HttpAnswerClient {
    http: reqwest::Client,
    config: AnswerClientConfig,
}

impl HttpAnswerClient {
    pub fn new(config: AnswerClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { http: builder.build()?, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl AnswerClient for HttpAnswerClient {
    async fn ask(&self, prompt: &str) -> Result<String, TransportError> {
        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&AskRequest { prompt })
            .send()
            .await?;

        let status = response.status();
        if self.config.strict_status && !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "answering service returned non-success status; reading body as answer");
        }

        let bytes = response.bytes().await?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))?;

        extract_answer(&body, self.config.require_answer)
    }
}

/// Pulls the `ans` field out of a response body.
///
/// Strings are returned as-is, other JSON values as their JSON text. A
/// missing, null or empty `ans` yields [`MISSING_ANSWER_TEXT`] unless
/// `require_answer` is set.
pub fn extract_answer(body: &Value, require_answer: bool) -> Result<String, TransportError> {
    match body.get("ans") {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Null) | None => missing(require_answer),
        Some(Value::String(_)) => missing(require_answer),
        Some(other) => Ok(other.to_string()),
    }
}

fn missing(require_answer: bool) -> Result<String, TransportError> {
    if require_answer {
        return Err(TransportError::MissingAnswer);
    }
    tracing::warn!("answering service response has no `ans` field");
    Ok(MISSING_ANSWER_TEXT.to_string())
}
