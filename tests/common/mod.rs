#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use knowledge_chat::error::TransportError;
use knowledge_chat::services::answer_client::AnswerClient;
use knowledge_chat::services::diagnostics::ErrorReporter;
use tokio::sync::oneshot;

/// Answers every prompt the same way and records what it was asked.
pub struct StaticClient {
    answer: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StaticClient {
    pub fn answering(answer: &str) -> Self {
        Self { answer: Some(answer.to_string()), prompts: Mutex::new(Vec::new()) }
    }

    pub fn failing() -> Self {
        Self { answer: None, prompts: Mutex::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerClient for StaticClient {
    async fn ask(&self, prompt: &str) -> Result<String, TransportError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.answer {
            Some(answer) => Ok(answer.clone()),
            None => Err(TransportError::Decode("simulated network error".to_string())),
        }
    }
}

type Gate = oneshot::Receiver<Result<String, TransportError>>;

/// Holds each prompt's answer until the test releases it.
#[derive(Default)]
pub struct GatedClient {
    gates: Mutex<HashMap<String, Gate>>,
}

impl GatedClient {
    pub fn gate(&self, prompt: &str) -> oneshot::Sender<Result<String, TransportError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(prompt.to_string(), rx);
        tx
    }
}

#[async_trait]
impl AnswerClient for GatedClient {
    async fn ask(&self, prompt: &str) -> Result<String, TransportError> {
        let gate = self.gates.lock().unwrap().remove(prompt);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Decode("gate dropped".to_string()))),
            None => Err(TransportError::Decode(format!("no gate for {prompt}"))),
        }
    }
}

#[derive(Default)]
pub struct CountingReporter {
    count: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl CountingReporter {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl ErrorReporter for CountingReporter {
    fn report(&self, prompt: &str, _error: &TransportError) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
    }
}
