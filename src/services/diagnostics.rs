// src/services/diagnostics.rs
use crate::error::TransportError;

/// Operator-facing sink for failed answer requests. Failures never reach the
/// transcript; they only go here.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, prompt: &str, error: &TransportError);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, prompt: &str, error: &TransportError) {
        tracing::error!(
            error = %error,
            prompt_len = prompt.len(),
            "error sending message to answering service"
        );
    }
}
