// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::services::answer_client::AnswerClient;
use crate::services::diagnostics::{ErrorReporter, TracingReporter};
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(session_ttl: Duration, client: Arc<dyn AnswerClient>) -> Self {
        Self::with_reporter(session_ttl, client, Arc::new(TracingReporter))
    }

    pub fn with_reporter(
        session_ttl: Duration,
        client: Arc<dyn AnswerClient>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            sessions: SessionManager::new(session_ttl, client, reporter),
        }
    }
}
