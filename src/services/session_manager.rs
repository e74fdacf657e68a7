// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::{
    answer_client::AnswerClient, chat_session::ChatSession, diagnostics::ErrorReporter,
};

#[derive(Clone, Debug)]
struct Entry {
    session: ChatSession,
    last_active: Instant,
}

impl Entry {
    fn new(session: ChatSession) -> Self {
        Self { session, last_active: Instant::now() }
    }
}

/// One [`ChatSession`] per browser session, dropped when torn down or idle
/// longer than the TTL.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
    client: Arc<dyn AnswerClient>,
    reporter: Arc<dyn ErrorReporter>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(
        ttl: Duration,
        client: Arc<dyn AnswerClient>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            client,
            reporter,
            ttl,
        }
    }

    // Create a fresh session and return its id.
    pub async fn create_session(&self) -> (String, ChatSession) {
        let id = Uuid::new_v4().to_string();
        let session = ChatSession::new(self.client.clone(), self.reporter.clone());

        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), Entry::new(session.clone()));
        tracing::info!(session_id = %id, "session created");
        (id, session)
    }

    /// Look up a session and touch its last-active time.
    pub async fn get(&self, session_id: &str) -> Option<ChatSession> {
        let mut guard = self.inner.write().await;
        let entry = guard.get_mut(session_id)?;
        entry.last_active = Instant::now();
        Some(entry.session.clone())
    }

    /// Tear down a session. Replies still in flight for it are discarded
    /// with it.
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        let removed = guard.remove(session_id).is_some();
        if removed {
            tracing::info!(session_id, "session removed");
        }
        removed
    }

    /// Remove sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, e| now.duration_since(e.last_active) < self.ttl);
        before - guard.len()
    }

    /// Purge expired sessions every `period` until the runtime shuts down.
    pub fn spawn_purger(&self, period: Duration) -> tokio::task::JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let removed = manager.purge_expired().await;
                if removed > 0 {
                    tracing::info!(removed, "expired sessions purged");
                }
            }
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// List session ids
    pub async fn list_session_ids(&self) -> Vec<String> {
        let guard = self.inner.read().await;
        guard.keys().cloned().collect()
    }
}
