// src/services/chat_session.rs
use std::{fmt::Debug, sync::Arc};

use tokio::{
    sync::{RwLock, watch},
    task::JoinHandle,
};

use crate::message::{Message, greeting};
use crate::services::{answer_client::AnswerClient, diagnostics::ErrorReporter};

#[derive(Debug)]
struct SessionInner {
    transcript: Vec<Message>,
    input: String,
}

/// How a single submission ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The bot message that was appended.
    Answered(Message),
    /// The request failed; the transcript was left alone.
    Failed(String),
}

/// Handle to the answer request started by [`ChatSession::submit`].
///
/// Dropping it does not cancel the request: the reply is still appended when
/// it arrives.
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<ReplyOutcome>,
}

impl PendingReply {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn wait(self) -> ReplyOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "answer task did not complete");
                ReplyOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Transcript plus pending input for one chat widget.
///
/// Clones share the same state. The transcript only grows; submissions are
/// not serialized against each other, so bot replies land in the order their
/// requests complete.
#[derive(Clone)]
pub struct ChatSession {
    inner: Arc<RwLock<SessionInner>>,
    client: Arc<dyn AnswerClient>,
    reporter: Arc<dyn ErrorReporter>,
    changes: Arc<watch::Sender<usize>>,
}

impl Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession").finish_non_exhaustive()
    }
}

impl ChatSession {
    /// New session seeded with the greeting pair.
    pub fn new(client: Arc<dyn AnswerClient>, reporter: Arc<dyn ErrorReporter>) -> Self {
        let transcript = greeting();
        let (changes, _) = watch::channel(transcript.len());
        Self {
            inner: Arc::new(RwLock::new(SessionInner { transcript, input: String::new() })),
            client,
            reporter,
            changes: Arc::new(changes),
        }
    }

    /// Replace the pending input. Always succeeds.
    pub async fn update_input(&self, text: impl Into<String>) {
        self.inner.write().await.input = text.into();
    }

    pub async fn input(&self) -> String {
        self.inner.read().await.input.clone()
    }

    /// Copy of the transcript in display order.
    pub async fn transcript(&self) -> Vec<Message> {
        self.inner.read().await.transcript.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.transcript.len()
    }

    /// Observe transcript length. Presentation layers hook their transitions
    /// here instead of inside the session.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.changes.subscribe()
    }

    /// Send the pending input.
    ///
    /// Returns `None` without touching anything when the input is empty or
    /// whitespace. Otherwise the untrimmed input is appended as a user message
    /// and cleared in one step, and the answer request runs on its own task.
    pub async fn submit(&self) -> Option<PendingReply> {
        let (prompt, len) = {
            let mut guard = self.inner.write().await;
            if guard.input.trim().is_empty() {
                return None;
            }
            let prompt = std::mem::take(&mut guard.input);
            guard.transcript.push(Message::user(prompt.clone()));
            (prompt, guard.transcript.len())
        };
        self.changes.send_replace(len);
        tracing::debug!(transcript_len = len, "user message appended");

        let session = self.clone();
        let handle = tokio::spawn(async move { session.resolve(prompt).await });
        Some(PendingReply { handle })
    }

    async fn resolve(&self, prompt: String) -> ReplyOutcome {
        match self.client.ask(&prompt).await {
            Ok(answer) => {
                let message = Message::bot(answer);
                self.append(message.clone()).await;
                ReplyOutcome::Answered(message)
            }
            Err(err) => {
                self.reporter.report(&prompt, &err);
                ReplyOutcome::Failed(err.to_string())
            }
        }
    }

    async fn append(&self, message: Message) {
        let len = {
            let mut guard = self.inner.write().await;
            guard.transcript.push(message);
            guard.transcript.len()
        };
        self.changes.send_replace(len);
    }
}
