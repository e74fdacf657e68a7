// src/message.rs
use serde::{Deserialize, Serialize};

pub const GREETING_USER: &str = "Hi!";
pub const GREETING_BOT: &str = "Hello! How can I help you today?";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. Fields are private so an entry cannot change once
/// it has been appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    text: String,
    sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::User }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::Bot }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }
}

/// Seed pair every new transcript starts with.
pub fn greeting() -> Vec<Message> {
    vec![Message::user(GREETING_USER), Message::bot(GREETING_BOT)]
}

// Answering service wire format

#[derive(Serialize)]
pub struct AskRequest<'a> {
    pub prompt: &'a str,
}

// Hosting API wire format

#[derive(Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct InputRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct SubmitResponse {
    pub accepted: bool,
    pub transcript_len: usize,
}

#[derive(Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: String,
    pub input: String,
    pub transcript: Vec<Message>,
}
