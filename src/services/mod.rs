// src/services/mod.rs
pub mod answer_client;
pub mod chat_session;
pub mod diagnostics;
pub mod session_manager;
