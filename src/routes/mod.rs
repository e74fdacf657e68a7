// src/routes/mod.rs
pub mod chat;
pub mod sessions;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post, put},
};
use chat::chat_handler;
use sessions::{
    create_session_handler, delete_session_handler, get_session_handler, submit_handler,
    update_input_handler,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(static_dir: impl AsRef<Path>) -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/sessions", post(create_session_handler))
        .route("/sessions/{id}", get(get_session_handler).delete(delete_session_handler))
        .route("/sessions/{id}/input", put(update_input_handler))
        .route("/sessions/{id}/submit", post(submit_handler))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
}
