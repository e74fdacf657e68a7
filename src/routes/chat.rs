use axum::{
    extract::State,
    Json,
};
use crate::{
    message::{ChatRequest, ChatResponse},
    state::SharedState,
    services::chat_session::ReplyOutcome,
    error::AppError,
};

/// One-shot exchange: sets the input, submits it and waits for the reply.
/// `reply` is `null` when the answering service could not be reached.
pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if payload.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let existing = match &payload.session_id {
        Some(s) if !s.trim().is_empty() => state.sessions.get(s).await.map(|sess| (s.clone(), sess)),
        _ => None,
    };
    let (session_id, session) = match existing {
        Some(found) => found,
        None => state.sessions.create_session().await,
    };

    session.update_input(payload.message).await;
    let pending = session
        .submit()
        .await
        .ok_or_else(|| AppError::BadRequest("Message cannot be empty".to_string()))?;

    let reply = match pending.wait().await {
        ReplyOutcome::Answered(message) => Some(message.text().to_string()),
        ReplyOutcome::Failed(_) => None,
    };

    Ok(Json(ChatResponse { session_id, reply }))
}
