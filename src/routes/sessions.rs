// src/routes/sessions.rs
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    error::AppError,
    message::{InputRequest, SessionView, SubmitResponse},
    services::chat_session::ChatSession,
    state::SharedState,
};

async fn lookup(state: &SharedState, id: &str) -> Result<ChatSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::SessionNotFound(id.to_string()))
}

async fn view(session_id: String, session: &ChatSession) -> SessionView {
    SessionView {
        session_id,
        input: session.input().await,
        transcript: session.transcript().await,
    }
}

pub async fn create_session_handler(
    State(state): State<SharedState>,
) -> (StatusCode, Json<SessionView>) {
    let (id, session) = state.sessions.create_session().await;
    (StatusCode::CREATED, Json(view(id, &session).await))
}

pub async fn get_session_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let session = lookup(&state, &id).await?;
    Ok(Json(view(id, &session).await))
}

pub async fn update_input_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<InputRequest>,
) -> Result<StatusCode, AppError> {
    let session = lookup(&state, &id).await?;
    session.update_input(payload.text).await;
    Ok(StatusCode::NO_CONTENT)
}

// The reply is appended in the background; clients re-read the session.
pub async fn submit_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SubmitResponse>, AppError> {
    let session = lookup(&state, &id).await?;
    let accepted = session.submit().await.is_some();
    Ok(Json(SubmitResponse {
        accepted,
        transcript_len: session.len().await,
    }))
}

pub async fn delete_session_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove_session(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::SessionNotFound(id))
    }
}
