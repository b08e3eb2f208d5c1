use axum::{body::Bytes, extract::State, Json};

use super::AppState;
use crate::{
    constants::{MSG_CHAT_FAILED, MSG_EMPTY_MESSAGE},
    error::{AppError, Result},
    models::{parse_lenient, ChatRequest, ChatResponse},
    services::chat_service::resolve_session_id,
};

/// POST /chat
pub async fn send_message(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatResponse>> {
    let req: ChatRequest = parse_lenient(&body);
    let message = req.mensagem.as_deref().map(str::trim).unwrap_or_default();
    if message.is_empty() {
        return Err(AppError::BadRequest(MSG_EMPTY_MESSAGE.to_string()));
    }

    let session_id = resolve_session_id(req.session_id.as_deref());
    tracing::info!(
        "Chat message: session={}, with_context={}",
        session_id,
        req.contexto.is_some()
    );

    let resposta = state
        .chat
        .send(&session_id, message, req.contexto.as_ref())
        .await
        .map_err(|e| e.into_gateway("/chat", MSG_CHAT_FAILED))?;

    Ok(Json(ChatResponse {
        resposta,
        session_id,
    }))
}
