use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

use super::AppState;
use crate::{
    constants::{MSG_PLAYER_FAILED, MSG_TAG_REQUIRED},
    error::{AppError, Result},
    models::{parse_lenient, PlayerRequest},
    normalizer::normalize_player,
};

/// POST /player
pub async fn get_player(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>> {
    let req: PlayerRequest = parse_lenient(&body);
    let tag = req.tag.as_deref().map(str::trim).unwrap_or_default();
    if tag.is_empty() {
        return Err(AppError::BadRequest(MSG_TAG_REQUIRED.to_string()));
    }

    tracing::info!("Loading player {}", tag);
    let raw = state
        .game_data
        .fetch_player(tag)
        .await
        .map_err(|e| e.into_gateway("/player", MSG_PLAYER_FAILED))?;

    Ok(Json(normalize_player(raw)))
}
