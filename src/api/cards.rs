use axum::{extract::State, Json};
use serde_json::Value;

use super::AppState;
use crate::{constants::MSG_CARDS_FAILED, error::Result};

/// GET /cards
pub async fn list_cards(State(state): State<AppState>) -> Result<Json<Vec<Value>>> {
    let cards = state
        .game_data
        .fetch_cards()
        .await
        .map_err(|e| e.into_gateway("/cards", MSG_CARDS_FAILED))?;

    tracing::debug!("Card catalog: {} items", cards.len());
    Ok(Json(cards))
}
