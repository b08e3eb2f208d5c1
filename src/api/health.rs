use axum::{extract::State, Json};
use super::AppState;
use crate::{constants::SERVICE_BANNER, models::StatusResponse};

/// GET / and GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<StatusResponse> {
    tracing::debug!("Health check ({})", state.config.environment);

    Json(StatusResponse {
        status: "online".to_string(),
        message: SERVICE_BANNER.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
