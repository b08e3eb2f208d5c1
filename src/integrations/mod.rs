pub mod clash_royale;
pub mod egress;
pub mod gemini;

pub use clash_royale::ClashRoyaleClient;
pub use gemini::GeminiClient;

use crate::{error::Result, models::ChatTurn};
use async_trait::async_trait;
use serde_json::Value;

/// Source of raw player and card payloads.
#[async_trait]
pub trait GameDataSource: Send + Sync {
    async fn fetch_player(&self, tag: &str) -> Result<Value>;

    async fn fetch_cards(&self) -> Result<Vec<Value>>;
}

/// Generates the next reply for a conversation.
#[async_trait]
pub trait AssistantModel: Send + Sync {
    async fn generate(&self, turns: &[ChatTurn]) -> Result<String>;
}
