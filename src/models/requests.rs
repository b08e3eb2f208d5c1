use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

// ==================== PLAYER ====================
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerRequest {
    pub tag: Option<String>,
}

// ==================== CHAT ====================
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub mensagem: Option<String>,
    pub contexto: Option<Value>,
    #[serde(rename = "sessionId", alias = "sessao")]
    pub session_id: Option<String>,
}

/// Carries the session id back so the client can continue the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub resposta: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

// ==================== STATUS ====================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

/// Parses a request body the way the frontend expects: a body that is not
/// valid JSON of the right shape counts as an empty request.
pub fn parse_lenient<T>(body: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_slice(body).unwrap_or_default()
}
