use crate::constants::{
    DEFAULT_CHAT_HISTORY_MAX_TURNS, DEFAULT_CHAT_MAX_SESSIONS, DEFAULT_CHAT_SESSION_TTL_SECS,
    DEFAULT_CLASH_API_TIMEOUT_SECS, DEFAULT_CLASH_API_URL, DEFAULT_GEMINI_API_URL, DEFAULT_GEMINI_MODEL,
    DEFAULT_GEMINI_TIMEOUT_SECS,
};
use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Clash Royale API
    pub clash_api_url: String,
    pub clash_api_token: Option<String>,
    pub clash_api_timeout_secs: u64,

    // Gemini
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub gemini_timeout_secs: u64,

    // Chat sessions
    pub chat_history_max_turns: usize,
    pub chat_session_ttl_secs: u64,
    pub chat_max_sessions: usize,

    // CORS
    pub cors_allowed_origins: String,

    // Diagnostics
    pub log_egress_ip: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 10000)?,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),

            clash_api_url: lookup("CLASH_API_URL")
                .unwrap_or_else(|| DEFAULT_CLASH_API_URL.to_string()),
            clash_api_token: secret("CLASH_API_TOKEN"),
            clash_api_timeout_secs: parse_or(
                &lookup,
                "CLASH_API_TIMEOUT_SECS",
                DEFAULT_CLASH_API_TIMEOUT_SECS,
            )?,

            gemini_api_key: secret("GEMINI_API_KEY"),
            gemini_api_url: lookup("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_timeout_secs: parse_or(
                &lookup,
                "GEMINI_TIMEOUT_SECS",
                DEFAULT_GEMINI_TIMEOUT_SECS,
            )?,

            chat_history_max_turns: parse_or(
                &lookup,
                "CHAT_HISTORY_MAX_TURNS",
                DEFAULT_CHAT_HISTORY_MAX_TURNS,
            )?,
            chat_session_ttl_secs: parse_or(
                &lookup,
                "CHAT_SESSION_TTL_SECS",
                DEFAULT_CHAT_SESSION_TTL_SECS,
            )?,
            chat_max_sessions: parse_or(&lookup, "CHAT_MAX_SESSIONS", DEFAULT_CHAT_MAX_SESSIONS)?,

            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string()),

            log_egress_ip: lookup("LOG_EGRESS_IP")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port == 0 {
            anyhow::bail!("PORT must be > 0");
        }
        if self.clash_api_timeout_secs == 0 || self.gemini_timeout_secs == 0 {
            anyhow::bail!("Upstream timeouts must be > 0");
        }
        if self.chat_history_max_turns == 0 {
            anyhow::bail!("CHAT_HISTORY_MAX_TURNS must be > 0");
        }
        if self.chat_max_sessions == 0 {
            anyhow::bail!("CHAT_MAX_SESSIONS must be > 0");
        }
        if self.chat_session_ttl_secs == 0 {
            anyhow::bail!("CHAT_SESSION_TTL_SECS must be > 0");
        }

        if self.clash_api_token.is_none() {
            tracing::warn!("CLASH_API_TOKEN is not set; /player and /cards will fail");
        }
        if self.gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; /chat will fail");
        }
        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; falling back to permissive CORS");
        }

        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

fn is_truthy(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    normalized == "1" || normalized == "true" || normalized == "yes" || normalized == "on"
}
