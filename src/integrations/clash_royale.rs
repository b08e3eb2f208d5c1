use super::GameDataSource;
use crate::{
    config::Config,
    error::{AppError, Result},
};
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use serde_json::Value;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct ClashRoyaleClient {
    api_url: String,
    api_token: Option<String>,
    client: Client,
}

impl ClashRoyaleClient {
    /// Constructs a client for the official Clash Royale API.
    ///
    /// # Arguments
    /// * `api_url` - Base URL, e.g. `https://api.clashroyale.com/v1`.
    /// * `api_token` - Bearer token. A missing token is only reported when a request is made.
    /// * `timeout` - Per-request timeout.
    ///
    /// # Returns
    /// * `Err(AppError::Internal)` when the HTTP client cannot be built.
    pub fn new(api_url: String, api_token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Clash HTTP client init failed: {}", e)))?;
        Ok(Self {
            api_url,
            api_token,
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.clash_api_url.clone(),
            config.clash_api_token.clone(),
            Duration::from_secs(config.clash_api_timeout_secs),
        )
    }

    fn token(&self) -> Result<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::Configuration("CLASH_API_TOKEN environment variable is not set".into())
            })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(self.api_url.trim_end_matches('/'))
            .map_err(|e| AppError::Configuration(format!("Invalid CLASH_API_URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration("CLASH_API_URL cannot be a base URL".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        let token = self.token()?;
        tracing::debug!("Fetching data from: {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl GameDataSource for ClashRoyaleClient {
    async fn fetch_player(&self, tag: &str) -> Result<Value> {
        let tag = normalize_tag(tag)?;
        let url = self.endpoint(&["players", &tag])?;
        self.get_json(url).await
    }

    async fn fetch_cards(&self) -> Result<Vec<Value>> {
        let url = self.endpoint(&["cards"])?;
        let payload = self.get_json(url).await?;
        Ok(extract_items(payload))
    }
}

/// Player tags are case-insensitive upstream and always start with `#`.
pub fn normalize_tag(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Player tag is required".into()));
    }

    let upper = trimmed.to_uppercase();
    if upper.starts_with('#') {
        Ok(upper)
    } else {
        Ok(format!("#{}", upper))
    }
}

fn extract_items(payload: Value) -> Vec<Value> {
    match payload {
        Value::Object(mut fields) => match fields.remove("items") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
