use crate::{
    constants::EGRESS_IP_LOOKUP_URL,
    error::{AppError, Result},
};
use reqwest::Client;
use std::time::Duration;

/// Clash Royale API keys are bound to caller IPs, so the public egress
/// address is what has to be whitelisted on the developer portal.
pub async fn fetch_egress_ip(client: &Client, lookup_url: &str) -> Result<String> {
    let response = client.get(lookup_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::UpstreamHttp {
            status: status.as_u16(),
            body,
        });
    }

    let ip = response.text().await?.trim().to_string();
    if ip.is_empty() {
        return Err(AppError::ExternalApi("Egress IP lookup returned an empty body".into()));
    }
    Ok(ip)
}

/// Logs the egress IP once; failures only produce a warning.
pub async fn log_egress_ip() {
    let client = match Client::builder().timeout(Duration::from_secs(5)).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!("Egress IP lookup skipped: {}", e);
            return;
        }
    };

    match fetch_egress_ip(&client, EGRESS_IP_LOOKUP_URL).await {
        Ok(ip) => tracing::info!("Egress IP: {} (whitelist it for CLASH_API_TOKEN)", ip),
        Err(e) => tracing::warn!("Egress IP lookup failed: {}", e),
    }
}
