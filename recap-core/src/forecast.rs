use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;

/// Client for the data.gov.sg real-time weather API.
///
/// Every method is a single GET against a fixed path; no retry, no
/// backoff. The payload comes back as raw JSON for the extractors in
/// [`crate::extract`] to walk.
#[derive(Debug, Clone)]
pub struct WeatherApi {
    config: ApiConfig,
    http: Client,
}

impl WeatherApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config, http: Client::new() }
    }

    pub async fn two_hour_forecast(&self) -> Result<Value> {
        self.fetch(&self.config.two_hour_path).await
    }

    pub async fn twenty_four_hour_forecast(&self) -> Result<Value> {
        self.fetch(&self.config.twenty_four_hour_path).await
    }

    pub async fn four_day_outlook(&self) -> Result<Value> {
        self.fetch(&self.config.four_day_path).await
    }

    pub async fn air_temperature(&self) -> Result<Value> {
        self.fetch(&self.config.air_temperature_path).await
    }

    pub async fn relative_humidity(&self) -> Result<Value> {
        self.fetch(&self.config.relative_humidity_path).await
    }

    async fn fetch(&self, path: &str) -> Result<Value> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        debug!(%url, "fetching weather payload");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Request to {url} failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse JSON from {url}"))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // back off to a char boundary so the slice cannot panic
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}
