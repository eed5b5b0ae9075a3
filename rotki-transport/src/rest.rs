use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rotki_utils::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestClientSettings {
    /// Timeout of a single request. Default: `30000`
    #[serde(with = "serde_duration_ms")]
    pub timeout: Duration,
    /// Maximum time to establish a connection. Default: `5000`
    #[serde(with = "serde_duration_ms")]
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for RestClientSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            user_agent: concat!("rotki-store/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

pub struct RestClient {
    client: reqwest::Client,
}

impl RestClient {
    pub fn new(settings: RestClientSettings) -> Result<Arc<Self>> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .user_agent(settings.user_agent)
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Arc::new(Self { client }))
    }
}

#[async_trait::async_trait]
impl rotki_store::external::RestConnection for RestClient {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            // Error responses still carry the JSON envelope with a message
            log::debug!("{url} responded with {status}");
        }

        Ok(response.text().await?)
    }
}
