//! reqwest-backed [`HttpTransport`].
//!
//! One client is built at startup and shared by every provider, so all
//! outbound calls carry the same User-Agent and timeouts.

use async_trait::async_trait;

use super::domain::ProviderError;
use super::traits::HttpTransport;
use crate::config::HttpConfig;

/// HTTP transport over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client with the configured timeouts and User-Agent.
    pub fn new(config: &HttpConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_text(&self, url: &str) -> Result<String, ProviderError> {
        tracing::trace!(url, "GET");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response.text().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else if e.is_builder() {
        ProviderError::InvalidUrl(e.to_string())
    } else {
        ProviderError::Network(e.to_string())
    }
}
