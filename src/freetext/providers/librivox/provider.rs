//! Audiobook feed client

use std::sync::Arc;

use async_trait::async_trait;

use super::{adapter, dto};
use crate::freetext::domain::{LookupQuery, LookupResult, ProviderError};
use crate::freetext::normalize::normalize_for_search;
use crate::freetext::providers::{parse_json, resolve, url_with_params};
use crate::freetext::traits::{FreeTextProvider, HttpTransport};

const PROVIDER_NAME: &str = "LibriVox (Audiobooks)";
const PRIORITY: i32 = 30;
const EXPECTED_DOMAINS: &[&str] = &["librivox.org"];
const FEED_URL: &str = "https://librivox.org/api/feed/audiobooks/";

/// Searches LibriVox recordings by title prefix.
pub struct LibriVoxProvider {
    transport: Arc<dyn HttpTransport>,
}

impl LibriVoxProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    async fn fetch(&self, query: &LookupQuery) -> Result<dto::FeedResponse, ProviderError> {
        let prefix = format!("^{}", normalize_for_search(&query.title));
        let url = url_with_params(FEED_URL, &[("format", "json"), ("title", prefix.as_str())])?;
        tracing::debug!("{}: GET {}", PROVIDER_NAME, url);

        match self.transport.get_text(&url).await {
            Ok(body) => parse_json(&body),
            Err(ProviderError::Http { status: 404, .. }) => Ok(dto::FeedResponse::default()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl FreeTextProvider for LibriVoxProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn priority(&self) -> i32 {
        PRIORITY
    }

    fn expected_domains(&self) -> &[&str] {
        EXPECTED_DOMAINS
    }

    async fn search(&self, query: &LookupQuery) -> Result<LookupResult, ProviderError> {
        let response = self.fetch(query).await?;
        if let Some(error) = &response.error {
            tracing::debug!("{}: {}", PROVIDER_NAME, error);
        }
        Ok(resolve(PROVIDER_NAME, adapter::to_candidates(response), query))
    }
}
