//! loc.gov books search client

use std::sync::Arc;

use async_trait::async_trait;

use super::{adapter, dto};
use crate::freetext::domain::{LookupQuery, LookupResult, ProviderError};
use crate::freetext::providers::{parse_json, resolve, search_terms, url_with_params};
use crate::freetext::traits::{FreeTextProvider, HttpTransport};

const PROVIDER_NAME: &str = "LOC Open Access Books";
const PRIORITY: i32 = 15;
const EXPECTED_DOMAINS: &[&str] = &["loc.gov"];
const SEARCH_URL: &str = "https://www.loc.gov/books/";
const PAGE_SIZE: &str = "10";

pub struct LocOpenAccessProvider {
    transport: Arc<dyn HttpTransport>,
}

impl LocOpenAccessProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    async fn fetch(&self, query: &LookupQuery) -> Result<dto::SearchResponse, ProviderError> {
        let terms = search_terms(query);
        let url = url_with_params(
            SEARCH_URL,
            &[
                ("q", terms.as_str()),
                ("fo", "json"),
                ("fa", "online-format:online text"),
                ("c", PAGE_SIZE),
            ],
        )?;
        tracing::debug!("{}: GET {}", PROVIDER_NAME, url);
        let body = self.transport.get_text(&url).await?;
        parse_json(&body)
    }
}

#[async_trait]
impl FreeTextProvider for LocOpenAccessProvider {
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
        Ok(resolve(PROVIDER_NAME, adapter::to_candidates(response), query))
    }
}
