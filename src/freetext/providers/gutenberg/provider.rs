//! Gutendex search client

use std::sync::Arc;

use async_trait::async_trait;

use super::{adapter, dto};
use crate::freetext::domain::{LookupQuery, LookupResult, ProviderError};
use crate::freetext::providers::{parse_json, resolve, search_terms, url_with_params};
use crate::freetext::traits::{FreeTextProvider, HttpTransport};

const PROVIDER_NAME: &str = "Project Gutenberg";
const PRIORITY: i32 = 10;
const EXPECTED_DOMAINS: &[&str] = &["gutenberg.org"];
const SEARCH_URL: &str = "https://gutendex.com/books/";

/// Searches Gutendex by title words and author surname.
pub struct GutenbergProvider {
    transport: Arc<dyn HttpTransport>,
}

impl GutenbergProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    async fn fetch(&self, query: &LookupQuery) -> Result<dto::BooksResponse, ProviderError> {
        let terms = search_terms(query);
        let url = url_with_params(SEARCH_URL, &[("search", terms.as_str())])?;
        tracing::debug!("{}: GET {}", PROVIDER_NAME, url);
        let body = self.transport.get_text(&url).await?;
        parse_json(&body)
    }
}

#[async_trait]
impl FreeTextProvider for GutenbergProvider {
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
