//! Advanced-search client

use std::sync::Arc;

use async_trait::async_trait;

use super::{adapter, dto};
use crate::freetext::domain::{LookupQuery, LookupResult, ProviderError};
use crate::freetext::providers::{parse_json, resolve, url_with_params};
use crate::freetext::traits::{FreeTextProvider, HttpTransport};

const PROVIDER_NAME: &str = "Internet Archive";
const PRIORITY: i32 = 5;
const EXPECTED_DOMAINS: &[&str] = &["archive.org"];
const SEARCH_URL: &str = "https://archive.org/advancedsearch.php";
const MAX_ROWS: &str = "10";

/// Searches archive.org texts by exact title phrase and creator.
pub struct InternetArchiveProvider {
    transport: Arc<dyn HttpTransport>,
}

impl InternetArchiveProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    async fn fetch(&self, query: &LookupQuery) -> Result<dto::SearchResponse, ProviderError> {
        let q = build_query(query);
        let url = url_with_params(
            SEARCH_URL,
            &[
                ("q", q.as_str()),
                ("fl[]", "identifier"),
                ("fl[]", "title"),
                ("fl[]", "creator"),
                ("fl[]", "collection"),
                ("fl[]", "access-restricted-item"),
                ("rows", MAX_ROWS),
                ("output", "json"),
            ],
        )?;
        tracing::debug!("{}: GET {}", PROVIDER_NAME, url);
        let body = self.transport.get_text(&url).await?;
        parse_json(&body)
    }
}

/// Lucene-style query: texts only, quoted title, quoted creator if known.
fn build_query(query: &LookupQuery) -> String {
    let mut q = format!("mediatype:texts AND title:\"{}\"", escape(&query.title));
    if let Some(author) = query.author() {
        q.push_str(&format!(" AND creator:\"{}\"", escape(author)));
    }
    q
}

fn escape(input: &str) -> String {
    input.replace('"', "\\\"").replace(':', "\\:")
}

#[async_trait]
impl FreeTextProvider for InternetArchiveProvider {
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
