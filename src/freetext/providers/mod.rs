//! Provider adapters and the registry that assembles them.
//!
//! Three shapes of source are supported:
//! - JSON APIs ([`gutenberg`], [`internet_archive`], [`librivox`],
//!   [`loc_open_access`]), each with a `dto` and `adapter` module
//! - MARC-XML over SRU ([`loc_catalog`])
//! - HTML pages ([`ccel`], [`online_books`], and the table-driven
//!   [`link_sites`])
//!
//! Every adapter turns its source's records into [`Candidate`]s and lets
//! [`resolve`] decide, so the matching rules live in one place. New sources
//! are added by registering another adapter in [`build_providers`].

pub mod ccel;
pub mod gutenberg;
pub mod internet_archive;
pub mod librivox;
pub mod link_sites;
pub mod loc_catalog;
pub mod loc_open_access;
pub mod online_books;

use std::sync::Arc;

use async_trait::async_trait;

use super::domain::{LookupQuery, LookupResult, ProviderError, messages};
use super::matcher::{any_author_matches, canonical_author, last_name, title_matches};
use super::normalize::normalize_for_search;
use super::traits::{FreeTextProvider, HttpTransport};
use crate::config::ProvidersConfig;

// ============================================================================
// Candidate validation
// ============================================================================

/// One record a source returned, reduced to what matching needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    /// Credited authors; empty when the source gives none
    pub authors: Vec<String>,
    pub url: String,
}

impl Candidate {
    pub fn new(title: impl Into<String>, authors: Vec<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors,
            url: url.into(),
        }
    }
}

/// Pick the first candidate that really is the queried work.
///
/// Titles must match. With an author in the query, a candidate that lists
/// authors must credit a matching one; a candidate that lists none is only
/// trusted when it is the single distinct title match.
pub fn pick_validated<I>(candidates: I, query: &LookupQuery) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut title_matches_seen: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        if candidate.url.trim().is_empty() || !title_matches(&candidate.title, &query.title) {
            continue;
        }
        if title_matches_seen.iter().any(|seen| seen.url == candidate.url) {
            continue;
        }
        title_matches_seen.push(candidate);
    }

    let Some(author) = query.author() else {
        return title_matches_seen.into_iter().next();
    };

    if let Some(index) = title_matches_seen
        .iter()
        .position(|c| !c.authors.is_empty() && any_author_matches(&c.authors, author))
    {
        return Some(title_matches_seen.swap_remove(index));
    }

    if title_matches_seen.len() == 1 && title_matches_seen[0].authors.is_empty() {
        return title_matches_seen.pop();
    }
    None
}

/// Validate candidates and turn the answer into a [`LookupResult`].
pub fn resolve<I>(provider_name: &str, candidates: I, query: &LookupQuery) -> LookupResult
where
    I: IntoIterator<Item = Candidate>,
{
    let candidates: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| !c.url.trim().is_empty())
        .collect();
    if candidates.is_empty() {
        return LookupResult::not_found(provider_name, "No results found");
    }

    match pick_validated(candidates.iter().cloned(), query) {
        Some(hit) => {
            tracing::debug!("{}: Found match '{}' -> {}", provider_name, hit.title, hit.url);
            LookupResult::found(provider_name, hit.url)
        }
        None if candidates.iter().any(|c| title_matches(&c.title, &query.title)) => {
            LookupResult::not_found(provider_name, messages::AUTHOR_NOT_FOUND)
        }
        None => LookupResult::not_found(provider_name, messages::TITLE_NOT_FOUND),
    }
}

/// Free-text search string: search-normalized title plus the author's surname.
pub fn search_terms(query: &LookupQuery) -> String {
    let title = normalize_for_search(&query.title);
    let surname = query
        .author()
        .map(canonical_author)
        .map(|author| last_name(&author).to_string())
        .unwrap_or_default();

    match (title.is_empty(), surname.is_empty()) {
        (_, true) => title,
        (true, false) => surname,
        (false, false) => format!("{title} {surname}"),
    }
}

/// Build a URL with encoded query parameters.
pub(crate) fn url_with_params(base: &str, params: &[(&str, &str)]) -> Result<String, ProviderError> {
    url::Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| ProviderError::InvalidUrl(format!("{base}: {e}")))
}

/// Parse a JSON body into a DTO, reporting failures as parse errors.
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))
}

// ============================================================================
// Registry
// ============================================================================

/// A provider registered under a configured priority.
struct Reprioritized {
    inner: Box<dyn FreeTextProvider>,
    priority: i32,
}

#[async_trait]
impl FreeTextProvider for Reprioritized {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn expected_domains(&self) -> &[&str] {
        self.inner.expected_domains()
    }

    async fn search(&self, query: &LookupQuery) -> Result<LookupResult, ProviderError> {
        self.inner.search(query).await
    }
}

/// Every built-in provider, sharing one transport.
pub fn default_providers(transport: Arc<dyn HttpTransport>) -> Vec<Box<dyn FreeTextProvider>> {
    let mut providers: Vec<Box<dyn FreeTextProvider>> = vec![
        Box::new(internet_archive::InternetArchiveProvider::new(Arc::clone(&transport))),
        Box::new(gutenberg::GutenbergProvider::new(Arc::clone(&transport))),
        Box::new(online_books::OnlineBooksProvider::new(Arc::clone(&transport))),
        Box::new(loc_open_access::LocOpenAccessProvider::new(Arc::clone(&transport))),
        Box::new(loc_catalog::LocCatalogProvider::new(Arc::clone(&transport))),
        Box::new(librivox::LibriVoxProvider::new(Arc::clone(&transport))),
        Box::new(ccel::CcelProvider::new(Arc::clone(&transport))),
    ];

    for site in link_sites::SITES {
        providers.push(Box::new(link_sites::LinkSiteProvider::new(
            site,
            Arc::clone(&transport),
        )));
    }

    providers
}

/// Built-in providers with the configured exclusions and priority overrides.
pub fn build_providers(
    config: &ProvidersConfig,
    transport: Arc<dyn HttpTransport>,
) -> Vec<Box<dyn FreeTextProvider>> {
    default_providers(transport)
        .into_iter()
        .filter(|provider| {
            let disabled = config.is_disabled(provider.name());
            if disabled {
                tracing::info!("Provider {} disabled by configuration", provider.name());
            }
            !disabled
        })
        .map(|provider| match config.priority_overrides.get(provider.name()) {
            Some(&priority) => Box::new(Reprioritized {
                inner: provider,
                priority,
            }) as Box<dyn FreeTextProvider>,
            None => provider,
        })
        .collect()
}
