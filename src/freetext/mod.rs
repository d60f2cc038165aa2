//! Free-text discovery engine.
//!
//! Given a catalogued book, find a legally free online edition (text or
//! audio) by consulting a curated cache and then a chain of external
//! sources in priority order.
//!
//! - [`normalize`] and [`matcher`] decide when two titles or authors agree
//! - [`cache`] holds curated results consulted before any network call
//! - [`providers`] adapts each external source to [`traits::FreeTextProvider`]
//! - [`service`] orchestrates the lookup and records hits on the book

pub mod cache;
pub mod domain;
pub mod matcher;
pub mod normalize;
pub mod placeholder;
pub mod providers;
pub mod service;
pub mod traits;
pub mod transport;

use std::sync::Arc;

pub use cache::ResultCache;
pub use domain::{BulkLookupOutcome, LookupError, LookupQuery, LookupResult, ProviderError};
pub use service::{FreeTextLookupService, LookupSettings};
pub use traits::{BookRepository, FreeTextProvider, HttpTransport, NoCatalog};

use crate::config::Config;
use crate::error::{Error, Result, ResultExt};

/// Wire up the lookup service from configuration: a shared HTTP transport,
/// the configured provider set, the curated cache and the default
/// placeholder-title rule.
pub fn build_lookup_service(
    config: &Config,
    repository: Box<dyn BookRepository>,
) -> Result<FreeTextLookupService> {
    let transport = transport::ReqwestTransport::new(&config.http)
        .map_err(|e| Error::Http(e.to_string()))?;
    let providers = providers::build_providers(&config.providers, Arc::new(transport));

    let cache = ResultCache::load(config.lookup.cache_file.as_deref())
        .with_context("loading curated cache")?;

    Ok(FreeTextLookupService::new(
        repository,
        providers,
        Arc::new(cache),
        Box::new(placeholder::DatePrefixedTitles),
        LookupSettings::from(&config.lookup),
    ))
}
