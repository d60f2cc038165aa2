//! Lookup service - finds a free online edition for a catalogued book.
//!
//! For each book:
//! 1. Load it from the catalog (missing book is the only hard error)
//! 2. Skip placeholder titles
//! 3. Consult the curated cache
//! 4. Try providers one at a time in priority order until one hits
//!
//! Provider failures of any kind (errors, timeouts, panics, hits on the
//! wrong host) are logged and treated as misses. Books in a batch run
//! concurrently, but each book's provider chain is strictly sequential.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::{FutureExt, StreamExt, stream};
use tokio_util::sync::CancellationToken;

use super::cache::ResultCache;
use super::domain::{
    BulkLookupOutcome, CACHE_PROVIDER_NAME, LookupError, LookupQuery, ProviderDescriptor,
    messages,
};
use super::traits::{BookRepository, FreeTextProvider, TemporaryTitlePredicate};
use crate::config::LookupConfig;

/// Tuning for the lookup service
#[derive(Debug, Clone)]
pub struct LookupSettings {
    /// Books looked up concurrently by [`FreeTextLookupService::lookup_books`]
    pub batch_concurrency: usize,
    /// Upper bound on a single provider call
    pub adapter_timeout: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self::from(&LookupConfig::default())
    }
}

impl From<&LookupConfig> for LookupSettings {
    fn from(config: &LookupConfig) -> Self {
        Self {
            batch_concurrency: config.batch_concurrency.max(1),
            adapter_timeout: config.adapter_timeout(),
        }
    }
}

/// How a provider chain ended.
enum ChainEnd {
    Hit { provider: String, url: String },
    Exhausted,
    Cancelled,
}

/// What the curated cache knows about a query.
enum CacheAnswer {
    /// Space-joined URLs
    Found(String),
    KnownMissing,
}

/// Orchestrates cache and providers for single and batch lookups.
pub struct FreeTextLookupService {
    repository: Box<dyn BookRepository>,
    providers: Vec<Box<dyn FreeTextProvider>>,
    cache: Arc<ResultCache>,
    temporary_titles: Box<dyn TemporaryTitlePredicate>,
    settings: LookupSettings,
}

impl FreeTextLookupService {
    /// Create the service. Providers are ordered by priority here, once;
    /// equal priorities keep their registration order.
    pub fn new(
        repository: Box<dyn BookRepository>,
        mut providers: Vec<Box<dyn FreeTextProvider>>,
        cache: Arc<ResultCache>,
        temporary_titles: Box<dyn TemporaryTitlePredicate>,
        settings: LookupSettings,
    ) -> Self {
        providers.sort_by_key(|p| p.priority());

        tracing::info!(
            "Initialized {} free text providers: {:?}",
            providers.len(),
            providers.iter().map(|p| p.name()).collect::<Vec<_>>()
        );
        tracing::info!(
            "Free text cache contains {} authors with {} books",
            cache.author_count(),
            cache.book_count()
        );

        Self {
            repository,
            providers,
            cache,
            temporary_titles,
            settings,
        }
    }

    /// Provider names in the order they are searched.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Name, priority and expected hosts of each provider, in search order.
    pub fn provider_descriptors(&self) -> Vec<ProviderDescriptor> {
        self.providers
            .iter()
            .map(|p| ProviderDescriptor::from(&**p))
            .collect()
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Look up one book and record any URL found on it.
    pub async fn lookup_book(&self, book_id: i64) -> Result<BulkLookupOutcome, LookupError> {
        self.lookup_book_with_cancel(book_id, &CancellationToken::new())
            .await
    }

    /// Like [`lookup_book`](Self::lookup_book), stopping early when `cancel`
    /// fires. A cancelled lookup still reports the providers already tried.
    pub async fn lookup_book_with_cancel(
        &self,
        book_id: i64,
        cancel: &CancellationToken,
    ) -> Result<BulkLookupOutcome, LookupError> {
        let mut book = self
            .repository
            .find_book_by_id(book_id)
            .await?
            .ok_or(LookupError::BookNotFound(book_id))?;

        let mut outcome = BulkLookupOutcome {
            book_id: Some(book_id),
            book_title: Some(book.title.clone()),
            ..Default::default()
        };

        if self.temporary_titles.is_temporary_title(&book.title) {
            tracing::debug!(book_id, title = %book.title, "Skipping temporary title");
            outcome.error_message = Some(messages::TEMPORARY_TITLE.to_string());
            return Ok(outcome);
        }

        let query = LookupQuery::new(book.title.clone(), book.author_name());
        outcome.author_name = query.author().map(str::to_string);

        match self.consult_cache(&query) {
            Some(CacheAnswer::Found(urls)) => {
                book.set_free_text_url(urls.clone());
                self.repository.save_book(&book).await?;
                tracing::info!("Found free text for book {} in cache: {}", book_id, urls);
                return Ok(cache_hit(outcome, urls));
            }
            Some(CacheAnswer::KnownMissing) => {
                tracing::info!("Book {} was previously searched and not found (cached)", book_id);
                return Ok(cache_known_missing(outcome));
            }
            None => {}
        }

        let mut searched = Vec::with_capacity(self.providers.len());
        match self.run_chain(&query, cancel, &mut searched).await {
            ChainEnd::Hit { provider, url } => {
                book.set_free_text_url(url.clone());
                self.repository.save_book(&book).await?;
                tracing::info!("Found free text for book {}: {} via {}", book_id, url, provider);
                outcome.success = true;
                outcome.free_text_url = Some(url);
                outcome.provider_name = Some(provider);
            }
            ChainEnd::Exhausted => {
                tracing::info!(
                    "No free text found for book {} '{}' after searching {} providers",
                    book_id,
                    book.title,
                    searched.len()
                );
                outcome.error_message = Some(messages::NOT_FOUND_ANYWHERE.to_string());
            }
            ChainEnd::Cancelled => {
                tracing::info!(
                    "Lookup for book {} cancelled after {} providers",
                    book_id,
                    searched.len()
                );
                outcome.error_message = Some(messages::CANCELLED.to_string());
            }
        }
        outcome.providers_searched = searched;

        Ok(outcome)
    }

    /// Look up many books. Each book fails on its own; the batch never aborts.
    ///
    /// Outcomes come back in the order of `book_ids`.
    pub async fn lookup_books(&self, book_ids: &[i64]) -> Vec<BulkLookupOutcome> {
        self.lookup_books_with_cancel(book_ids, &CancellationToken::new())
            .await
    }

    /// Batch lookup sharing one cancellation token across all books.
    pub async fn lookup_books_with_cancel(
        &self,
        book_ids: &[i64],
        cancel: &CancellationToken,
    ) -> Vec<BulkLookupOutcome> {
        stream::iter(book_ids.iter().copied())
            .map(|book_id| async move {
                let lookup = AssertUnwindSafe(self.lookup_book_with_cancel(book_id, cancel));
                match lookup.catch_unwind().await {
                    Ok(Ok(outcome)) => outcome,
                    Ok(Err(e)) => {
                        tracing::error!("Error looking up free text for book {}: {}", book_id, e);
                        BulkLookupOutcome::batch_error(book_id, &e)
                    }
                    Err(_) => {
                        tracing::error!("Lookup for book {} panicked", book_id);
                        BulkLookupOutcome::batch_error(book_id, &"lookup panicked")
                    }
                }
            })
            .buffered(self.settings.batch_concurrency.max(1))
            .collect()
            .await
    }

    /// Run cache and providers for a free-standing query. Nothing is persisted.
    pub async fn search(&self, query: &LookupQuery, cancel: &CancellationToken) -> BulkLookupOutcome {
        let mut outcome = BulkLookupOutcome {
            book_title: Some(query.title.clone()),
            author_name: query.author().map(str::to_string),
            ..Default::default()
        };

        if self.temporary_titles.is_temporary_title(&query.title) {
            outcome.error_message = Some(messages::TEMPORARY_TITLE.to_string());
            return outcome;
        }

        match self.consult_cache(query) {
            Some(CacheAnswer::Found(urls)) => return cache_hit(outcome, urls),
            Some(CacheAnswer::KnownMissing) => return cache_known_missing(outcome),
            None => {}
        }

        let mut searched = Vec::with_capacity(self.providers.len());
        match self.run_chain(query, cancel, &mut searched).await {
            ChainEnd::Hit { provider, url } => {
                outcome.success = true;
                outcome.free_text_url = Some(url);
                outcome.provider_name = Some(provider);
            }
            ChainEnd::Exhausted => {
                outcome.error_message = Some(messages::NOT_FOUND_ANYWHERE.to_string());
            }
            ChainEnd::Cancelled => {
                outcome.error_message = Some(messages::CANCELLED.to_string());
            }
        }
        outcome.providers_searched = searched;
        outcome
    }

    fn consult_cache(&self, query: &LookupQuery) -> Option<CacheAnswer> {
        let urls = self.cache.lookup(query.author(), &query.title)?;
        if urls.is_empty() {
            Some(CacheAnswer::KnownMissing)
        } else {
            Some(CacheAnswer::Found(urls.join(" ")))
        }
    }

    /// Try providers in order. Each name is recorded before its call so a
    /// provider that fails or hangs is still listed.
    async fn run_chain(
        &self,
        query: &LookupQuery,
        cancel: &CancellationToken,
        searched: &mut Vec<String>,
    ) -> ChainEnd {
        for provider in &self.providers {
            if cancel.is_cancelled() {
                return ChainEnd::Cancelled;
            }

            let name = provider.name();
            searched.push(name.to_string());
            tracing::debug!(
                "Searching {} for '{}' by '{}'",
                name,
                query.title,
                query.author().unwrap_or("")
            );

            let call = AssertUnwindSafe(provider.search(query)).catch_unwind();
            let guarded = tokio::time::timeout(self.settings.adapter_timeout, call);

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return ChainEnd::Cancelled,
                result = guarded => result,
            };

            let result = match result {
                Err(_) => {
                    tracing::warn!(
                        "Provider {} timed out after {:?}",
                        name,
                        self.settings.adapter_timeout
                    );
                    continue;
                }
                Ok(Err(_)) => {
                    tracing::warn!("Provider {} panicked while searching '{}'", name, query.title);
                    continue;
                }
                Ok(Ok(Err(e))) => {
                    tracing::warn!("Provider {} failed for '{}': {}", name, query.title, e);
                    continue;
                }
                Ok(Ok(Ok(result))) => result,
            };

            if !result.found {
                tracing::debug!(
                    "Provider {} did not find book: {}",
                    name,
                    result.error_message.as_deref().unwrap_or("no reason given")
                );
                continue;
            }

            let Some(url) = result.url else {
                tracing::warn!("Provider {} reported a hit without a URL", name);
                continue;
            };

            let expected = provider.expected_domains();
            if !expected.is_empty() && !host_matches(&url, expected) {
                tracing::error!(
                    "Provider {} returned URL with unexpected domain: {} (expected one of: {:?})",
                    name,
                    url,
                    expected
                );
                continue;
            }

            return ChainEnd::Hit {
                provider: name.to_string(),
                url,
            };
        }

        ChainEnd::Exhausted
    }
}

fn cache_hit(mut outcome: BulkLookupOutcome, urls: String) -> BulkLookupOutcome {
    outcome.success = true;
    outcome.free_text_url = Some(urls);
    outcome.provider_name = Some(CACHE_PROVIDER_NAME.to_string());
    outcome
}

fn cache_known_missing(mut outcome: BulkLookupOutcome) -> BulkLookupOutcome {
    outcome.provider_name = Some(CACHE_PROVIDER_NAME.to_string());
    outcome.error_message = Some(messages::CACHED_NOT_FOUND.to_string());
    outcome
}

/// True when the URL's host contains one of the expected domains.
fn host_matches(url: &str, expected: &[&str]) -> bool {
    let Ok(parsed) = url::Url::parse(url) else {
        tracing::warn!("Failed to extract domain from URL: {}", url);
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    expected.iter().any(|domain| host.contains(domain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freetext::domain::ProviderError;
    use crate::freetext::placeholder::DatePrefixedTitles;
    use crate::freetext::traits::mocks::{MockBehavior, MockProvider, MockRepository};
    use crate::test_utils::mock_book;
    use std::sync::atomic::Ordering;

    fn service_with(
        repository: MockRepository,
        providers: Vec<MockProvider>,
        cache: ResultCache,
    ) -> FreeTextLookupService {
        service_with_settings(repository, providers, cache, LookupSettings::default())
    }

    fn service_with_settings(
        repository: MockRepository,
        providers: Vec<MockProvider>,
        cache: ResultCache,
        settings: LookupSettings,
    ) -> FreeTextLookupService {
        FreeTextLookupService::new(
            Box::new(repository),
            providers
                .into_iter()
                .map(|p| Box::new(p) as Box<dyn FreeTextProvider>)
                .collect(),
            Arc::new(cache),
            Box::new(DatePrefixedTitles),
            settings,
        )
    }

    fn kidnapped() -> MockRepository {
        MockRepository::with_books(vec![mock_book(1, "Kidnapped", Some("Robert Louis Stevenson"))])
    }

    #[test]
    fn test_host_matches() {
        assert!(host_matches("https://www.gutenberg.org/ebooks/421", &["gutenberg.org"]));
        assert!(!host_matches("https://evil.example/ebooks/421", &["gutenberg.org"]));
        assert!(!host_matches("not a url", &["gutenberg.org"]));
    }

    #[test]
    fn test_providers_sorted_stably_by_priority() {
        let service = service_with(
            MockRepository::default(),
            vec![
                MockProvider::miss("Late", 20),
                MockProvider::miss("First Ten", 10),
                MockProvider::miss("Second Ten", 10),
                MockProvider::miss("Earliest", 5),
            ],
            ResultCache::empty(),
        );
        assert_eq!(
            service.provider_names(),
            vec!["Earliest", "First Ten", "Second Ten", "Late"]
        );
        assert_eq!(service.provider_descriptors()[0].priority, 5);
    }

    #[tokio::test]
    async fn test_temporary_title_skipped() {
        let first = MockProvider::hit("First", 10, "https://example.org/x");
        let calls = first.calls();
        let repository =
            MockRepository::with_books(vec![mock_book(3, "2025-01-07 10:42", Some("Someone"))]);
        let service = service_with(repository, vec![first], ResultCache::empty());

        let outcome = service.lookup_book(3).await.unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.error_message.as_deref(), Some("Temporary title - skipped"));
        assert!(outcome.providers_searched.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_back_to_next_provider() {
        let first = MockProvider::miss("First", 10);
        let second = MockProvider::hit("Second", 20, "https://www.gutenberg.org/ebooks/421");
        let third = MockProvider::hit("Third", 30, "https://example.org/never");
        let third_calls = third.calls();

        // Registered out of order on purpose
        let service = service_with(kidnapped(), vec![third, second, first], ResultCache::empty());
        let outcome = service.lookup_book(1).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.provider_name.as_deref(), Some("Second"));
        assert_eq!(outcome.providers_searched, vec!["First", "Second"]);
        assert_eq!(
            outcome.free_text_url.as_deref(),
            Some("https://www.gutenberg.org/ebooks/421")
        );
        assert_eq!(third_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_hit_is_persisted() {
        let service = service_with(
            kidnapped(),
            vec![MockProvider::hit("Only", 1, "https://archive.org/details/kidnapped")],
            ResultCache::empty(),
        );

        service.lookup_book(1).await.unwrap();

        let book = service.repository.find_book_by_id(1).await.unwrap().unwrap();
        assert_eq!(
            book.free_text_url.as_deref(),
            Some("https://archive.org/details/kidnapped")
        );
    }

    #[tokio::test]
    async fn test_cache_short_circuits_providers() {
        let provider = MockProvider::hit("Provider", 10, "https://example.org/x");
        let calls = provider.calls();
        let cache = ResultCache::from_entries(vec![(
            "Robert Louis Stevenson",
            "Kidnapped",
            vec![
                "https://www.gutenberg.org/ebooks/421".to_string(),
                "https://librivox.org/kidnapped-by-robert-louis-stevenson/".to_string(),
            ],
        )]);
        let service = service_with(kidnapped(), vec![provider], cache);

        let outcome = service.lookup_book(1).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.provider_name.as_deref(), Some("Cache"));
        assert_eq!(
            outcome.free_text_url.as_deref(),
            Some(
                "https://www.gutenberg.org/ebooks/421 https://librivox.org/kidnapped-by-robert-louis-stevenson/"
            )
        );
        assert!(outcome.providers_searched.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let book = service.repository.find_book_by_id(1).await.unwrap().unwrap();
        assert!(book.free_text_url.unwrap().starts_with("https://www.gutenberg.org/ebooks/421 "));
    }

    #[tokio::test]
    async fn test_negative_cache_entry() {
        let provider = MockProvider::hit("Provider", 10, "https://example.org/x");
        let calls = provider.calls();
        let cache = ResultCache::from_entries(vec![(
            "Robert Louis Stevenson",
            "Kidnapped",
            Vec::new(),
        )]);
        let service = service_with(kidnapped(), vec![provider], cache);

        let outcome = service.lookup_book(1).await.unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.provider_name.as_deref(), Some("Cache"));
        assert_eq!(
            outcome.error_message.as_deref(),
            Some("Previously searched - not found (cached)")
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exhausted_lists_every_provider() {
        let service = service_with(
            kidnapped(),
            vec![MockProvider::miss("A", 1), MockProvider::miss("B", 2)],
            ResultCache::empty(),
        );

        let outcome = service.lookup_book(1).await.unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.error_message.as_deref(), Some("Not found in any provider"));
        assert_eq!(outcome.providers_searched, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_provider_failures_are_misses() {
        let service = service_with(
            kidnapped(),
            vec![
                MockProvider::new("Broken", 1, MockBehavior::Fail(ProviderError::Timeout)),
                MockProvider::new("Exploding", 2, MockBehavior::Panic),
                MockProvider::hit("Working", 3, "https://www.gutenberg.org/ebooks/421"),
            ],
            ResultCache::empty(),
        );

        let outcome = service.lookup_book(1).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.provider_name.as_deref(), Some("Working"));
        assert_eq!(outcome.providers_searched, vec!["Broken", "Exploding", "Working"]);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let settings = LookupSettings {
            batch_concurrency: 1,
            adapter_timeout: Duration::from_millis(50),
        };
        let service = service_with_settings(
            kidnapped(),
            vec![
                MockProvider::new("Slow", 1, MockBehavior::Slow(Duration::from_secs(30))),
                MockProvider::hit("Fast", 2, "https://www.gutenberg.org/ebooks/421"),
            ],
            ResultCache::empty(),
            settings,
        );

        let outcome = service.lookup_book(1).await.unwrap();

        assert_eq!(outcome.provider_name.as_deref(), Some("Fast"));
        assert_eq!(outcome.providers_searched, vec!["Slow", "Fast"]);
    }

    #[tokio::test]
    async fn test_unexpected_domain_is_skipped() {
        let service = service_with(
            kidnapped(),
            vec![
                MockProvider::hit("Wrong Host", 1, "https://mirror.example/kidnapped")
                    .with_domains(&["gutenberg.org"]),
                MockProvider::hit("Right Host", 2, "https://www.gutenberg.org/ebooks/421")
                    .with_domains(&["gutenberg.org"]),
            ],
            ResultCache::empty(),
        );

        let outcome = service.lookup_book(1).await.unwrap();

        assert_eq!(outcome.provider_name.as_deref(), Some("Right Host"));
        assert_eq!(outcome.providers_searched, vec!["Wrong Host", "Right Host"]);
    }

    #[tokio::test]
    async fn test_missing_book_is_domain_error() {
        let service = service_with(MockRepository::default(), vec![], ResultCache::empty());
        let err = service.lookup_book(99).await.unwrap_err();
        assert_eq!(err, LookupError::BookNotFound(99));
    }

    #[tokio::test]
    async fn test_batch_isolates_failures() {
        let repository = MockRepository::with_books(vec![
            mock_book(1, "Broken Record", Some("Nobody")),
            mock_book(2, "Kidnapped", Some("Robert Louis Stevenson")),
        ])
        .failing_on(1);
        let service = service_with(
            repository,
            vec![MockProvider::hit("Only", 1, "https://www.gutenberg.org/ebooks/421")],
            ResultCache::empty(),
        );

        let outcomes = service.lookup_books(&[1, 2, 3]).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].book_id, Some(1));
        assert!(!outcomes[0].success);
        assert_eq!(
            outcomes[0].error_message.as_deref(),
            Some("Error: Repository error: connection reset")
        );
        assert!(outcomes[0].providers_searched.is_empty());

        assert_eq!(outcomes[1].book_id, Some(2));
        assert!(outcomes[1].success);

        assert_eq!(
            outcomes[2].error_message.as_deref(),
            Some("Error: Book not found: 3")
        );
    }

    #[tokio::test]
    async fn test_cancel_before_start() {
        let provider = MockProvider::hit("Provider", 1, "https://example.org/x");
        let calls = provider.calls();
        let service = service_with(kidnapped(), vec![provider], ResultCache::empty());

        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = service.lookup_book_with_cancel(1, &cancel).await.unwrap();

        assert_eq!(outcome.error_message.as_deref(), Some("Lookup cancelled"));
        assert!(outcome.providers_searched.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_mid_chain_keeps_audit_trail() {
        let settings = LookupSettings {
            batch_concurrency: 1,
            adapter_timeout: Duration::from_secs(60),
        };
        let service = service_with_settings(
            kidnapped(),
            vec![
                MockProvider::miss("Quick Miss", 1),
                MockProvider::new("Hanging", 2, MockBehavior::Slow(Duration::from_secs(30))),
                MockProvider::hit("Never Reached", 3, "https://example.org/x"),
            ],
            ResultCache::empty(),
            settings,
        );

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let outcome = service.lookup_book_with_cancel(1, &cancel).await.unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.error_message.as_deref(), Some("Lookup cancelled"));
        assert_eq!(outcome.providers_searched, vec!["Quick Miss", "Hanging"]);
    }

    #[tokio::test]
    async fn test_adhoc_search_does_not_persist() {
        let service = service_with(
            MockRepository::default(),
            vec![MockProvider::hit("Only", 1, "https://www.gutenberg.org/ebooks/1342")],
            ResultCache::empty(),
        );

        let query = LookupQuery::new("Pride and Prejudice", Some("Jane Austen"));
        let outcome = service.search(&query, &CancellationToken::new()).await;

        assert!(outcome.success);
        assert_eq!(outcome.book_id, None);
        assert_eq!(outcome.author_name.as_deref(), Some("Jane Austen"));
        assert_eq!(outcome.providers_searched, vec!["Only"]);
    }

    #[tokio::test]
    async fn test_book_without_author() {
        let repository = MockRepository::with_books(vec![mock_book(5, "Beowulf", None)]);
        let service = service_with(
            repository,
            vec![MockProvider::hit("Only", 1, "https://www.gutenberg.org/ebooks/16328")],
            ResultCache::empty(),
        );

        let outcome = service.lookup_book(5).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.author_name, None);
    }
}
