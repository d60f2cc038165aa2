//! Capability traits at the seams of the lookup engine.
//!
//! The lookup service only ever talks to these traits, so tests can swap in
//! the mocks below for providers, the catalog and the network.

use async_trait::async_trait;

use super::domain::{LookupError, LookupQuery, LookupResult, ProviderDescriptor, ProviderError};
use crate::model::Book;

/// One external source of free editions.
///
/// Implementations must validate candidates with the title/author matchers
/// and must not report a hit on an ambiguous title-only match when an author
/// was given.
#[async_trait]
pub trait FreeTextProvider: Send + Sync {
    /// Stable, human-readable name, used in outcomes and logs.
    fn name(&self) -> &str;

    /// Lower values are searched first.
    fn priority(&self) -> i32;

    /// Hosts a hit URL must belong to. Empty means any host.
    fn expected_domains(&self) -> &[&str] {
        &[]
    }

    /// Search this source for a free edition.
    async fn search(&self, query: &LookupQuery) -> Result<LookupResult, ProviderError>;
}

impl From<&dyn FreeTextProvider> for ProviderDescriptor {
    fn from(provider: &dyn FreeTextProvider) -> Self {
        Self {
            name: provider.name().to_string(),
            priority: provider.priority(),
            expected_domains: provider
                .expected_domains()
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

/// The catalog the service reads books from and writes URLs back to.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_book_by_id(&self, id: i64) -> Result<Option<Book>, LookupError>;

    async fn save_book(&self, book: &Book) -> Result<(), LookupError>;
}

/// A catalog with no books, for ad-hoc searches that persist nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCatalog;

#[async_trait]
impl BookRepository for NoCatalog {
    async fn find_book_by_id(&self, _id: i64) -> Result<Option<Book>, LookupError> {
        Ok(None)
    }

    async fn save_book(&self, _book: &Book) -> Result<(), LookupError> {
        Ok(())
    }
}

/// GET-only HTTP access shared by every provider.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Fetch `url` and return the body as text.
    async fn get_text(&self, url: &str) -> Result<String, ProviderError>;
}

/// Recognizes placeholder titles assigned at ingestion time.
pub trait TemporaryTitlePredicate: Send + Sync {
    fn is_temporary_title(&self, title: &str) -> bool;
}

impl<F> TemporaryTitlePredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_temporary_title(&self, title: &str) -> bool {
        self(title)
    }
}

/// Mock implementations for testing.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    // ========================================================================
    // Providers
    // ========================================================================

    /// What a [`MockProvider`] does when searched.
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        Hit(String),
        Miss,
        Fail(ProviderError),
        Panic,
        /// Sleep this long, then miss
        Slow(Duration),
    }

    /// Provider returning a fixed answer and counting its calls.
    pub struct MockProvider {
        pub name: String,
        pub priority: i32,
        pub domains: Vec<&'static str>,
        pub behavior: MockBehavior,
        calls: Arc<AtomicUsize>,
    }

    impl MockProvider {
        pub fn new(name: &str, priority: i32, behavior: MockBehavior) -> Self {
            Self {
                name: name.to_string(),
                priority,
                domains: Vec::new(),
                behavior,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn hit(name: &str, priority: i32, url: &str) -> Self {
            Self::new(name, priority, MockBehavior::Hit(url.to_string()))
        }

        pub fn miss(name: &str, priority: i32) -> Self {
            Self::new(name, priority, MockBehavior::Miss)
        }

        pub fn with_domains(mut self, domains: &[&'static str]) -> Self {
            self.domains = domains.to_vec();
            self
        }

        /// Shared call counter, still readable after the mock is boxed.
        pub fn calls(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl FreeTextProvider for MockProvider {
        fn name(&self) -> &str {
            &self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn expected_domains(&self) -> &[&str] {
            &self.domains
        }

        async fn search(&self, _query: &LookupQuery) -> Result<LookupResult, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                MockBehavior::Hit(url) => Ok(LookupResult::found(&self.name, url)),
                MockBehavior::Miss => Ok(LookupResult::not_found(&self.name, "Not found")),
                MockBehavior::Fail(err) => Err(err.clone()),
                MockBehavior::Panic => panic!("mock provider {} exploded", self.name),
                MockBehavior::Slow(delay) => {
                    tokio::time::sleep(*delay).await;
                    Ok(LookupResult::not_found(&self.name, "Not found"))
                }
            }
        }
    }

    // ========================================================================
    // Repository
    // ========================================================================

    /// In-memory catalog that records every save.
    #[derive(Default)]
    pub struct MockRepository {
        books: Mutex<HashMap<i64, Book>>,
        saved: Mutex<Vec<Book>>,
        /// IDs whose lookup fails with a repository error
        pub failing_ids: Vec<i64>,
    }

    impl MockRepository {
        pub fn with_books(books: Vec<Book>) -> Self {
            Self {
                books: Mutex::new(books.into_iter().map(|b| (b.id, b)).collect()),
                ..Default::default()
            }
        }

        pub fn failing_on(mut self, id: i64) -> Self {
            self.failing_ids.push(id);
            self
        }

        pub fn saved(&self) -> Vec<Book> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BookRepository for MockRepository {
        async fn find_book_by_id(&self, id: i64) -> Result<Option<Book>, LookupError> {
            if self.failing_ids.contains(&id) {
                return Err(LookupError::Repository("connection reset".to_string()));
            }
            Ok(self.books.lock().unwrap().get(&id).cloned())
        }

        async fn save_book(&self, book: &Book) -> Result<(), LookupError> {
            self.books.lock().unwrap().insert(book.id, book.clone());
            self.saved.lock().unwrap().push(book.clone());
            Ok(())
        }
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Transport answering from canned bodies keyed by URL prefix.
    ///
    /// Routes are tried in insertion order; unrouted URLs get a 404.
    #[derive(Default)]
    pub struct MockTransport {
        routes: Vec<(String, Result<String, ProviderError>)>,
        requested: Mutex<Vec<String>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route(mut self, url_prefix: &str, body: &str) -> Self {
            self.routes.push((url_prefix.to_string(), Ok(body.to_string())));
            self
        }

        pub fn route_error(mut self, url_prefix: &str, error: ProviderError) -> Self {
            self.routes.push((url_prefix.to_string(), Err(error)));
            self
        }

        /// Every URL requested so far, in order.
        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn get_text(&self, url: &str) -> Result<String, ProviderError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.routes
                .iter()
                .find(|(prefix, _)| url.starts_with(prefix.as_str()))
                .map(|(_, response)| response.clone())
                .unwrap_or(Err(ProviderError::Http {
                    status: 404,
                    reason: "Not Found".to_string(),
                }))
        }
    }
}
