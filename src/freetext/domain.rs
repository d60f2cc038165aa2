//! Domain types shared by providers, the cache and the lookup service.
//!
//! Providers convert whatever their source returns into a [`LookupResult`];
//! the service turns a chain of those into one [`BulkLookupOutcome`] per book.

use serde::Serialize;

/// Provider name reported for results served from the curated cache.
pub const CACHE_PROVIDER_NAME: &str = "Cache";

/// Failure messages surfaced to callers.
pub mod messages {
    pub const TEMPORARY_TITLE: &str = "Temporary title - skipped";
    pub const CACHED_NOT_FOUND: &str = "Previously searched - not found (cached)";
    pub const NOT_FOUND_ANYWHERE: &str = "Not found in any provider";
    pub const CANCELLED: &str = "Lookup cancelled";
    pub const TITLE_NOT_FOUND: &str = "Title not found";
    pub const AUTHOR_NOT_FOUND: &str = "Author not found";
}

/// What we are looking for: a title and, optionally, an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub title: String,
    pub author: Option<String>,
}

impl LookupQuery {
    pub fn new(title: impl Into<String>, author: Option<&str>) -> Self {
        Self {
            title: title.into(),
            author: author.map(str::to_string),
        }
    }

    /// Query without an author.
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
        }
    }

    /// The author, if present and not blank.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.trim().is_empty())
    }
}

/// One provider's answer to a [`LookupQuery`].
///
/// `url` is set exactly when `found` is true; `error_message` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub provider_name: String,
    pub found: bool,
    pub url: Option<String>,
    pub error_message: Option<String>,
}

impl LookupResult {
    pub fn found(provider_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            found: true,
            url: Some(url.into()),
            error_message: None,
        }
    }

    pub fn not_found(provider_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            found: false,
            url: None,
            error_message: Some(message.into()),
        }
    }
}

/// Final answer for one book (or one ad-hoc query).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkLookupOutcome {
    /// Book that was searched; `None` for ad-hoc searches.
    pub book_id: Option<i64>,
    pub book_title: Option<String>,
    pub author_name: Option<String>,
    pub success: bool,
    /// Found URL, or space-joined URLs for a cache hit.
    pub free_text_url: Option<String>,
    pub provider_name: Option<String>,
    pub error_message: Option<String>,
    /// Every provider consulted, in the order they were tried.
    pub providers_searched: Vec<String>,
}

impl BulkLookupOutcome {
    /// Failure outcome for a book whose lookup errored inside a batch.
    pub fn batch_error(book_id: i64, cause: &impl std::fmt::Display) -> Self {
        Self {
            book_id: Some(book_id),
            success: false,
            error_message: Some(format!("Error: {cause}")),
            ..Default::default()
        }
    }
}

/// Static facts about a registered provider, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
    pub name: String,
    pub priority: i32,
    pub expected_domains: Vec<String>,
}

/// Why a provider could not answer. Always absorbed by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that escape a lookup. Everything provider-side is a miss instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Book not found: {0}")]
    BookNotFound(i64),

    #[error("Repository error: {0}")]
    Repository(String),
}
