//! Curated table of known free-text results.
//!
//! Consulted before any provider is queried. The table is loaded once from a
//! TOML data asset (embedded in the binary, or a file named in the config)
//! and never written afterwards, so it can be shared across concurrent
//! lookups behind an `Arc` without locking.
//!
//! An entry with an empty URL list is a negative result: the work was
//! searched before and has no known free edition.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::matcher::{canonical_author, last_name};
use super::normalize::normalize_title;

/// Data asset compiled into the binary.
const EMBEDDED_CACHE: &str = include_str!("../../data/free_text_cache.toml");

/// Failure to load a cache data asset.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to read cache file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid cache data: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Data asset format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CacheFile {
    #[serde(default, rename = "entry")]
    entries: Vec<CacheFileEntry>,
}

#[derive(Debug, Deserialize)]
struct CacheFileEntry {
    author: String,
    title: String,
    #[serde(default)]
    urls: Vec<String>,
}

// ============================================================================
// ResultCache
// ============================================================================

/// All titles cached under one normalized author.
#[derive(Debug)]
struct AuthorEntries {
    author: String,
    last_name: String,
    titles: HashMap<String, Vec<String>>,
}

/// Read-only `(author, title) -> URLs` table keyed by normalized strings.
///
/// Authors are kept in registration order so scans are deterministic and the
/// first-registered entry wins when two authors share a title.
#[derive(Debug, Default)]
pub struct ResultCache {
    authors: Vec<AuthorEntries>,
    by_author: HashMap<String, usize>,
}

impl ResultCache {
    /// A cache with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the dataset compiled into the binary.
    pub fn embedded() -> Result<Self, CacheError> {
        Self::from_toml_str(EMBEDDED_CACHE)
    }

    /// Load a dataset from a TOML file on disk.
    pub fn from_file(path: &Path) -> Result<Self, CacheError> {
        let content = std::fs::read_to_string(path).map_err(|source| CacheError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from an override file when given, the embedded dataset otherwise.
    pub fn load(override_path: Option<&Path>) -> Result<Self, CacheError> {
        match override_path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    /// Parse a dataset in the `[[entry]]` format.
    pub fn from_toml_str(content: &str) -> Result<Self, CacheError> {
        let file: CacheFile = toml::from_str(content)?;
        Ok(Self::from_entries(
            file.entries
                .into_iter()
                .map(|entry| (entry.author, entry.title, entry.urls)),
        ))
    }

    /// Build a cache from `(author, title, urls)` triples.
    ///
    /// Entries whose title normalizes to nothing are dropped. A repeated
    /// `(author, title)` pair keeps its first URL list.
    pub fn from_entries<I, A, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, T, Vec<String>)>,
        A: AsRef<str>,
        T: AsRef<str>,
    {
        let mut cache = Self::default();
        for (author, title, urls) in entries {
            cache.insert(author.as_ref(), title.as_ref(), urls);
        }
        cache
    }

    fn insert(&mut self, author: &str, title: &str, urls: Vec<String>) {
        let title = normalize_title(title);
        if title.is_empty() {
            return;
        }
        let author = canonical_author(author);

        let index = match self.by_author.get(&author) {
            Some(&index) => index,
            None => {
                self.authors.push(AuthorEntries {
                    last_name: last_name(&author).to_string(),
                    author: author.clone(),
                    titles: HashMap::new(),
                });
                self.by_author.insert(author, self.authors.len() - 1);
                self.authors.len() - 1
            }
        };

        self.authors[index].titles.entry(title).or_insert(urls);
    }

    /// Look up the cached URL list for a book.
    ///
    /// Tries the exact author, then any author with the same last name, then
    /// the title alone across all authors. `Some(&[])` is a negative entry;
    /// `None` means the cache knows nothing about the book.
    pub fn lookup(&self, author: Option<&str>, title: &str) -> Option<&[String]> {
        let title = normalize_title(title);
        if title.is_empty() {
            return None;
        }

        let author = author.map(canonical_author).filter(|a| !a.is_empty());

        if let Some(author) = author {
            if let Some(urls) = self
                .by_author
                .get(&author)
                .and_then(|&index| self.authors[index].titles.get(&title))
            {
                tracing::debug!(author = %author, title = %title, "Cache hit (exact author)");
                return Some(urls);
            }

            let wanted = last_name(&author);
            if let Some(urls) = self
                .authors
                .iter()
                .filter(|entries| entries.last_name == wanted)
                .find_map(|entries| entries.titles.get(&title))
            {
                tracing::debug!(author = %author, title = %title, "Cache hit (last name)");
                return Some(urls);
            }
        }

        let urls = self
            .authors
            .iter()
            .find_map(|entries| entries.titles.get(&title))?;
        tracing::debug!(title = %title, "Cache hit (title only)");
        Some(urls)
    }

    /// First URL of a cached entry. `None` on a miss or a negative entry.
    pub fn lookup_first_url(&self, author: Option<&str>, title: &str) -> Option<&str> {
        self.lookup(author, title)
            .and_then(|urls| urls.first())
            .map(String::as_str)
    }

    /// Number of distinct normalized authors.
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    /// Number of cached `(author, title)` pairs, negative entries included.
    pub fn book_count(&self) -> usize {
        self.authors.iter().map(|entries| entries.titles.len()).sum()
    }

    /// Normalized author names in registration order.
    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.authors.iter().map(|entries| entries.author.as_str())
    }
}
