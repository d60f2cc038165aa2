//! Core data models for the book catalog.
//!
//! Defines [`Book`] and [`Author`], the only catalog entities the lookup
//! engine touches.
//!
//! # Database Schema
//!
//! - `authors` - Author records with unique names
//! - `books` - Books with optional author reference and the discovered
//!   free-text URL

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// An author in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Author {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Author name (unique)
    pub name: String,
}

/// A catalogued book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Database ID (auto-generated)
    pub id: i64,
    pub title: String,
    pub author: Option<Author>,
    /// Free online edition(s); several URLs are space-separated
    pub free_text_url: Option<String>,
    /// Updated on every successful write
    pub last_modified: DateTime<Utc>,
}

impl Book {
    /// Name of the author, if the book has one.
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.name.as_str())
    }

    /// Record a discovered URL and bump the modification time.
    pub fn set_free_text_url(&mut self, url: impl Into<String>) {
        self.free_text_url = Some(url.into());
        self.last_modified = Utc::now();
    }
}

/// Flat row of `books LEFT JOIN authors`.
#[derive(Debug, FromRow)]
pub(crate) struct BookRow {
    pub id: i64,
    pub title: String,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    pub free_text_url: Option<String>,
    pub last_modified: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        let author = match (row.author_id, row.author_name) {
            (Some(id), Some(name)) => Some(Author { id, name }),
            _ => None,
        };
        Self {
            id: row.id,
            title: row.title,
            author,
            free_text_url: row.free_text_url,
            last_modified: row.last_modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_url_bumps_last_modified() {
        let before = Utc::now() - chrono::Duration::days(1);
        let mut book = Book {
            id: 1,
            title: "Kidnapped".into(),
            author: None,
            free_text_url: None,
            last_modified: before,
        };
        book.set_free_text_url("https://www.gutenberg.org/ebooks/421");
        assert_eq!(book.free_text_url.as_deref(), Some("https://www.gutenberg.org/ebooks/421"));
        assert!(book.last_modified > before);
    }

    #[test]
    fn test_row_without_author() {
        let book: Book = BookRow {
            id: 2,
            title: "Anonymous Work".into(),
            author_id: None,
            author_name: None,
            free_text_url: None,
            last_modified: Utc::now(),
        }
        .into();
        assert_eq!(book.author_name(), None);
    }
}
