//! Test utilities and fixtures for freetext-finder tests.
//!
//! Common helpers and factories to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use freetext_finder::test_utils::{temp_db, mock_book};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     let book = mock_book(1, "Kidnapped", Some("Robert Louis Stevenson"));
//!     // ... test logic
//! }
//! ```

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::model::{Author, Book};

/// Creates a temporary database for testing.
///
/// The database lives in a temporary directory that is removed when the
/// returned `TempDir` is dropped. Migrations are run automatically.
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let pool = crate::db::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// Creates an in-memory book with no URL recorded yet.
///
/// The author, when given, gets the same ID as the book.
pub fn mock_book(id: i64, title: &str, author: Option<&str>) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.map(|name| Author {
            id,
            name: name.to_string(),
        }),
        free_text_url: None,
        last_modified: Utc::now(),
    }
}

