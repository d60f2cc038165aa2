//! Database module for the book catalog.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! Provides async operations for:
//! - Author and book creation
//! - Book retrieval with the author joined in
//! - Recording discovered free-text URLs
//!
//! [`SqliteBookRepository`] adapts these to the lookup service's
//! [`BookRepository`] trait.
//!
//! # Example
//!
//! ```ignore
//! use freetext_finder::db::{init_db, SqliteBookRepository};
//!
//! let pool = init_db("sqlite:library.db").await?;
//! let repository = SqliteBookRepository::new(pool);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::freetext::domain::LookupError;
use crate::freetext::traits::BookRepository;
use crate::model::{Book, BookRow};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "library.db";

const SELECT_BOOK: &str = r#"
    SELECT
        b.id, b.title, b.author_id, a.name AS author_name,
        b.free_text_url, b.last_modified
    FROM books b
    LEFT JOIN authors a ON b.author_id = a.id
"#;

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool with up to 5 connections, and runs all pending migrations.
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Get or create an author by name.
///
/// Idempotent - calling with the same name always returns the same ID.
pub async fn get_or_create_author(pool: &SqlitePool, name: &str) -> sqlx::Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM authors WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    if let Some((id,)) = row {
        Ok(id)
    } else {
        let result = sqlx::query("INSERT INTO authors (name) VALUES (?)")
            .bind(name)
            .execute(pool)
            .await?;
        Ok(result.last_insert_rowid())
    }
}

/// Insert a book, creating its author if needed.
///
/// Returns the new book's ID.
pub async fn insert_book(pool: &SqlitePool, title: &str, author: Option<&str>) -> sqlx::Result<i64> {
    let author_id = match author.map(str::trim).filter(|a| !a.is_empty()) {
        Some(name) => Some(get_or_create_author(pool, name).await?),
        None => None,
    };

    let result =
        sqlx::query("INSERT INTO books (title, author_id, last_modified) VALUES (?, ?, ?)")
            .bind(title)
            .bind(author_id)
            .bind(Utc::now())
            .execute(pool)
            .await?;

    Ok(result.last_insert_rowid())
}

/// Get a book by its database ID, with its author.
pub async fn get_book_by_id(pool: &SqlitePool, book_id: i64) -> sqlx::Result<Option<Book>> {
    let row = sqlx::query_as::<_, BookRow>(&format!("{SELECT_BOOK} WHERE b.id = ?"))
        .bind(book_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Book::from))
}

/// IDs of every book, ascending.
pub async fn get_all_book_ids(pool: &SqlitePool) -> sqlx::Result<Vec<i64>> {
    let rows: Vec<(i64,)> = sqlx::query_as("SELECT id FROM books ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Write a book's mutable fields back.
pub async fn update_book(pool: &SqlitePool, book: &Book) -> sqlx::Result<()> {
    sqlx::query("UPDATE books SET title = ?, free_text_url = ?, last_modified = ? WHERE id = ?")
        .bind(&book.title)
        .bind(&book.free_text_url)
        .bind(book.last_modified)
        .bind(book.id)
        .execute(pool)
        .await?;
    Ok(())
}

// ============================================================================
// Repository
// ============================================================================

/// SQLite-backed catalog for the lookup service.
#[derive(Debug, Clone)]
pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn find_book_by_id(&self, id: i64) -> Result<Option<Book>, LookupError> {
        get_book_by_id(&self.pool, id)
            .await
            .map_err(|e| LookupError::Repository(e.to_string()))
    }

    async fn save_book(&self, book: &Book) -> Result<(), LookupError> {
        update_book(&self.pool, book)
            .await
            .map_err(|e| LookupError::Repository(e.to_string()))
    }
}
