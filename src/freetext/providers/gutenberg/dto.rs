//! Gutendex API Data Transfer Objects
//!
//! These types match what `GET /books/?search=` returns.
//! DO NOT use these types outside the gutenberg module - convert to candidates.
//!
//! Example response:
//! ```json
//! {
//!   "count": 1,
//!   "next": null,
//!   "previous": null,
//!   "results": [{
//!     "id": 1342,
//!     "title": "Pride and Prejudice",
//!     "authors": [{"name": "Austen, Jane", "birth_year": 1775, "death_year": 1817}],
//!     "languages": ["en"]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Top-level search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BooksResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<Book>,
}

/// One ebook
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Book {
    /// Gutenberg ebook number
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Person>,
}

/// An author, in "Last, First" form
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Person {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}
