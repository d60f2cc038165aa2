//! LibriVox audiobook feed DTOs
//!
//! Example response:
//! ```json
//! {
//!   "books": [{
//!     "id": "47",
//!     "title": "Kidnapped",
//!     "url_librivox": "https://librivox.org/kidnapped-by-robert-louis-stevenson/",
//!     "authors": [{"id": "21", "first_name": "Robert Louis", "last_name": "Stevenson"}]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub books: Vec<Audiobook>,
    /// Set instead of `books` when nothing matched
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Audiobook {
    /// Numeric, but sent as a string
    pub id: String,
    pub title: String,
    /// Empty while a recording is still in progress
    #[serde(default)]
    pub url_librivox: String,
    #[serde(default)]
    pub authors: Vec<Reader>,
}

/// Credited author of the recorded text
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Reader {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Reader {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}
