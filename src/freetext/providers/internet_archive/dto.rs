//! Internet Archive advanced-search DTOs
//!
//! Example response (trimmed):
//! ```json
//! {
//!   "responseHeader": {"status": 0},
//!   "response": {
//!     "numFound": 1,
//!     "start": 0,
//!     "docs": [{
//!       "identifier": "confessionsofsai00augu",
//!       "title": "The Confessions of Saint Augustine",
//!       "creator": ["Augustine, Saint, Bishop of Hippo"],
//!       "collection": ["americana"],
//!       "access-restricted-item": "false"
//!     }]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Top-level response wrapper
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub response: Option<ResultPage>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResultPage {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<Doc>,
}

/// One archive item
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Doc {
    pub identifier: String,
    #[serde(default)]
    pub title: OneOrMany,
    #[serde(default)]
    pub creator: OneOrMany,
    #[serde(default)]
    pub collection: OneOrMany,
    #[serde(rename = "access-restricted-item", default)]
    pub access_restricted_item: Option<Flag>,
}

/// A metadata field the Archive emits as either a scalar or a list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl OneOrMany {
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.first().map(String::as_str),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        match self {
            Self::One(value) => value.eq_ignore_ascii_case(needle),
            Self::Many(values) => values.iter().any(|v| v.eq_ignore_ascii_case(needle)),
        }
    }
}

/// Boolean flag sent as a JSON bool or a string.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    /// True only for an explicit false.
    pub fn is_false(&self) -> bool {
        match self {
            Self::Bool(value) => !value,
            Self::Text(text) => text.trim().eq_ignore_ascii_case("false"),
        }
    }
}
