//! loc.gov search DTOs
//!
//! Example response (trimmed):
//! ```json
//! {
//!   "results": [{
//!     "id": "http://www.loc.gov/item/01012345/",
//!     "title": "Kidnapped; being memoirs of the adventures of David Balfour",
//!     "url": "https://www.loc.gov/item/01012345/",
//!     "contributor": ["stevenson, robert louis"],
//!     "online_format": ["online text", "pdf"],
//!     "access_restricted": false
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Item>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Item {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub contributor: Vec<String>,
    #[serde(default)]
    pub online_format: Vec<String>,
    pub access_restricted: Option<bool>,
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_results() {
        let json = r#"{
            "pagination": {"current": 1, "total": 1},
            "results": [{
                "id": "http://www.loc.gov/item/01012345/",
                "title": "Kidnapped",
                "url": "https://www.loc.gov/item/01012345/",
                "contributor": ["stevenson, robert louis"],
                "online_format": ["online text"],
                "access_restricted": false,
                "date": "1886"
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).expect("Should parse");
        let item = &response.results[0];

        assert_eq!(item.access_restricted, Some(false));
        assert_eq!(item.contributor, vec!["stevenson, robert louis"]);
    }

    #[test]
    fn test_parse_sparse_item() {
        let json = r#"{"results": [{"id": "x"}]}"#;
        let response: SearchResponse = serde_json::from_str(json).expect("Should parse");
        assert!(response.results[0].title.is_none());
        assert!(response.results[0].access_restricted.is_none());
    }
}
