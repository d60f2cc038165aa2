//! Adapter layer: Gutendex DTOs to candidates

use super::dto;
use crate::freetext::providers::Candidate;

const EBOOK_URL_BASE: &str = "https://www.gutenberg.org/ebooks/";

pub fn to_candidates(response: dto::BooksResponse) -> Vec<Candidate> {
    response
        .results
        .into_iter()
        .map(|book| {
            Candidate::new(
                book.title,
                book.authors.into_iter().map(|a| a.name).collect(),
                format!("{EBOOK_URL_BASE}{}", book.id),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ebook_url_from_id() {
        let response: dto::BooksResponse = serde_json::from_str(
            r#"{"results": [{"id": 421, "title": "Kidnapped", "authors": [{"name": "Stevenson, Robert Louis"}]}]}"#,
        )
        .unwrap();

        let candidates = to_candidates(response);
        assert_eq!(candidates[0].url, "https://www.gutenberg.org/ebooks/421");
        assert_eq!(candidates[0].authors, vec!["Stevenson, Robert Louis"]);
    }
}
