//! Adapter layer: audiobooks to candidates

use super::dto;
use crate::freetext::providers::Candidate;

pub fn to_candidates(response: dto::FeedResponse) -> Vec<Candidate> {
    response
        .books
        .into_iter()
        .map(|book| {
            let authors = book.authors.iter().map(dto::Reader::full_name).collect();
            Candidate::new(book.title, authors, book.url_librivox)
        })
        .collect()
}
