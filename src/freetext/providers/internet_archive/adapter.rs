//! Adapter layer: archive items to candidates

use super::dto;
use crate::freetext::providers::Candidate;

const DETAILS_URL_BASE: &str = "https://archive.org/details/";

/// Collections whose items are borrow-only.
const LENDING_COLLECTIONS: &[&str] = &["inlibrary", "printdisabled", "lendinglibrary"];

/// Whether an item can be read without borrowing it.
pub fn is_freely_readable(doc: &dto::Doc) -> bool {
    let unrestricted = doc
        .access_restricted_item
        .as_ref()
        .is_some_and(dto::Flag::is_false);
    unrestricted && !LENDING_COLLECTIONS.iter().any(|c| doc.collection.contains(c))
}

pub fn to_candidates(response: dto::SearchResponse) -> Vec<Candidate> {
    let docs = response.response.map(|page| page.docs).unwrap_or_default();
    let total = docs.len();

    let candidates: Vec<Candidate> = docs
        .into_iter()
        .filter(is_freely_readable)
        .filter_map(|doc| {
            let title = doc.title.first()?.to_string();
            let url = format!("{DETAILS_URL_BASE}{}", doc.identifier);
            Some(Candidate::new(title, doc.creator.into_vec(), url))
        })
        .collect();

    if candidates.len() < total {
        tracing::debug!(
            "Internet Archive: {} of {} items skipped as lending-only",
            total - candidates.len(),
            total
        );
    }
    candidates
}
