//! Adapter layer: loc.gov items to candidates

use super::dto;
use crate::freetext::providers::Candidate;

pub fn to_candidates(response: dto::SearchResponse) -> Vec<Candidate> {
    response
        .results
        .into_iter()
        .filter(|item| item.access_restricted == Some(false))
        .filter_map(|item| Some(Candidate::new(item.title?, item.contributor, item.url?)))
        .collect()
}
