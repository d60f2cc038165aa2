//! Library of Congress digitized books, searched through the loc.gov JSON API.
//!
//! Results are filtered server-side to the "online text" format, but that
//! facet still includes items viewable only on site, so each result must
//! carry an explicit `access_restricted: false`.
//! API docs: https://www.loc.gov/apis/json-and-yaml/

mod adapter;
pub mod dto;
mod provider;

pub use provider::LocOpenAccessProvider;
