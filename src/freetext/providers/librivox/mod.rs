//! LibriVox public-domain audiobooks.
//!
//! The feed API answers 500 when title and author filters are combined, so
//! only the title is sent (as a `^` prefix filter) and authors are checked
//! locally. "Nothing found" comes back as a 404 with an `error` body.
//! API docs: https://librivox.org/api/info

mod adapter;
pub mod dto;
mod provider;

pub use provider::LibriVoxProvider;
