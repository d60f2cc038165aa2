//! Internet Archive, searched through the `advancedsearch.php` JSON API.
//!
//! The Archive is mostly a lending library. Only items explicitly flagged
//! `access-restricted-item: false` can be read without borrowing, so a
//! missing flag counts as restricted and lending collections are skipped
//! outright.
//!
//! API quirks:
//! - `creator`, `collection` and even `title` may be a string or a list
//! - `access-restricted-item` arrives as a bool or as the string "true"/"false"

mod adapter;
pub mod dto;
mod provider;

pub use provider::InternetArchiveProvider;
