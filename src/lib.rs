//! Freetext Finder - finds legally free online editions of catalogued books.
//!
//! The [`freetext`] module holds the lookup engine; [`db`] and [`model`]
//! provide the SQLite catalog it reads books from and records URLs on.
//! The binary wraps both in a small CLI.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod freetext;
pub mod model;
#[cfg(test)]
pub mod test_utils;
