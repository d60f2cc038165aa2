//! Project Gutenberg, searched through the Gutendex JSON API.
//!
//! Every Gutenberg ebook is public domain in the US, so any validated match
//! is freely readable.
//! API docs: https://gutendex.com/

mod adapter;
pub mod dto;
mod provider;

pub use provider::GutenbergProvider;
