//! Command-line interface for freetext-finder.
//!
//! This module provides CLI commands for looking up free editions of
//! catalogued books, running ad-hoc searches and inspecting the provider
//! chain and curated cache.

mod commands;

pub use commands::{Cli, Commands, run_command};
