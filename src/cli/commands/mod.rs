//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `lookup`: catalog lookups and ad-hoc searches
//! - `catalog`: adding books to the catalog
//! - `info`: provider chain, cache statistics and config bootstrap

mod catalog;
mod info;
mod lookup;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::config::{self, Config};

pub use catalog::cmd_add_book;
pub use info::{cmd_cache_stats, cmd_init_config, cmd_providers};
pub use lookup::{cmd_lookup, cmd_search};

/// Freetext Finder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/freetext-finder/config.toml)
    #[arg(long, global = true, env = "FREETEXT_FINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog database (overrides the configured path)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Find free editions for catalogued books and record them
    Lookup {
        /// Book IDs to look up
        #[arg(required_unless_present = "all")]
        ids: Vec<i64>,
        /// Look up every book in the catalog
        #[arg(long, conflicts_with = "ids")]
        all: bool,
        /// Print outcomes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search for a title without touching the catalog
    Search {
        /// Book title
        #[arg(short, long)]
        title: String,
        /// Author name
        #[arg(short, long)]
        author: Option<String>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// List providers in the order they are searched
    Providers {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show what the curated cache contains
    CacheStats,
    /// Add a book to the catalog
    AddBook {
        /// Book title
        #[arg(short, long)]
        title: String,
        /// Author name
        #[arg(short, long)]
        author: Option<String>,
    },
    /// Write a config file with default settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    if let Commands::InitConfig { force } = &cli.command {
        return cmd_init_config(cli.config.as_deref(), *force);
    }

    let config = config::load(cli.config.as_deref());
    let db_path = catalog_path(cli, &config);
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Lookup { ids, all, json } => cmd_lookup(&rt, &config, &db_path, ids, *all, *json),
        Commands::Search {
            title,
            author,
            json,
        } => cmd_search(&rt, &config, title, author.as_deref(), *json),
        Commands::Providers { json } => cmd_providers(&config, *json),
        Commands::CacheStats => cmd_cache_stats(&config),
        Commands::AddBook { title, author } => {
            cmd_add_book(&rt, &db_path, title, author.as_deref())
        }
        Commands::InitConfig { .. } => Ok(()),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// `--db` wins over the configured catalog path.
fn catalog_path(cli: &Cli, config: &Config) -> PathBuf {
    cli.db
        .clone()
        .unwrap_or_else(|| config.database.path.clone())
}

/// Open (and migrate) the catalog database.
pub(crate) async fn open_catalog(path: &Path) -> anyhow::Result<sqlx::SqlitePool> {
    let url = crate::db::db_url(Some(path));
    crate::db::init_db(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open catalog {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookup_ids() {
        let cli = Cli::try_parse_from(["freetext-finder", "lookup", "3", "5", "--json"]).unwrap();
        match cli.command {
            Commands::Lookup { ids, all, json } => {
                assert_eq!(ids, vec![3, 5]);
                assert!(!all);
                assert!(json);
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn test_lookup_requires_ids_or_all() {
        assert!(Cli::try_parse_from(["freetext-finder", "lookup"]).is_err());
        assert!(Cli::try_parse_from(["freetext-finder", "lookup", "--all"]).is_ok());
        assert!(Cli::try_parse_from(["freetext-finder", "lookup", "1", "--all"]).is_err());
    }

    #[test]
    fn test_db_flag_overrides_config() {
        let cli = Cli::try_parse_from([
            "freetext-finder",
            "search",
            "--title",
            "Orthodoxy",
            "--db",
            "/tmp/other.db",
        ])
        .unwrap();

        let path = catalog_path(&cli, &Config::default());
        assert_eq!(path, PathBuf::from("/tmp/other.db"));

        let cli = Cli::try_parse_from(["freetext-finder", "cache-stats"]).unwrap();
        assert_eq!(
            catalog_path(&cli, &Config::default()),
            PathBuf::from("library.db")
        );
    }
}
