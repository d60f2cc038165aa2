//! Catalog maintenance.

use std::path::Path;

use tokio::runtime::Runtime;

use super::open_catalog;
use crate::db;

/// Add a book, creating its author on first use
pub fn cmd_add_book(
    rt: &Runtime,
    db_path: &Path,
    title: &str,
    author: Option<&str>,
) -> anyhow::Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("Title must not be empty");
    }

    rt.block_on(async {
        let pool = open_catalog(db_path).await?;
        let id = db::insert_book(&pool, title.trim(), author).await?;
        println!("Added book {}: {}", id, title.trim());
        Ok(())
    })
}
