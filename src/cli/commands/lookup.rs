//! Catalog lookups and ad-hoc searches.

use std::path::Path;

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::open_catalog;
use crate::config::Config;
use crate::db::{self, SqliteBookRepository};
use crate::freetext::{self, BulkLookupOutcome, LookupQuery, NoCatalog};

/// Look up books by ID (or the whole catalog) and record what is found
pub fn cmd_lookup(
    rt: &Runtime,
    config: &Config,
    db_path: &Path,
    ids: &[i64],
    all: bool,
    json: bool,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let pool = open_catalog(db_path).await?;
        let ids = if all {
            db::get_all_book_ids(&pool).await?
        } else {
            ids.to_vec()
        };

        if ids.is_empty() {
            println!("No books to look up.");
            return Ok(());
        }

        let service =
            freetext::build_lookup_service(config, Box::new(SqliteBookRepository::new(pool)))?;
        info!("Looking up {} books", ids.len());

        let cancel = cancel_on_ctrl_c();
        let outcomes = service.lookup_books_with_cancel(&ids, &cancel).await;

        if json {
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        } else {
            for outcome in &outcomes {
                print_outcome(outcome);
            }
            let found = outcomes.iter().filter(|o| o.success).count();
            println!("\n{} of {} books have a free edition.", found, outcomes.len());
        }
        Ok(())
    })
}

/// Run the provider chain for a title without touching the catalog
pub fn cmd_search(
    rt: &Runtime,
    config: &Config,
    title: &str,
    author: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let service = freetext::build_lookup_service(config, Box::new(NoCatalog))?;

        let cancel = cancel_on_ctrl_c();
        let outcome = service
            .search(&LookupQuery::new(title, author), &cancel)
            .await;

        if json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            print_outcome(&outcome);
            if !outcome.providers_searched.is_empty() {
                println!("  searched: {}", outcome.providers_searched.join(", "));
            }
        }
        Ok(())
    })
}

/// Token that fires on Ctrl-C. Must be called inside the runtime.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let on_signal = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling remaining lookups");
            on_signal.cancel();
        }
    });
    token
}

fn print_outcome(outcome: &BulkLookupOutcome) {
    let id = outcome
        .book_id
        .map(|id| format!("[{id}] "))
        .unwrap_or_default();
    let title = outcome.book_title.as_deref().unwrap_or("?");
    let author = outcome
        .author_name
        .as_deref()
        .map(|a| format!(" by {a}"))
        .unwrap_or_default();

    if outcome.success {
        println!(
            "{}{}{}: {} ({})",
            id,
            title,
            author,
            outcome.free_text_url.as_deref().unwrap_or(""),
            outcome.provider_name.as_deref().unwrap_or("")
        );
    } else {
        println!(
            "{}{}{}: {}",
            id,
            title,
            author,
            outcome.error_message.as_deref().unwrap_or("not found")
        );
    }
}
