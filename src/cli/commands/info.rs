//! Provider chain, cache and configuration inspection.

use std::path::Path;
use std::sync::Arc;

use crate::config::{self, Config};
use crate::freetext::ResultCache;
use crate::freetext::domain::ProviderDescriptor;
use crate::freetext::providers::build_providers;
use crate::freetext::transport::ReqwestTransport;

/// List enabled providers in search order
pub fn cmd_providers(config: &Config, json: bool) -> anyhow::Result<()> {
    let transport = ReqwestTransport::new(&config.http)?;
    let mut providers = build_providers(&config.providers, Arc::new(transport));
    providers.sort_by_key(|p| p.priority());

    let descriptors: Vec<ProviderDescriptor> = providers
        .iter()
        .map(|p| ProviderDescriptor::from(&**p))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(());
    }

    println!("{:>4}  {:<40} DOMAINS", "PRIO", "PROVIDER");
    for d in &descriptors {
        let domains = if d.expected_domains.is_empty() {
            "(any)".to_string()
        } else {
            d.expected_domains.join(", ")
        };
        println!("{:>4}  {:<40} {}", d.priority, d.name, domains);
    }
    Ok(())
}

/// Show curated cache size
pub fn cmd_cache_stats(config: &Config) -> anyhow::Result<()> {
    let cache = ResultCache::load(config.lookup.cache_file.as_deref())?;
    let source = config
        .lookup
        .cache_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "embedded".to_string());

    println!("Cache source: {}", source);
    println!("Authors:      {}", cache.author_count());
    println!("Books:        {}", cache.book_count());
    Ok(())
}

/// Write the default configuration, refusing to clobber an existing file
pub fn cmd_init_config(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => config::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
    };

    if target.exists() && !force {
        anyhow::bail!(
            "Config file {} already exists (use --force to overwrite)",
            target.display()
        );
    }

    let written = config::save(&Config::default(), Some(&target))?;
    println!("Wrote default config to {}", written.display());
    Ok(())
}
