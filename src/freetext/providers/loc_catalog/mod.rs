//! Library of Congress online catalog, queried over SRU for MARCXML.
//!
//! Catalog records point at digitized copies through MARC field 856. Many
//! 856 links are catalog extras (author bios, tables of contents, cover
//! scans) rather than the book, and [`marc`] filters those out.

pub mod marc;

use std::sync::Arc;

use async_trait::async_trait;

use super::{Candidate, resolve, url_with_params};
use crate::freetext::domain::{LookupQuery, LookupResult, ProviderError};
use crate::freetext::traits::{FreeTextProvider, HttpTransport};

const PROVIDER_NAME: &str = "LOC Online Catalog";
const PRIORITY: i32 = 20;
const SRU_URL: &str = "http://lx2.loc.gov:210/LCDB";
const MAX_RECORDS: &str = "5";

pub struct LocCatalogProvider {
    transport: Arc<dyn HttpTransport>,
}

impl LocCatalogProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

/// CQL query on `dc.title`, plus `dc.creator` when an author is known.
fn build_cql(query: &LookupQuery) -> String {
    let mut cql = format!("dc.title=\"{}\"", escape_cql(&query.title));
    if let Some(author) = query.author() {
        cql.push_str(&format!(" AND dc.creator=\"{}\"", escape_cql(author)));
    }
    cql
}

fn escape_cql(input: &str) -> String {
    input.replace('"', "\\\"")
}

fn to_candidates(records: Vec<marc::MarcRecord>) -> Vec<Candidate> {
    records
        .into_iter()
        .filter_map(|record| {
            let title = record.title()?;
            let url = record.online_text_url()?;
            let authors = record.author().into_iter().collect();
            Some(Candidate::new(title, authors, url))
        })
        .collect()
}

#[async_trait]
impl FreeTextProvider for LocCatalogProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn priority(&self) -> i32 {
        PRIORITY
    }

    async fn search(&self, query: &LookupQuery) -> Result<LookupResult, ProviderError> {
        let cql = build_cql(query);
        let url = url_with_params(
            SRU_URL,
            &[
                ("operation", "searchRetrieve"),
                ("version", "1.1"),
                ("recordSchema", "marcxml"),
                ("maximumRecords", MAX_RECORDS),
                ("query", cql.as_str()),
            ],
        )?;
        tracing::debug!("{}: GET {}", PROVIDER_NAME, url);

        let xml = self.transport.get_text(&url).await?;
        let records = marc::parse_records(&xml);
        tracing::debug!("{}: {} records", PROVIDER_NAME, records.len());

        Ok(resolve(PROVIDER_NAME, to_candidates(records), query))
    }
}
