//! Christian Classics Ethereal Library site search.
//!
//! Search results are Bootstrap cards: the work title sits in
//! `h5.card-title > span` and the work itself is linked as
//! `https://ccel.org/ccel/{author}/{work}/...`.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};

use super::{Candidate, resolve, search_terms, url_with_params};
use crate::freetext::domain::{LookupQuery, LookupResult, ProviderError};
use crate::freetext::traits::{FreeTextProvider, HttpTransport};

const PROVIDER_NAME: &str = "Christian Classics Ethereal Library";
const PRIORITY: i32 = 35;
const EXPECTED_DOMAINS: &[&str] = &["ccel.org"];
const SEARCH_URL: &str = "https://www.ccel.org/search";

static CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.card.mx-auto").expect("valid selector"));
static CARD_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h5.card-title > span").expect("valid selector"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

static WORK_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(?:www\.)?ccel\.org/ccel/[^/]+/[^/]+/\S+").expect("valid regex")
});

pub struct CcelProvider {
    transport: Arc<dyn HttpTransport>,
}

impl CcelProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

/// One candidate per result card that has both a title and a work link.
fn parse_cards(html: &str) -> Vec<Candidate> {
    let document = Html::parse_document(html);

    document
        .select(&CARD)
        .filter_map(|card| {
            let title = card
                .select(&CARD_TITLE)
                .next()?
                .text()
                .collect::<String>()
                .trim()
                .to_string();
            if title.is_empty() {
                return None;
            }

            let url = card
                .select(&LINK)
                .filter_map(|a| a.value().attr("href"))
                .find(|href| WORK_URL_RE.is_match(href))?;

            Some(Candidate::new(title, Vec::new(), url))
        })
        .collect()
}

#[async_trait]
impl FreeTextProvider for CcelProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn priority(&self) -> i32 {
        PRIORITY
    }

    fn expected_domains(&self) -> &[&str] {
        EXPECTED_DOMAINS
    }

    async fn search(&self, query: &LookupQuery) -> Result<LookupResult, ProviderError> {
        let terms = search_terms(query);
        let url = url_with_params(SEARCH_URL, &[("qu", terms.as_str())])?;
        tracing::debug!("{}: GET {}", PROVIDER_NAME, url);

        let html = self.transport.get_text(&url).await?;
        Ok(resolve(PROVIDER_NAME, parse_cards(&html), query))
    }
}
