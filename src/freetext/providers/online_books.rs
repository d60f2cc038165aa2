//! The Online Books Page (University of Pennsylvania), browsed by author.
//!
//! OBP indexes free online editions under Library of Congress author
//! headings. A `lookupname` request either lands on the author's book list
//! or on a list of similar headings; in the latter case matching headings
//! are followed. Book entries are `<cite>Title</cite>` followed by a link to
//! the hosting site.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use super::{Candidate, pick_validated, url_with_params};
use crate::freetext::domain::{LookupQuery, LookupResult, ProviderError, messages};
use crate::freetext::matcher::author_matches;
use crate::freetext::traits::{FreeTextProvider, HttpTransport};

const PROVIDER_NAME: &str = "Online Books Page (LOC Index)";
const PRIORITY: i32 = 12;
const LOOKUP_URL: &str = "https://onlinebooks.library.upenn.edu/webbin/book/lookupname";
const OBP_HOST: &str = "onlinebooks.library.upenn.edu";
const UNKNOWN_AUTHOR_MARKER: &str = "did not match any author in our database";

static CITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<cite>([^<]+)</cite>").expect("valid regex"));

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a[^>]+href="(https?://[^"]+)"[^>]*>"#).expect("valid regex")
});

static ENTRY_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</li>").expect("valid regex"));

static AUTHOR_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<a[^>]+href="(https://onlinebooks\.library\.upenn\.edu/webbin/book/lookupname\?key=[^"]+)"[^>]*>([^<]+)</a>\s*\("#,
    )
    .expect("valid regex")
});

pub struct OnlineBooksProvider {
    transport: Arc<dyn HttpTransport>,
}

impl OnlineBooksProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Follow matching author headings until one lists the title.
    async fn search_author_pages(
        &self,
        html: &str,
        query: &LookupQuery,
        author: &str,
    ) -> Option<Candidate> {
        let mut followed: Vec<String> = Vec::new();

        for (href, heading) in author_links(html) {
            if followed.contains(&href) || !author_matches(&heading, author) {
                continue;
            }
            tracing::debug!("{}: following author heading '{}'", PROVIDER_NAME, heading);

            let page = match self.transport.get_text(&href).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("{}: author page {} failed: {}", PROVIDER_NAME, href, e);
                    followed.push(href);
                    continue;
                }
            };
            followed.push(href);

            if let Some(hit) = pick_validated(cited_books(&page, &heading), query) {
                return Some(hit);
            }
        }
        None
    }
}

/// OBP lookup key: kept as-is when already "Last, First", otherwise the
/// first word becomes the heading ("Ignatius of Loyola" -> "Ignatius, of Loyola").
fn author_key(author: &str) -> String {
    let author = author.trim();
    if author.contains(',') {
        return author.to_string();
    }
    match author.split_once(char::is_whitespace) {
        Some((first, rest)) => {
            let rest = rest.split_whitespace().collect::<Vec<_>>().join(" ");
            format!("{first}, {rest}")
        }
        None => author.to_string(),
    }
}

/// Books cited on a page, each linked to an external host.
///
/// A link belongs to a citation only if it appears before the next
/// `<cite>` and before the end of the list item.
fn cited_books(html: &str, author: &str) -> Vec<Candidate> {
    let cites: Vec<_> = CITE_RE.captures_iter(html).collect();
    let mut books = Vec::new();

    for (i, caps) in cites.iter().enumerate() {
        let (Some(whole), Some(title)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let next_cite = cites
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(html.len(), |next| next.start());
        let mut entry = &html[whole.end()..next_cite];
        if let Some(end) = ENTRY_END_RE.find(entry) {
            entry = &entry[..end.start()];
        }

        let href = LINK_RE
            .captures_iter(entry)
            .map(|link| decode_href(&link[1]))
            .find(|href| !href.contains(OBP_HOST));
        if let Some(href) = href {
            books.push(Candidate::new(title.as_str().trim(), vec![author.to_string()], href));
        }
    }
    books
}

/// `(href, heading)` for every author heading linked on a page.
fn author_links(html: &str) -> Vec<(String, String)> {
    AUTHOR_LINK_RE
        .captures_iter(html)
        .map(|caps| (decode_href(&caps[1]), caps[2].trim().to_string()))
        .collect()
}

fn decode_href(href: &str) -> String {
    href.replace("&amp;", "&")
}

#[async_trait]
impl FreeTextProvider for OnlineBooksProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn priority(&self) -> i32 {
        PRIORITY
    }

    async fn search(&self, query: &LookupQuery) -> Result<LookupResult, ProviderError> {
        let Some(author) = query.author() else {
            return Ok(LookupResult::not_found(
                PROVIDER_NAME,
                "Author name required for search",
            ));
        };

        let key = author_key(author);
        let url = url_with_params(LOOKUP_URL, &[("key", key.as_str())])?;
        tracing::debug!("{}: GET {}", PROVIDER_NAME, url);
        let html = self.transport.get_text(&url).await?;

        if let Some(hit) = pick_validated(cited_books(&html, author), query) {
            return Ok(LookupResult::found(PROVIDER_NAME, hit.url));
        }

        if let Some(hit) = self.search_author_pages(&html, query, author).await {
            return Ok(LookupResult::found(PROVIDER_NAME, hit.url));
        }

        if html.contains(UNKNOWN_AUTHOR_MARKER) {
            return Ok(LookupResult::not_found(PROVIDER_NAME, messages::AUTHOR_NOT_FOUND));
        }
        Ok(LookupResult::not_found(PROVIDER_NAME, messages::TITLE_NOT_FOUND))
    }
}
