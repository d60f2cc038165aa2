//! Catholic and devotional libraries that publish plain HTML links.
//!
//! None of these sites have an API. Some expose a search page whose results
//! link to the works; others keep one index page listing every book. Both
//! shapes reduce to "fetch a page, collect `<a>` links whose text is a
//! title", so each site is a [`LinkSite`] row and one provider type serves
//! them all.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use super::{Candidate, resolve, search_terms};
use crate::freetext::domain::{LookupQuery, LookupResult, ProviderError};
use crate::freetext::traits::{FreeTextProvider, HttpTransport};

static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Where a site's links come from.
#[derive(Debug, Clone, Copy)]
pub enum LinkSource {
    /// Site search, queried as `{url}?q={terms}`
    Search(&'static str),
    /// One page listing the whole collection
    Index(&'static str),
}

/// Which hrefs on the page count as works.
#[derive(Debug, Clone, Copy)]
pub enum LinkFilter {
    /// Absolute hrefs matching this pattern
    Pattern(&'static str),
    /// Hrefs on the site itself, relative or absolute. Absolute hrefs must
    /// end in one of `extensions` when any are given.
    SameSite { extensions: &'static [&'static str] },
}

/// Static description of one link-listing site.
#[derive(Debug)]
pub struct LinkSite {
    pub name: &'static str,
    pub priority: i32,
    /// Registrable domain; also the only host hits may point at
    pub domains: &'static [&'static str],
    pub source: LinkSource,
    pub filter: LinkFilter,
}

pub static SITES: &[LinkSite] = &[
    LinkSite {
        name: "EWTN Catholic Library",
        priority: 40,
        domains: &["ewtn.com"],
        source: LinkSource::Search("https://www.ewtn.com/search"),
        filter: LinkFilter::Pattern(r"(?i)^https?://www\.ewtn\.com/catholicism/(?:library|teachings)/"),
    },
    LinkSite {
        name: "Vatican.va",
        priority: 50,
        domains: &["vatican.va"],
        source: LinkSource::Search("https://www.vatican.va/content/vatican/en/search.html"),
        filter: LinkFilter::Pattern(r"(?i)^https?://www\.vatican\.va/(?:content|archive)/"),
    },
    LinkSite {
        name: "Catholic Planet eLibrary",
        priority: 60,
        domains: &["catholicplanet.com"],
        source: LinkSource::Index("https://www.catholicplanet.com/ebooks/"),
        filter: LinkFilter::SameSite {
            extensions: &[".pdf", ".htm", ".html"],
        },
    },
    LinkSite {
        name: "Good Catholic Books",
        priority: 65,
        domains: &["goodcatholicbooks.org"],
        source: LinkSource::Search("https://www.goodcatholicbooks.org/search"),
        filter: LinkFilter::Pattern(r"^https://www\.goodcatholicbooks\.org/"),
    },
    LinkSite {
        name: "My Catholic Life! Books",
        priority: 70,
        domains: &["mycatholic.life"],
        source: LinkSource::Index("https://mycatholic.life/books/"),
        filter: LinkFilter::SameSite { extensions: &[] },
    },
    LinkSite {
        name: "TraditionalCatholic.co",
        priority: 75,
        domains: &["traditionalcatholic.co"],
        source: LinkSource::Index("https://www.traditionalcatholic.co/free-catholic-books/"),
        filter: LinkFilter::SameSite { extensions: &[] },
    },
    LinkSite {
        name: "CatholicSat.com E-books",
        priority: 80,
        domains: &["catholicsat.com"],
        source: LinkSource::Index("https://www.catholicsat.com/e-books-list"),
        filter: LinkFilter::SameSite { extensions: &[] },
    },
];

/// Provider for one [`LinkSite`].
pub struct LinkSiteProvider {
    site: &'static LinkSite,
    pattern: Option<Regex>,
    transport: Arc<dyn HttpTransport>,
}

impl LinkSiteProvider {
    pub fn new(site: &'static LinkSite, transport: Arc<dyn HttpTransport>) -> Self {
        let pattern = match site.filter {
            LinkFilter::Pattern(pattern) => {
                Some(Regex::new(pattern).expect("link site patterns are valid"))
            }
            LinkFilter::SameSite { .. } => None,
        };
        Self {
            site,
            pattern,
            transport,
        }
    }

    fn page_url(&self, query: &LookupQuery) -> String {
        match self.site.source {
            LinkSource::Search(url) => {
                format!("{}?q={}", url, urlencoding::encode(&search_terms(query)))
            }
            LinkSource::Index(url) => url.to_string(),
        }
    }

    /// Absolute URL of a work link, or `None` when the href is not a work.
    fn work_url(&self, page_url: &str, href: &str) -> Option<String> {
        let href = href.trim();
        let is_absolute = href.starts_with("http://") || href.starts_with("https://");

        match (&self.pattern, self.site.filter) {
            (Some(pattern), _) => (is_absolute && pattern.is_match(href)).then(|| href.to_string()),
            (None, LinkFilter::SameSite { extensions }) if is_absolute => {
                let on_site = Url::parse(href)
                    .ok()
                    .and_then(|url| url.host_str().map(|h| self.is_own_host(h)))
                    .unwrap_or(false);
                let lower = href.to_lowercase();
                let allowed_type =
                    extensions.is_empty() || extensions.iter().any(|ext| lower.ends_with(ext));
                (on_site && allowed_type).then(|| href.to_string())
            }
            (None, _) => {
                if href.is_empty() || href.starts_with('#') || href.contains(':') {
                    return None;
                }
                join_relative(page_url, href)
            }
        }
    }

    fn is_own_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.site
            .domains
            .iter()
            .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
    }

    fn candidates(&self, page_url: &str, html: &str) -> Vec<Candidate> {
        let document = Html::parse_document(html);
        document
            .select(&LINK)
            .filter_map(|a| {
                let href = a.value().attr("href")?;
                let text = a.text().collect::<Vec<_>>().join(" ");
                let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                if text.is_empty() {
                    return None;
                }
                let url = self.work_url(page_url, href)?;
                Some(Candidate::new(text, Vec::new(), url))
            })
            .collect()
    }
}

/// Resolve a relative href. Root-relative paths join the site root; other
/// paths are taken as entries under the page, even without a trailing slash.
fn join_relative(page_url: &str, href: &str) -> Option<String> {
    let page = Url::parse(page_url).ok()?;
    let base = if href.starts_with('/') || page.path().ends_with('/') {
        page
    } else {
        Url::parse(&format!("{}/", page_url.trim_end_matches('/'))).ok()?
    };
    base.join(href).ok().map(String::from)
}

#[async_trait]
impl FreeTextProvider for LinkSiteProvider {
    fn name(&self) -> &str {
        self.site.name
    }

    fn priority(&self) -> i32 {
        self.site.priority
    }

    fn expected_domains(&self) -> &[&str] {
        self.site.domains
    }

    async fn search(&self, query: &LookupQuery) -> Result<LookupResult, ProviderError> {
        let url = self.page_url(query);
        tracing::debug!("{}: GET {}", self.site.name, url);

        let html = self.transport.get_text(&url).await?;
        let candidates = self.candidates(&url, &html);
        tracing::debug!("{}: {} candidate links", self.site.name, candidates.len());

        Ok(resolve(self.site.name, candidates, query))
    }
}
