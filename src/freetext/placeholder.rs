//! Placeholder titles assigned at ingestion time.
//!
//! Books imported from a photo feed get a date-stamped title such as
//! `2025-01-07 10:42` until someone catalogs them properly. Searching for
//! those would only produce false positives.

use std::sync::LazyLock;

use regex::Regex;

use super::traits::TemporaryTitlePredicate;

static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}").expect("valid regex"));

/// Treats titles that start with a `YYYY-M-D` date as temporary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatePrefixedTitles;

impl TemporaryTitlePredicate for DatePrefixedTitles {
    fn is_temporary_title(&self, title: &str) -> bool {
        DATE_PREFIX.is_match(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_prefixed_titles() {
        let predicate = DatePrefixedTitles;
        assert!(predicate.is_temporary_title("2025-01-07"));
        assert!(predicate.is_temporary_title("2025-1-7 Shelf photo"));
        assert!(predicate.is_temporary_title("2024-12-31_14-05-00"));
    }

    #[test]
    fn test_real_titles() {
        let predicate = DatePrefixedTitles;
        assert!(!predicate.is_temporary_title("1984"));
        assert!(!predicate.is_temporary_title("The Year 2025-01"));
        assert!(!predicate.is_temporary_title(" 2025-01-07"));
        assert!(!predicate.is_temporary_title(""));
    }
}
