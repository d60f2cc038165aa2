//! String normalization for title and author comparison.
//!
//! Every function here is total: `None`, empty, or blank input yields `""`.
//! The same rules produce cache keys and matcher inputs, so a title that
//! normalizes equal in one place normalizes equal everywhere.

use std::sync::LazyLock;

use regex::Regex;

/// Trailing parenthetical clause such as "(1877)" or "(2nd ed.)".
static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("valid regex"));

/// A single leading article followed by whitespace.
static LEADING_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:the|a|an)\s+").expect("valid regex"));

/// Words dropped when building provider query strings.
const SEARCH_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "in", "at", "to", "of", "on", "by", "for", "and", "or", "with", "from",
];

/// Normalize a title for equality comparison.
///
/// Lowercases, drops a trailing parenthetical, drops one leading article,
/// removes everything outside `[a-z0-9\s]` and collapses whitespace.
///
/// ```
/// use freetext_finder::freetext::normalize::normalize_title;
///
/// assert_eq!(normalize_title("The Spiritual Exercises"), "spiritual exercises");
/// assert_eq!(normalize_title("Anna Karenina (1877)"), "anna karenina");
/// ```
pub fn normalize_title(title: &str) -> String {
    let lowered = fold_lowercase(title);
    let lowered = lowered.trim();
    let without_paren = TRAILING_PARENTHETICAL.replace(lowered, "");
    let without_article = LEADING_ARTICLE.replace(&without_paren, "");
    collapse(without_article.chars().filter(|c| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace()
    }))
}

/// Normalize an author name: lowercase, letters and whitespace only.
pub fn normalize_author(author: &str) -> String {
    let lowered = fold_lowercase(author);
    collapse(
        lowered
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace()),
    )
}

/// Build a provider query string from a title.
///
/// Like [`normalize_title`], but also drops stop words and pure-digit tokens
/// (publication years). Never used for equality checks.
pub fn normalize_for_search(title: &str) -> String {
    normalize_title(title)
        .split_whitespace()
        .filter(|word| !SEARCH_STOP_WORDS.contains(word))
        .filter(|word| !is_numeric_token(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Optional-input wrapper used at the edges where titles may be missing.
pub fn normalize_title_opt(title: Option<&str>) -> String {
    title.map(normalize_title).unwrap_or_default()
}

/// Optional-input wrapper for author names.
pub fn normalize_author_opt(author: Option<&str>) -> String {
    author.map(normalize_author).unwrap_or_default()
}

/// True for tokens made only of ASCII digits.
pub fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Lowercase and fold common Latin diacritics to their ASCII base letters,
/// so "García" and "Garcia" compare equal instead of both losing the letter.
fn fold_lowercase(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars().flat_map(char::to_lowercase) {
        match fold_char(c) {
            Some(folded) => out.push_str(folded),
            None => out.push(c),
        }
    }
    out
}

fn fold_char(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => "i",
        'ł' | 'ľ' | 'ĺ' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ř' | 'ŕ' => "r",
        'ś' | 'š' | 'ş' => "s",
        'ß' => "ss",
        'ť' | 'ţ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

fn collapse(chars: impl Iterator<Item = char>) -> String {
    let filtered: String = chars.collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalized titles only ever contain the allowed alphabet
        #[test]
        fn title_output_alphabet(input in ".{0,80}") {
            let normalized = normalize_title(&input);
            prop_assert!(normalized
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
            prop_assert!(!normalized.starts_with(' '));
            prop_assert!(!normalized.ends_with(' '));
            prop_assert!(!normalized.contains("  "));
        }

        /// Author normalization never keeps digits or punctuation
        #[test]
        fn author_output_alphabet(input in ".{0,80}") {
            let normalized = normalize_author(&input);
            prop_assert!(normalized.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        }

        /// Normalizing an already-normalized author is a no-op
        #[test]
        fn author_is_idempotent(input in "[a-zA-Z ,.'-]{0,60}") {
            let once = normalize_author(&input);
            prop_assert_eq!(normalize_author(&once), once.clone());
        }

        /// Search strings never contain stop words or bare numbers
        #[test]
        fn search_has_no_stop_words(input in "[a-zA-Z0-9 ,:'-]{0,80}") {
            let query = normalize_for_search(&input);
            for word in query.split_whitespace() {
                prop_assert!(!SEARCH_STOP_WORDS.contains(&word));
                prop_assert!(!is_numeric_token(word));
            }
        }
    }
}
