//! Fuzzy title and author matching.
//!
//! Both matchers are deliberately conservative: claiming a copyrighted work
//! is free to read is worse than missing a free edition, so every rule that
//! can widen a match is gated.
//!
//! # Title ladder
//!
//! Evaluated in order, first success wins:
//! 1. normalized titles are equal
//! 2. main titles (text before the first `:`) are equal
//! 3. both main titles are longer than 15 characters and one contains the other
//! 4. one full title is a word-aligned prefix of the other, and the shorter
//!    one has at least two significant words
//! 5. significant-word overlap of the main titles is at least 70% in BOTH
//!    directions
//!
//! The main title is split on the raw string before normalization, then each
//! half is normalized on its own, since normalization strips the colon.

use std::collections::HashSet;

use super::normalize::{is_numeric_token, normalize_author, normalize_title};

/// Main titles longer than this may match by containment.
const CONTAINMENT_MIN_LEN: usize = 15;

/// Required share of significant words matched, in each direction.
const WORD_OVERLAP_THRESHOLD: f64 = 0.7;

/// Minimum significant words in the shorter title for a prefix match.
const PREFIX_MIN_SIGNIFICANT_WORDS: usize = 2;

/// How many trailing name tokens may hold a surname.
const SURNAME_WINDOW: usize = 3;

/// Check whether a provider's title denotes the same work as ours.
pub fn title_matches(candidate: &str, target: &str) -> bool {
    let candidate_full = normalize_title(candidate);
    let target_full = normalize_title(target);

    if candidate_full.is_empty() || target_full.is_empty() {
        return false;
    }

    if candidate_full == target_full {
        return true;
    }

    let candidate_main = main_title(candidate);
    let target_main = main_title(target);

    if !candidate_main.is_empty() && candidate_main == target_main {
        return true;
    }

    if candidate_main.len() > CONTAINMENT_MIN_LEN
        && target_main.len() > CONTAINMENT_MIN_LEN
        && (candidate_main.contains(&target_main) || target_main.contains(&candidate_main))
    {
        return true;
    }

    if is_gated_prefix(&candidate_full, &target_full) {
        return true;
    }

    words_overlap(&candidate_main, &target_main)
}

/// Check whether a provider's author string denotes the same person as ours.
///
/// Handles "Last, First" forms, surname-only queries and multi-part surnames
/// such as "Gabriel García Márquez" vs "García".
pub fn author_matches(candidate: &str, target: &str) -> bool {
    let candidate = canonical_author(candidate);
    let target = canonical_author(target);

    if candidate.is_empty() || target.is_empty() {
        return false;
    }

    if candidate == target {
        return true;
    }

    let candidate_last = last_name(&candidate);
    let target_last = last_name(&target);

    if candidate_last == target_last {
        return true;
    }

    surname_in_final_tokens(&candidate, target_last)
        || surname_in_final_tokens(&target, candidate_last)
}

/// True when any of the candidate's credited authors matches the target.
pub fn any_author_matches<S: AsRef<str>>(candidates: &[S], target: &str) -> bool {
    candidates
        .iter()
        .any(|candidate| author_matches(candidate.as_ref(), target))
}

/// Normalize an author name into "first last" order.
///
/// Catalog credits such as "Dickens, Charles" or "Stevenson, Robert Louis,
/// 1850-1894" are split at the first comma on the raw string, since
/// normalization drops the comma. The surname part goes last, so the final
/// token is always the surname.
pub fn canonical_author(author: &str) -> String {
    let Some((surname, given)) = author.split_once(',') else {
        return normalize_author(author);
    };
    let surname = normalize_author(surname);
    let given = normalize_author(given);
    match (given.is_empty(), surname.is_empty()) {
        (true, _) => surname,
        (false, true) => given,
        (false, false) => format!("{given} {surname}"),
    }
}

/// Surname of a name produced by [`canonical_author`]: its final token.
pub fn last_name(canonical: &str) -> &str {
    canonical.split_whitespace().last().unwrap_or("")
}

/// Normalized text before the first colon, or the whole title without one.
pub fn main_title(title: &str) -> String {
    match title.split_once(':') {
        Some((head, _)) => {
            let head = normalize_title(head);
            if head.is_empty() {
                normalize_title(title)
            } else {
                head
            }
        }
        None => normalize_title(title),
    }
}

/// Distinct tokens longer than two characters that are not pure digits.
pub fn significant_words(normalized: &str) -> HashSet<&str> {
    normalized
        .split_whitespace()
        .filter(|word| word.len() > 2 && !is_numeric_token(word))
        .collect()
}

fn is_gated_prefix(a: &str, b: &str) -> bool {
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if !longer.starts_with(shorter) {
        return false;
    }

    let word_aligned = longer[shorter.len()..]
        .chars()
        .next()
        .is_none_or(|c| c == ' ');

    word_aligned && significant_words(shorter).len() >= PREFIX_MIN_SIGNIFICANT_WORDS
}

fn words_overlap(candidate: &str, target: &str) -> bool {
    let candidate_words = significant_words(candidate);
    let target_words = significant_words(target);

    if candidate_words.is_empty() || target_words.is_empty() {
        return false;
    }

    let shared = candidate_words.intersection(&target_words).count();

    let candidate_ratio = shared as f64 / candidate_words.len() as f64;
    let target_ratio = shared as f64 / target_words.len() as f64;

    candidate_ratio >= WORD_OVERLAP_THRESHOLD && target_ratio >= WORD_OVERLAP_THRESHOLD
}

fn surname_in_final_tokens(full_name: &str, surname: &str) -> bool {
    if surname.is_empty() {
        return false;
    }
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    if parts.len() <= 1 {
        return false;
    }
    let start = parts.len().saturating_sub(SURNAME_WINDOW);
    parts[start..].contains(&surname)
}
