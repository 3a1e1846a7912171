//! Watch-history normalization and deduplication.
//!
//! Titles arrive decorated in inconsistent ways ("Show - S02E12 Pilot",
//! "Manchester by the Sea (2016)"). Everything here compares titles on a
//! normalized projection: lower-cased, year and episode decorations
//! stripped. Projections are recomputed per call and never cached — the
//! input is always the caller-supplied history, so nothing can go stale.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::HistoryEntry;

/// A trailing parenthesized 4-digit year, e.g. " (2016)".
static TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\d{4}\)\s*$").expect("trailing-year regex"));

/// An episode marker (`S02E12`) plus everything after it, including any
/// separator punctuation before the marker.
static EPISODE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s:\-–]*s\d+e\d+.*$").expect("episode-marker regex"));

/// Minimum length a watched title must have before it participates in
/// substring matching. Shorter titles would produce false positives
/// ("dark" inside "darkest hour").
const SUBSTRING_MATCH_MIN_LEN: usize = 5;

/// Normalize a title for comparison: lower-case, strip a trailing
/// `(YYYY)` year, strip an `S..E..` marker and everything after it, trim.
/// Both decorations may be present at once.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let no_year = TRAILING_YEAR.replace(&lowered, "");
    let no_episode = EPISODE_MARKER.replace(&no_year, "");
    no_episode.trim().to_string()
}

/// Deduplicate a history by normalized title.
///
/// Single pass; entries whose title and name both normalize to empty are
/// skipped entirely. The first occurrence of each distinct key is kept
/// and the insertion order of first occurrences is preserved.
pub fn deduplicate(history: &[HistoryEntry]) -> Vec<HistoryEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();
    for entry in history {
        let key = normalize_title(entry.display_title().unwrap_or(""));
        if key.is_empty() {
            continue;
        }
        if seen.insert(key) {
            kept.push(entry.clone());
        }
    }
    kept
}

/// Collect the set of normalized watched titles from a history.
pub fn normalized_titles(history: &[HistoryEntry]) -> HashSet<String> {
    history
        .iter()
        .filter_map(|entry| entry.display_title())
        .map(normalize_title)
        .filter(|key| !key.is_empty())
        .collect()
}

/// Is `candidate` already covered by the watched set?
///
/// Exact membership on the normalized candidate, plus one asymmetric
/// rule: a watched title of at least [`SUBSTRING_MATCH_MIN_LEN`] chars
/// also matches when it appears as a substring of the candidate. This
/// catches model output like "Breaking Bad Season 1" against a watched
/// "Breaking Bad". Only the watched title's length gates the rule; the
/// asymmetry is intentional, do not make it symmetric.
pub fn is_duplicate_of(candidate: &str, watched: &HashSet<String>) -> bool {
    let normalized = normalize_title(candidate);
    if normalized.is_empty() {
        return false;
    }
    if watched.contains(&normalized) {
        return true;
    }
    watched
        .iter()
        .any(|seen| seen.len() >= SUBSTRING_MATCH_MIN_LEN && normalized.contains(seen.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_episode_marker_and_tail() {
        assert_eq!(normalize_title("Show - S02E12 Title"), "show");
        assert_eq!(normalize_title("Show S01E01"), "show");
    }

    #[test]
    fn normalize_strips_trailing_year() {
        assert_eq!(
            normalize_title("Manchester by the Sea (2016)"),
            "manchester by the sea"
        );
    }

    #[test]
    fn normalize_strips_both_decorations() {
        assert_eq!(normalize_title("Show - S01E01 (2020)"), "show");
    }

    #[test]
    fn normalize_keeps_interior_year() {
        // Only a trailing year is a decoration.
        assert_eq!(normalize_title("2001: A Space Odyssey"), "2001: a space odyssey");
    }

    #[test]
    fn substring_rule_is_asymmetric() {
        let watched: HashSet<String> = ["breaking bad".to_string()].into_iter().collect();
        assert!(is_duplicate_of("breaking bad season 1", &watched));

        let short: HashSet<String> = ["dark".to_string()].into_iter().collect();
        assert!(!is_duplicate_of("darkest hour", &short));
    }

    #[test]
    fn no_match_on_unrelated_titles() {
        let watched: HashSet<String> = ["inception".to_string()].into_iter().collect();
        assert!(!is_duplicate_of("dune", &watched));
    }

    #[test]
    fn empty_watched_entries_are_ignored() {
        let watched: HashSet<String> = ["".to_string()].into_iter().collect();
        assert!(!is_duplicate_of("dune", &watched));
    }
}
