//! Text helpers shared by the normalizer and the extractor.

use std::cmp::Ordering;

/// Lowercases, trims, and collapses runs of whitespace to a single space.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins the words of `raw` with `_` after normalizing, so `"SOC  Analyst"`
/// reads as `soc_analyst`.
pub fn canonical_form(raw: &str) -> String {
    normalize_text(raw).replace(' ', "_")
}

/// Longest phrase first, ties broken lexicographically.
pub fn phrase_priority(a: &str, b: &str) -> Ordering {
    b.len().cmp(&a.len()).then_with(|| a.cmp(b))
}

/// Clone an alias map into a list ordered by [`phrase_priority`].
pub fn prioritized<'a, K, I>(aliases: I) -> Vec<(String, K)>
where
    K: Clone + 'a,
    I: IntoIterator<Item = (&'a String, &'a K)>,
{
    let mut out: Vec<(String, K)> = aliases
        .into_iter()
        .map(|(phrase, key)| (phrase.clone(), key.clone()))
        .collect();
    out.sort_by(|a, b| phrase_priority(&a.0, &b.0));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("  Cloud   Security\tEngineer "), "cloud security engineer");
        assert_eq!(canonical_form(" SOC Analyst"), "soc_analyst");
    }

    #[test]
    fn longer_phrases_sort_first() {
        let mut phrases = vec!["security engineer", "cloud security engineer", "dfir", "abcd"];
        phrases.sort_by(|a, b| phrase_priority(a, b));
        assert_eq!(
            phrases,
            vec!["cloud security engineer", "security engineer", "abcd", "dfir"]
        );
    }
}
