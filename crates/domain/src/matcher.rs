//! The multi-stage name matcher: exact lookup, then per-entry scoring with
//! three independent measures, then confidence-tiered classification.
//!
//! Scores live in [0, 1]. The thresholds are semantic constants of the
//! matching model, not configuration: 0.9 for a whole-substring hit, 0.8
//! for the high-confidence tier, 0.6 for the suggestion floor.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ItemRecord};
use crate::normalize::normalize;

/// Best score above this is returned as a match the requester most likely
/// meant; staff still see the confidence figure.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;
/// Best score above this (but not above the high bar) becomes a suggestion
/// pending staff confirmation.
pub const SUGGESTION_THRESHOLD: f64 = 0.6;
/// Flat score awarded when the cleaned query is a substring of the key.
const SUBSTRING_SCORE: f64 = 0.9;
/// Alternatives shown alongside a positive match.
const MAX_ALTERNATIVES: usize = 3;
/// Alternatives shown when nothing cleared the suggestion floor.
const MAX_LOW_CONFIDENCE_ALTERNATIVES: usize = 5;

/// A scored catalog entry collected during fuzzy resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub item: ItemRecord,
    pub score: f64,
}

/// Outcome of resolving one query against the catalog.
///
/// "Nothing matched" is an outcome, not an error. Alternatives lists
/// include the best match itself, ordered by descending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// No candidate scored above the suggestion threshold.
    NotFound,
    /// The normalized query equals a catalog key (confidence 1.0).
    Exact { item: ItemRecord },
    /// Best fuzzy score above 0.8.
    HighConfidence {
        item: ItemRecord,
        confidence: f64,
        alternatives: Vec<Candidate>,
    },
    /// Best fuzzy score in (0.6, 0.8]; staff should confirm before filling.
    Suggestion {
        item: ItemRecord,
        confidence: f64,
        alternatives: Vec<Candidate>,
    },
    /// Candidates exist but none is a positive match.
    LowConfidence { alternatives: Vec<Candidate> },
}

impl MatchOutcome {
    /// The matched item for positive outcomes.
    pub fn item(&self) -> Option<&ItemRecord> {
        match self {
            Self::Exact { item }
            | Self::HighConfidence { item, .. }
            | Self::Suggestion { item, .. } => Some(item),
            Self::NotFound | Self::LowConfidence { .. } => None,
        }
    }

    /// Match certainty in [0, 1]; zero for non-matches.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Exact { .. } => 1.0,
            Self::HighConfidence { confidence, .. } | Self::Suggestion { confidence, .. } => {
                *confidence
            }
            Self::NotFound | Self::LowConfidence { .. } => 0.0,
        }
    }
}

/// Resolve a free-text query against the catalog.
///
/// Exact lookup is tried with the cleaned key first, then with the query
/// merely lowercased and trimmed. The order matters: a cleaned match that
/// coincides with a real catalog key must win over coincidental raw
/// equality. With no exact hit, every entry is scored with the maximum of
/// three measures (whole-substring, partial-token overlap, normalized edit
/// distance) and the best score picks the confidence tier. Ties keep the
/// first-seen entry, so results are deterministic for a given catalog.
pub fn resolve(catalog: &Catalog, query: &str) -> MatchOutcome {
    let cleaned = normalize(query);
    let plain = query.trim().to_lowercase();

    if let Some(item) = catalog.get(&cleaned) {
        return MatchOutcome::Exact { item: item.clone() };
    }
    if let Some(item) = catalog.get(&plain) {
        return MatchOutcome::Exact { item: item.clone() };
    }

    // An empty cleaned query would be a substring of every key; it matches
    // nothing rather than everything.
    if cleaned.is_empty() {
        return MatchOutcome::NotFound;
    }

    let mut best: Option<(f64, ItemRecord)> = None;
    let mut candidates: Vec<Candidate> = Vec::new();

    for (key, record) in catalog.iter() {
        let score = entry_score(&cleaned, key);

        if score > SUGGESTION_THRESHOLD {
            candidates.push(Candidate {
                item: record.clone(),
                score,
            });
        }

        // Strict comparison keeps the first-seen entry on ties.
        if best.as_ref().map_or(true, |(s, _)| score > *s) {
            best = Some((score, record.clone()));
        }
    }

    // Stable sort: equal scores keep catalog insertion order.
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    match best {
        Some((score, item)) if score > HIGH_CONFIDENCE_THRESHOLD => {
            candidates.truncate(MAX_ALTERNATIVES);
            MatchOutcome::HighConfidence {
                item,
                confidence: score,
                alternatives: candidates,
            }
        }
        Some((score, item)) if score > SUGGESTION_THRESHOLD => {
            candidates.truncate(MAX_ALTERNATIVES);
            MatchOutcome::Suggestion {
                item,
                confidence: score,
                alternatives: candidates,
            }
        }
        _ if !candidates.is_empty() => {
            candidates.truncate(MAX_LOW_CONFIDENCE_ALTERNATIVES);
            MatchOutcome::LowConfidence {
                alternatives: candidates,
            }
        }
        _ => MatchOutcome::NotFound,
    }
}

/// Best of the three measures for one catalog key.
fn entry_score(cleaned_query: &str, key: &str) -> f64 {
    let substring = if key.contains(cleaned_query) {
        SUBSTRING_SCORE
    } else {
        0.0
    };
    let partial = partial_token_score(cleaned_query, key);
    let fuzzy = fuzzy_score(cleaned_query, key);
    substring.max(partial).max(fuzzy)
}

/// Fraction of query tokens (length > 2) that are a substring of, or a
/// superstring of, some key token. Zero when the query contributes no
/// usable tokens.
fn partial_token_score(query: &str, key: &str) -> f64 {
    let query_tokens: Vec<&str> = query.split_whitespace().filter(|t| t.len() > 2).collect();
    if query_tokens.is_empty() {
        return 0.0;
    }
    let key_tokens: Vec<&str> = key.split_whitespace().collect();

    let matched = query_tokens
        .iter()
        .filter(|qt| {
            key_tokens
                .iter()
                .any(|kt| kt.contains(*qt) || qt.contains(kt))
        })
        .count();

    matched as f64 / query_tokens.len() as f64
}

/// Normalized edit-distance similarity over the full strings.
fn fuzzy_score(query: &str, key: &str) -> f64 {
    if query == key {
        return 1.0;
    }
    if query.is_empty() || key.is_empty() {
        return 0.0;
    }
    let query_chars: Vec<char> = query.chars().collect();
    let key_chars: Vec<char> = key.chars().collect();
    let max_len = query_chars.len().max(key_chars.len());
    let distance = levenshtein(&query_chars, &key_chars);
    1.0 - (distance as f64 / max_len as f64)
}

/// Standard edit distance (insert/delete/substitute, unit cost), two-row DP.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemRecord;

    fn sample_catalog() -> Catalog {
        let mut builder = Catalog::builder();
        builder.push(ItemRecord::new("Sword of Flame").with_counts(2, 0, 1));
        builder.push(ItemRecord::new("Cloak of Flames").with_counts(2, 1, 0));
        builder.push(ItemRecord::new("Boots of Speed").with_counts(4, 2, 0));
        builder.push(ItemRecord::new("Flowing Black Silk Sash").with_counts(1, 1, 0));
        builder.push(ItemRecord::new("Timespinner, Blade of the Hunter").with_counts(0, 0, 1));
        builder.build()
    }

    #[test]
    fn every_catalog_key_resolves_exactly() {
        let catalog = sample_catalog();
        let keys: Vec<String> = catalog.iter().map(|(k, _)| k.to_string()).collect();
        for key in keys {
            let outcome = resolve(&catalog, &key);
            assert!(
                matches!(outcome, MatchOutcome::Exact { .. }),
                "{:?} did not resolve exactly",
                key
            );
            assert_eq!(outcome.confidence(), 1.0);
        }
    }

    #[test]
    fn exact_match_survives_quality_suffix_and_casing() {
        let catalog = sample_catalog();
        let outcome = resolve(&catalog, "Sword of Flame (Enchanted)");
        assert!(matches!(outcome, MatchOutcome::Exact { .. }));
        assert_eq!(outcome.item().unwrap().name, "Sword of Flame");
    }

    #[test]
    fn empty_query_is_not_found() {
        let catalog = sample_catalog();
        assert_eq!(resolve(&catalog, ""), MatchOutcome::NotFound);
        assert_eq!(resolve(&catalog, "   "), MatchOutcome::NotFound);
        // Normalizes to nothing but is not literally empty
        assert_eq!(resolve(&catalog, "(2)"), MatchOutcome::NotFound);
    }

    #[test]
    fn missing_space_typo_still_matches() {
        let catalog = sample_catalog();
        let outcome = resolve(&catalog, "swordof flame");
        match outcome {
            MatchOutcome::HighConfidence { item, confidence, .. }
            | MatchOutcome::Suggestion { item, confidence, .. } => {
                assert_eq!(item.name, "Sword of Flame");
                assert!(confidence > SUGGESTION_THRESHOLD);
            }
            other => panic!("expected a fuzzy match, got {:?}", other),
        }
    }

    #[test]
    fn substring_query_is_high_confidence() {
        let catalog = sample_catalog();
        let outcome = resolve(&catalog, "black silk");
        match outcome {
            MatchOutcome::HighConfidence { item, confidence, .. } => {
                assert_eq!(item.name, "Flowing Black Silk Sash");
                assert!(confidence >= 0.9);
            }
            other => panic!("expected high confidence, got {:?}", other),
        }
    }

    #[test]
    fn unrelated_query_is_not_found() {
        let catalog = sample_catalog();
        assert_eq!(resolve(&catalog, "zzzzqqqq"), MatchOutcome::NotFound);
    }

    #[test]
    fn alternatives_are_sorted_and_capped() {
        let mut builder = Catalog::builder();
        for i in 0..6 {
            builder.push(ItemRecord::new(format!("Ring of Scale {}", i)).with_counts(1, 0, 0));
        }
        let catalog = builder.build();

        let outcome = resolve(&catalog, "ring of scale");
        match outcome {
            MatchOutcome::HighConfidence { alternatives, .. } => {
                assert_eq!(alternatives.len(), 3);
                for pair in alternatives.windows(2) {
                    assert!(pair[0].score >= pair[1].score);
                }
            }
            other => panic!("expected high confidence, got {:?}", other),
        }
    }

    #[test]
    fn ties_keep_first_seen_entry() {
        let mut builder = Catalog::builder();
        builder.push(ItemRecord::new("Orb of Frost").with_counts(1, 0, 0));
        builder.push(ItemRecord::new("Orb of Flame").with_counts(1, 0, 0));
        let catalog = builder.build();

        // "orb of" scores identically against both keys.
        let outcome = resolve(&catalog, "orb of");
        assert_eq!(outcome.item().unwrap().name, "Orb of Frost");
    }

    #[test]
    fn partial_token_score_ignores_short_tokens() {
        assert_eq!(partial_token_score("of", "sword of flame"), 0.0);
        assert!(partial_token_score("sword flame", "sword of flame") > 0.99);
    }

    #[test]
    fn levenshtein_basics() {
        let to_chars = |s: &str| s.chars().collect::<Vec<_>>();
        assert_eq!(levenshtein(&to_chars("kitten"), &to_chars("sitting")), 3);
        assert_eq!(levenshtein(&to_chars(""), &to_chars("abc")), 3);
        assert_eq!(levenshtein(&to_chars("abc"), &to_chars("abc")), 0);
    }
}
