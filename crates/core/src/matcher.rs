//! The symptom matching engine.
//!
//! Three stages, strictly ordered:
//!
//! 1. **Phrase matching** — find at most one multi-word condition whose
//!    constituent words appear contiguously, in order, in the keyword
//!    stream. The first identifier in catalog declaration order wins.
//! 2. **Single-term matching** — only when no phrase matched: every keyword
//!    that is an exact catalog key (canonical or alias) produces its own
//!    match, in input order.
//! 3. **Fuzzy fallback** — only when both previous stages produced nothing:
//!    re-tokenize the raw input with stop-words kept and accept, per word,
//!    the most similar catalog key at or above the similarity threshold.
//!
//! Matching is synchronous and stateless: a matcher borrows the read-only
//! catalog and owns nothing, so any number of invocations may run
//! concurrently.

use crate::conditions::ConditionCatalog;
use crate::constants::FUZZY_SIMILARITY_THRESHOLD;
use crate::text;
use spr_types::PoseKey;

/// How a condition match was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Phrase,
    Exact,
    Fuzzy,
}

/// One matched condition: the term to display and the poses to recommend.
///
/// `term` is the condition identifier for phrase matches, the literal input
/// token for exact matches, and the literal (misspelled) input word for
/// fuzzy matches.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionMatch {
    pub term: String,
    pub kind: MatchKind,
    pub poses: Vec<PoseKey>,
}

/// Stateless matcher over a read-only condition catalog.
#[derive(Debug, Clone, Copy)]
pub struct SymptomMatcher<'a> {
    catalog: &'a ConditionCatalog,
}

impl<'a> SymptomMatcher<'a> {
    pub fn new(catalog: &'a ConditionCatalog) -> Self {
        Self { catalog }
    }

    /// Runs the full matching pipeline over one raw input.
    ///
    /// Returns zero or more matches; an empty result means the caller must
    /// emit an explicit "no recommendation found" response rather than a
    /// bare empty list.
    pub fn match_input(&self, input: &str) -> Vec<ConditionMatch> {
        let tokens = text::keywords(input);
        tracing::debug!(?tokens, "extracted keywords");

        if let Some(found) = self.match_phrase(&tokens) {
            return vec![found];
        }

        let exact = self.match_single_terms(&tokens);
        if !exact.is_empty() {
            return exact;
        }

        self.match_fuzzy(input)
    }

    /// Finds at most one multi-word condition whose words appear as a
    /// contiguous, order-preserving run in `tokens`.
    ///
    /// Identifiers are scanned in catalog declaration order, so the first
    /// declared identifier wins even when a later one also occurs in the
    /// text. Returns `None` when no multi-word identifier matches.
    pub fn match_phrase(&self, tokens: &[String]) -> Option<ConditionMatch> {
        for (key, entry) in self.catalog.multi_word_identifiers() {
            let words: Vec<&str> = key.words().collect();
            if words.len() > tokens.len() {
                continue;
            }

            let found = tokens
                .windows(words.len())
                .any(|window| window.iter().zip(&words).all(|(t, w)| t == w));

            if found {
                return Some(ConditionMatch {
                    term: key.as_str().to_string(),
                    kind: MatchKind::Phrase,
                    poses: entry.poses().to_vec(),
                });
            }
        }
        None
    }

    /// Matches individual tokens against catalog keys by direct equality.
    ///
    /// Every matching token produces its own entry, in input order; a
    /// sentence naming two conditions yields two recommendation groups.
    pub fn match_single_terms(&self, tokens: &[String]) -> Vec<ConditionMatch> {
        tokens
            .iter()
            .filter_map(|token| {
                let entry = self.catalog.lookup(token)?;
                Some(ConditionMatch {
                    term: token.clone(),
                    kind: MatchKind::Exact,
                    poses: entry.poses().to_vec(),
                })
            })
            .collect()
    }

    /// Last-resort approximate matching over the raw input.
    ///
    /// Re-tokenizes with stop-words kept, and for each word that is not
    /// already an exact catalog key finds the most similar key by normalized
    /// Levenshtein similarity. A word produces a match only when the best
    /// candidate reaches [`FUZZY_SIMILARITY_THRESHOLD`]; the match is keyed
    /// by the original input word, with the candidate's pose list. Ties at
    /// equal similarity keep the earliest declared candidate.
    pub fn match_fuzzy(&self, input: &str) -> Vec<ConditionMatch> {
        let mut matches = Vec::new();

        for word in text::words(input) {
            if self.catalog.contains(&word) {
                continue;
            }

            let mut best: Option<(&str, f64)> = None;
            for candidate in self.catalog.fuzzy_candidates() {
                let similarity = strsim::normalized_levenshtein(&word, candidate.as_str());
                if best.map_or(true, |(_, s)| similarity > s) {
                    best = Some((candidate.as_str(), similarity));
                }
            }

            if let Some((candidate, similarity)) = best {
                if similarity >= FUZZY_SIMILARITY_THRESHOLD {
                    tracing::debug!(%word, %candidate, similarity, "fuzzy matched");
                    let entry = self
                        .catalog
                        .lookup(candidate)
                        .expect("fuzzy candidate is a catalog key");
                    matches.push(ConditionMatch {
                        term: word.clone(),
                        kind: MatchKind::Fuzzy,
                        poses: entry.poses().to_vec(),
                    });
                }
            }
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ConditionCatalog {
        ConditionCatalog::builtin()
    }

    fn match_input(input: &str) -> Vec<ConditionMatch> {
        let catalog = catalog();
        let matcher = SymptomMatcher::new(&catalog);
        matcher.match_input(input)
    }

    #[test]
    fn phrase_match_beats_single_terms() {
        let matches = match_input("I have had back pain since last week");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "back_pain");
        assert_eq!(matches[0].kind, MatchKind::Phrase);

        let poses: Vec<&str> = matches[0].poses.iter().map(|p| p.as_str()).collect();
        assert_eq!(poses, vec!["knee_to_chest", "downward_facing_dog_pose"]);
    }

    #[test]
    fn phrase_match_spans_three_words() {
        let matches = match_input("my doctor says high blood pressure runs in the family");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "high_blood_pressure");
        assert_eq!(matches[0].kind, MatchKind::Phrase);
    }

    #[test]
    fn phrase_requires_contiguous_words_in_order() {
        let catalog = catalog();
        let matcher = SymptomMatcher::new(&catalog);

        let tokens = text::keywords("pain spreading from neck to back");
        // "back" then "pain" never appear adjacent in that order.
        assert!(matcher.match_phrase(&tokens).is_none());
    }

    #[test]
    fn single_word_condition_matches_exactly() {
        let matches = match_input("I have asthma");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "asthma");
        assert_eq!(matches[0].kind, MatchKind::Exact);
    }

    #[test]
    fn two_conditions_yield_two_groups_in_input_order() {
        let matches = match_input("my insomnia is worse than my arthritis");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].term, "insomnia");
        assert_eq!(matches[1].term, "arthritis");
    }

    #[test]
    fn duplicate_tokens_yield_duplicate_groups() {
        let matches = match_input("stress stress everywhere");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].term, "stress");
        assert_eq!(matches[1].term, "stress");
    }

    #[test]
    fn shortform_matches_like_its_canonical_form() {
        let via_alias = match_input("my bp is acting up");
        let canonical = match_input("severe back pain");

        assert_eq!(via_alias.len(), 1);
        assert_eq!(via_alias[0].term, "bp");
        assert_eq!(via_alias[0].poses, canonical[0].poses);
    }

    #[test]
    fn fuzzy_matches_misspelling_and_keeps_original_word() {
        // One deletion from "asthma": similarity 5/6 ≈ 0.83.
        let matches = match_input("I think I have astma");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "astma");
        assert_eq!(matches[0].kind, MatchKind::Fuzzy);

        let catalog = catalog();
        let expected = catalog.lookup("asthma").unwrap();
        assert_eq!(matches[0].poses, expected.poses().to_vec());
    }

    #[test]
    fn fuzzy_is_not_reached_when_exact_matches_exist() {
        // "stress" matches exactly; the misspelled "astma" must not add a
        // second group because fuzzy only runs on a fully-unmatched input.
        let matches = match_input("stress and astma");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "stress");
        assert_eq!(matches[0].kind, MatchKind::Exact);
    }

    #[test]
    fn dissimilar_input_yields_no_matches() {
        assert!(match_input("my kneecap itches").is_empty());
        assert!(match_input("").is_empty());
    }

    #[test]
    fn below_threshold_similarity_is_rejected() {
        // "asma" vs "asthma": similarity 4/6 ≈ 0.67, under 0.8.
        assert!(match_input("asma").is_empty());
    }

    #[test]
    fn stop_words_do_not_break_phrase_matching() {
        // Stop-word removal happens before the window slides, so filler
        // between keywords is fine as long as the identifier words stay
        // adjacent among the *kept* tokens.
        let matches = match_input("terrible, just terrible neck pain today");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "neck_pain");
    }

    #[test]
    fn multi_word_alias_is_phrase_matchable() {
        let matches = match_input("my mental stress is unbearable");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "mental_stress");
        assert_eq!(matches[0].kind, MatchKind::Phrase);

        let catalog = catalog();
        let stress = catalog.lookup("stress").unwrap();
        assert_eq!(matches[0].poses, stress.poses().to_vec());
    }

    #[test]
    fn declaration_order_breaks_phrase_ties() {
        // Both identifiers occur in the text; back_pain is declared before
        // neck_pain, so it wins regardless of text position.
        let matches = match_input("neck pain and back pain");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "back_pain");
    }

    #[test]
    fn fuzzy_matches_each_qualifying_word() {
        // Two independent near-misses in one otherwise-unmatched input.
        let matches = match_input("stres and astma");
        let terms: Vec<&str> = matches.iter().map(|m| m.term.as_str()).collect();
        assert_eq!(terms, vec!["stres", "astma"]);
        assert!(matches.iter().all(|m| m.kind == MatchKind::Fuzzy));
    }
}
