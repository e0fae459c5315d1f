//! Tokenization of free-text symptom descriptions.
//!
//! Two tokenizations exist on purpose. [`keywords`] is the matching view:
//! alphabetic runs, lowercased, with stop-words removed, order preserved for
//! the phrase matcher. [`words`] is the fallback view used only by the fuzzy
//! matcher: the same alphabetic runs but with stop-words kept, because a
//! misspelled condition can look like anything, including a stop-word.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Common English stop words excluded from keyword extraction.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut words = HashSet::new();
    words.extend([
        // Articles
        "a", "an", "the",
        // Pronouns
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
        "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "these", "those",
        // Common verbs
        "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
        "do", "does", "did", "doing", "get", "got", "feel", "feels", "feeling", "felt", "suffer",
        "suffering",
        // Prepositions
        "at", "by", "for", "with", "about", "against", "between", "into", "through", "during",
        "before", "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off",
        "over", "under",
        // Conjunctions and fillers
        "and", "but", "if", "or", "because", "as", "until", "while", "of", "so", "than", "too",
        "very", "just", "can", "will", "should", "would", "could", "also", "really", "quite",
        // Other
        "s", "t", "not", "no", "nor", "now", "here", "there", "when", "where", "why", "how",
        "all", "any", "each", "few", "more", "most", "other", "some", "such", "only", "own",
        "same", "then", "again", "further", "once", "lot", "lots", "bit", "much", "many",
    ]);
    words
});

/// Check if a word is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word.to_lowercase().as_str())
}

fn alphabetic_runs(input: &str) -> impl Iterator<Item = String> + '_ {
    input
        .split(|c: char| !c.is_alphabetic())
        .filter(|run| !run.is_empty())
        .map(|run| run.to_lowercase())
}

/// Extracts matching keywords from raw input: lowercased alphabetic runs
/// with stop-words removed, in input order.
///
/// Empty input (or input with nothing but stop-words and punctuation) yields
/// an empty sequence; downstream matchers treat that as "no match found".
pub fn keywords(input: &str) -> Vec<String> {
    alphabetic_runs(input)
        .filter(|word| !STOP_WORDS.contains(word.as_str()))
        .collect()
}

/// Extracts every word from raw input, stop-words included.
///
/// Only the fuzzy fallback matcher uses this view.
pub fn words(input: &str) -> Vec<String> {
    alphabetic_runs(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_drop_stop_words_and_punctuation() {
        let tokens = keywords("I have a lot of stress, and my back hurts!");
        assert_eq!(tokens, vec!["stress", "back", "hurts"]);
    }

    #[test]
    fn keywords_preserve_input_order() {
        let tokens = keywords("first anxiety then insomnia");
        assert_eq!(tokens, vec!["first", "anxiety", "insomnia"]);
    }

    #[test]
    fn keywords_lowercase_input() {
        assert_eq!(keywords("Severe ASTHMA"), vec!["severe", "asthma"]);
    }

    #[test]
    fn non_alphabetic_tokens_are_dropped() {
        let tokens = keywords("pain123 42 back-pain");
        // Digits split runs apart; hyphens do too.
        assert_eq!(tokens, vec!["pain", "back", "pain"]);
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(keywords("").is_empty());
        assert!(keywords("   ...  ").is_empty());
        assert!(words("").is_empty());
    }

    #[test]
    fn only_stop_words_yields_empty_keywords() {
        assert!(keywords("i have been very much").is_empty());
    }

    #[test]
    fn words_keep_stop_words() {
        let all = words("I have astma");
        assert_eq!(all, vec!["i", "have", "astma"]);
    }

    #[test]
    fn stop_word_check_is_case_insensitive() {
        assert!(is_stop_word("The"));
        assert!(!is_stop_word("stress"));
    }
}
