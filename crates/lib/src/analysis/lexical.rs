//! # Lexical Analysis
//!
//! Tokenization and unigram/bigram frequency counting. Tokens are maximal runs
//! of Latin letters (plus the accented vowels used in Italian) of length three
//! or more, lowercased.

use super::lexicon::STOP_WORDS;
use regex::Regex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::LazyLock;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-ZàèéìòùÀÈÉÌÒÙ]{3,}").expect("word pattern is a valid regex")
});

/// Splits `text` into lowercase word tokens, stop words included.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Splits `text` into lowercase word tokens with stop words removed.
pub fn content_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| !STOP_WORDS.contains(token.as_str()))
        .collect()
}

/// A frequency counter whose ranking is deterministic: ties keep the order in
/// which terms were first seen.
#[derive(Debug, Clone)]
pub struct TermCounter<K> {
    counts: HashMap<K, (usize, usize)>,
    next_seq: usize,
}

impl<K> Default for TermCounter<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> TermCounter<K> {
    pub fn add(&mut self, term: K) {
        let seq = self.next_seq;
        let entry = self.counts.entry(term).or_insert((0, seq));
        if entry.0 == 0 {
            self.next_seq += 1;
        }
        entry.0 += 1;
    }

    /// The `n` most frequent terms, highest count first.
    pub fn most_common(&self, n: usize) -> Vec<(K, usize)> {
        let mut ranked: Vec<(&K, &(usize, usize))> = self.counts.iter().collect();
        ranked.sort_by(|(_, (ca, sa)), (_, (cb, sb))| cb.cmp(ca).then(sa.cmp(sb)));
        ranked
            .into_iter()
            .take(n)
            .map(|(term, (count, _))| (term.clone(), *count))
            .collect()
    }
}

/// Unigram and bigram counts over a collection of texts.
///
/// Bigrams pair adjacent tokens *after* stop-word removal, so dropping a stop
/// word can join two tokens that were not adjacent in the original text.
#[derive(Debug, Clone, Default)]
pub struct LexicalProfile {
    pub unigrams: TermCounter<String>,
    pub bigrams: TermCounter<(String, String)>,
}

impl LexicalProfile {
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut profile = Self::default();
        for text in texts {
            profile.add_text(text.as_ref());
        }
        profile
    }

    pub fn add_text(&mut self, text: &str) {
        let tokens = content_tokens(text);
        for pair in tokens.windows(2) {
            self.bigrams.add((pair[0].clone(), pair[1].clone()));
        }
        for token in tokens {
            self.unigrams.add(token);
        }
    }
}

/// The `top_n` most frequent non-stop-word tokens across `texts`.
pub fn extract_keywords<S: AsRef<str>>(texts: &[S], top_n: usize) -> Vec<(String, usize)> {
    LexicalProfile::from_texts(texts).unigrams.most_common(top_n)
}

/// The `top_n` most frequent bigrams across `texts`.
pub fn extract_bigrams<S: AsRef<str>>(
    texts: &[S],
    top_n: usize,
) -> Vec<((String, String), usize)> {
    LexicalProfile::from_texts(texts).bigrams.most_common(top_n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_accents_and_drops_short_runs() {
        let tokens = tokenize("L'app è PIÙ veloce, ok?");
        assert_eq!(tokens, vec!["app", "più", "veloce"]);
    }

    #[test]
    fn test_bigrams_bridge_removed_stop_words() {
        let bigrams = extract_bigrams(&["crashes with the login"], 10);
        assert_eq!(
            bigrams,
            vec![(("crashes".to_string(), "login".to_string()), 1)]
        );
    }

    #[test]
    fn test_ties_rank_by_first_occurrence() {
        let keywords = extract_keywords(&["zebra apple zebra mango apple"], 3);
        assert_eq!(
            keywords,
            vec![
                ("zebra".to_string(), 2),
                ("apple".to_string(), 2),
                ("mango".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_counts_are_repeatable() {
        let texts = ["slow sync again", "sync slow slow", "login sync"];
        let first = extract_keywords(&texts, 10);
        let second = extract_keywords(&texts, 10);
        assert_eq!(first, second);
        assert_eq!(first[0], ("slow".to_string(), 3));
    }
}
