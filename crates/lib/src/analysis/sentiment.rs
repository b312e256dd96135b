//! # Sentiment
//!
//! Rule-based scoring against the bilingual positive and negative lexicons.
//! Stop words are *not* removed before scoring.

use super::lexical::tokenize;
use super::lexicon::{NEGATIVE_WORDS, POSITIVE_WORDS};
use super::round_to;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Mixed,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub score: f64,
    pub label: SentimentLabel,
    pub positive: usize,
    pub negative: usize,
    pub total_words: usize,
}

/// Scores an already tokenized text.
pub fn score_tokens<S: AsRef<str>>(tokens: &[S]) -> SentimentReport {
    let mut positive = 0;
    let mut negative = 0;
    for token in tokens {
        let token = token.as_ref();
        if POSITIVE_WORDS.contains(token) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(token) {
            negative += 1;
        }
    }

    let hits = positive + negative;
    let (score, label) = if hits == 0 {
        (0.0, SentimentLabel::Neutral)
    } else {
        let raw = (positive as f64 - negative as f64) / hits as f64;
        // The label uses the unrounded ratio; only the reported score is rounded.
        let label = if raw > 0.2 {
            SentimentLabel::Positive
        } else if raw < -0.2 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Mixed
        };
        (round_to(raw, 2), label)
    };

    SentimentReport {
        score,
        label,
        positive,
        negative,
        total_words: tokens.len(),
    }
}

/// Tokenizes every text and scores the combined token stream.
pub fn compute_sentiment<S: AsRef<str>>(texts: &[S]) -> SentimentReport {
    let tokens: Vec<String> = texts
        .iter()
        .flat_map(|text| tokenize(text.as_ref()))
        .collect();
    score_tokens(&tokens)
}
