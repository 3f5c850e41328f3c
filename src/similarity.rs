use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Description similarity strategy used by the fuzzy pass.
///
/// The legacy names `fuzzy` and `levenshtein` are accepted as aliases for
/// `word-overlap` and `edit-distance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    #[serde(alias = "fuzzy")]
    #[value(alias = "fuzzy")]
    WordOverlap,
    #[serde(alias = "levenshtein")]
    #[value(alias = "levenshtein")]
    EditDistance,
    /// Mean of the other two.
    Combined,
}

impl Algorithm {
    /// Similarity in 0.0..=1.0. Callers lower-case both sides first.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        match self {
            Self::WordOverlap => word_overlap_similarity(a, b),
            Self::EditDistance => edit_distance_similarity(a, b),
            Self::Combined => (word_overlap_similarity(a, b) + edit_distance_similarity(a, b)) / 2.0,
        }
    }
}

/// Levenshtein distance over chars, two-row DP.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                prev[j].min(prev[j + 1]).min(curr[j]) + 1
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

pub fn edit_distance_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Bank-side words found on the ledger side, over the longer word count.
///
/// Every occurrence on the bank side counts, so repeated words can push the
/// score up to 1.0 even when the ledger side has extra words.
pub fn word_overlap_similarity(a: &str, b: &str) -> f64 {
    let words_a: Vec<&str> = a.split_whitespace().collect();
    let words_b: Vec<&str> = b.split_whitespace().collect();
    let longest = words_a.len().max(words_b.len());
    if longest == 0 {
        return 1.0;
    }
    let set_b: HashSet<&str> = words_b.into_iter().collect();
    let common = words_a.iter().filter(|w| set_b.contains(*w)).count();
    common as f64 / longest as f64
}
