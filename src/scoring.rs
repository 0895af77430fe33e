// src/scoring.rs
//! Similarity scorer: headline vs candidate title.
//!
//! score = similarity(a, b) × min(len a, len b) / max(len a, len b) × bonus
//!
//! The length ratio suppresses the classic fuzzy-match false positive where a
//! short string sits inside a much longer one. `bonus` is the trusted-publisher
//! multiplier (1.0 for everyone else), so scores can slightly exceed 1.

use std::sync::Arc;
use strsim::sorensen_dice;

use crate::config::HostLists;
use crate::normalize::normalize;

/// Base similarity primitive in ⟨0..1⟩ over two normalized strings.
pub trait TitleSimilarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Case-insensitive Sørensen–Dice over character bigrams, taking the better
/// of the text as written and the text with its words sorted. Sorting makes
/// reordered rewrites ("X wins $50M Navy contract" vs "X announces $50M
/// contract with Navy") comparable.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigramDice;

impl TitleSimilarity for BigramDice {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let a = a.to_lowercase();
        let b = b.to_lowercase();
        let direct = sorensen_dice(&a, &b);
        let reordered = sorensen_dice(&words_sorted(&a), &words_sorted(&b));
        direct.max(reordered)
    }
}

fn words_sorted(s: &str) -> String {
    let mut words: Vec<&str> = s.split_whitespace().collect();
    words.sort_unstable();
    words.join(" ")
}

/// `min/max` of the character lengths; 0 when both are empty.
pub fn length_ratio(a: &str, b: &str) -> f64 {
    let la = a.chars().count();
    let lb = b.chars().count();
    let max = la.max(lb);
    if max == 0 {
        return 0.0;
    }
    la.min(lb) as f64 / max as f64
}

#[derive(Clone)]
pub struct SimilarityScorer {
    hosts: HostLists,
    trusted_bonus: f64,
    similarity: Arc<dyn TitleSimilarity>,
}

impl std::fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("trusted_hosts", &self.hosts.trusted.len())
            .field("trusted_bonus", &self.trusted_bonus)
            .finish()
    }
}

impl SimilarityScorer {
    pub fn new(hosts: HostLists, trusted_bonus: f64) -> Self {
        Self {
            hosts,
            trusted_bonus,
            similarity: Arc::new(BigramDice),
        }
    }

    /// Swap the base similarity primitive.
    pub fn with_similarity(mut self, similarity: Arc<dyn TitleSimilarity>) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn bonus_for(&self, hostname: &str) -> f64 {
        if self.hosts.is_trusted(hostname) {
            self.trusted_bonus
        } else {
            1.0
        }
    }

    pub fn score(&self, query: &str, candidate_title: &str, hostname: &str) -> f64 {
        let a = normalize(query);
        let b = normalize(candidate_title);
        self.similarity.similarity(&a, &b) * length_ratio(&a, &b) * self.bonus_for(hostname)
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(HostLists::default(), crate::config::sections::DEFAULT_TRUSTED_BONUS)
    }
}
