// src/keywords.rs
//! Keyword extraction and the keyword-overlap gate.
//!
//! Short function words pollute overlap ratios, so tokens under 4 characters
//! are dropped unless they look like a ticker (`AAPL`, `$TSLA`) in the
//! original casing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::config::KeywordRules;
use crate::normalize::{normalize, normalize_lower};

static TICKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?[A-Z]{1,5}$").expect("ticker regex"));

const MIN_KEYWORD_LEN: usize = 4;

/// True for tokens shaped like a ticker symbol in their original case.
pub fn is_ticker_like(token: &str) -> bool {
    TICKER_RE.is_match(token)
}

/// Derive the discriminating lowercase terms of a headline.
pub fn extract_keywords(title: &str, rules: &KeywordRules) -> BTreeSet<String> {
    let scrubbed: String = normalize(title)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '$' | '.' | '-') {
                c
            } else {
                ' '
            }
        })
        .collect();

    scrubbed
        .split_whitespace()
        .filter_map(|token| {
            let lower = token.to_ascii_lowercase();
            if rules.is_stopword(&lower) {
                return None;
            }
            (lower.chars().count() >= MIN_KEYWORD_LEN || is_ticker_like(token)).then_some(lower)
        })
        .collect()
}

/// Minimum keyword hits a title needs: every keyword for short sets,
/// otherwise 60% rounded up but never fewer than two.
pub fn required_hits(keyword_count: usize) -> usize {
    if keyword_count <= 2 {
        keyword_count
    } else {
        // ceil(0.6 * n) without float rounding
        (keyword_count * 3).div_ceil(5).max(2)
    }
}

/// Number of keywords found as substrings of the normalized, lowercased title.
pub fn keyword_hits(title: &str, keywords: &BTreeSet<String>) -> usize {
    let t = normalize_lower(title);
    keywords.iter().filter(|k| t.contains(k.as_str())).count()
}

/// Keyword gate. An empty keyword set admits everything.
pub fn passes_keyword_gate(title: &str, keywords: &BTreeSet<String>) -> bool {
    keyword_hits(title, keywords) >= required_hits(keywords.len())
}
