// src/variants.rs
//! Alternate search-query phrasings of one headline.
//!
//! Syndicated coverage rarely reuses the source wording, so a headline is
//! searched several ways: as given (trimmed), cleaned, split at a category colon
//! ("Category: actual subject"), as an exact phrase and as a plain
//! alphanumeric scrub. Near-empty and generic variants are dropped before
//! they cost a search request.

use crate::config::VariantRules;
use crate::normalize::normalize;

/// Ordered, deduplicated, non-empty query variants for `title`. The first
/// candidate is the title as given, trimmed of surrounding whitespace.
pub fn variants_for_query(title: &str, rules: &VariantRules) -> Vec<String> {
    let cleaned = normalize(title);
    let mut raw: Vec<String> = vec![title.trim().to_string(), cleaned.clone()];

    if let Some(idx) = cleaned.find(':') {
        if idx + 1 < cleaned.len() {
            raw.push(cleaned[idx + 1..].trim().to_string());
        }
        if idx > 0 {
            raw.push(cleaned[..idx].trim().to_string());
        }
    }

    raw.push(format!("\"{cleaned}\""));
    raw.push(scrub_alphanumeric(&cleaned));

    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for v in raw {
        if is_searchable(&v, rules) && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Letters, digits, space, `%` and `$` only; whitespace collapsed.
fn scrub_alphanumeric(s: &str) -> String {
    let kept: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '%' | '$') {
                c
            } else {
                ' '
            }
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_searchable(variant: &str, rules: &VariantRules) -> bool {
    let s = variant.trim();
    if s.is_empty() {
        return false;
    }
    let plain = s.replace('"', "").to_lowercase();
    if rules.generic_phrases.contains(plain.trim()) {
        return false;
    }
    s.chars().count() >= rules.min_chars && plain.split_whitespace().count() >= rules.min_words
}
