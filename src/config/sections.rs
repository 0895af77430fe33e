// src/config/sections.rs
//! Config sections. Every field defaults to the built-in tables, so an empty
//! file (or no file at all) yields a working matcher.

use serde::Deserialize;
use std::collections::BTreeSet;

use crate::normalize::{host_and_path, hostname_of};

pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.60;
pub const DEFAULT_TRUSTED_BONUS: f64 = 1.05;
pub const DEFAULT_MIN_VARIANT_CHARS: usize = 15;
pub const DEFAULT_MIN_VARIANT_WORDS: usize = 3;
pub const DEFAULT_FEED_BASE_URL: &str = "https://news.google.com/rss/search";
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_USER_AGENT: &str = "headline-matcher/0.1 (+rss search)";

/// Acceptance policy of the match selector.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchPolicy {
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,
    #[serde(default = "default_trusted_bonus")]
    pub trusted_bonus: f64,
    /// Stop trying further variants once the best score reaches this value.
    #[serde(default)]
    pub early_accept_score: Option<f64>,
    /// Stop starting new variants after this many seconds of lookup time.
    #[serde(default)]
    pub lookup_budget_secs: Option<u64>,
}

fn default_score_threshold() -> f64 {
    DEFAULT_SCORE_THRESHOLD
}
fn default_trusted_bonus() -> f64 {
    DEFAULT_TRUSTED_BONUS
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            trusted_bonus: DEFAULT_TRUSTED_BONUS,
            early_accept_score: None,
            lookup_budget_secs: None,
        }
    }
}

/// Stop-words dropped by the keyword extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordRules {
    #[serde(default = "default_stopwords")]
    pub stopwords: BTreeSet<String>,
}

impl Default for KeywordRules {
    fn default() -> Self {
        Self {
            stopwords: default_stopwords(),
        }
    }
}

impl KeywordRules {
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }
}

fn default_stopwords() -> BTreeSet<String> {
    [
        "the", "a", "an", "and", "or", "of", "for", "on", "in", "to", "from", "with", "by", "at",
        "as", "is", "are", "short", "report", "breaking", "update", "news", "latest", "today",
        "stocks", "market", "hot", "fly",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Post-filter applied to generated query variants.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantRules {
    #[serde(default = "default_min_variant_chars")]
    pub min_chars: usize,
    #[serde(default = "default_min_variant_words")]
    pub min_words: usize,
    /// Phrases too generic to be worth a search request.
    #[serde(default = "default_generic_phrases")]
    pub generic_phrases: BTreeSet<String>,
}

fn default_min_variant_chars() -> usize {
    DEFAULT_MIN_VARIANT_CHARS
}
fn default_min_variant_words() -> usize {
    DEFAULT_MIN_VARIANT_WORDS
}
fn default_generic_phrases() -> BTreeSet<String> {
    ["short report", "report", "breaking news", "breaking"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for VariantRules {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_VARIANT_CHARS,
            min_words: DEFAULT_MIN_VARIANT_WORDS,
            generic_phrases: default_generic_phrases(),
        }
    }
}

/// Publisher allowlist (similarity bonus) and source blocklist (hard drop).
#[derive(Debug, Clone, Deserialize)]
pub struct HostLists {
    #[serde(default = "default_trusted_hosts")]
    pub trusted: BTreeSet<String>,
    #[serde(default = "default_blocked_hosts")]
    pub blocked: BTreeSet<String>,
}

fn default_trusted_hosts() -> BTreeSet<String> {
    [
        "reuters.com",
        "bloomberg.com",
        "cnbc.com",
        "finance.yahoo.com",
        "seekingalpha.com",
        "wsj.com",
        "marketwatch.com",
        "thestreet.com",
        "investors.com",
        "fool.com",
        "apnews.com",
        "prnewswire.com",
        "businesswire.com",
        "globenewswire.com",
        "thefly.com",
        "barrons.com",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_blocked_hosts() -> BTreeSet<String> {
    ["news.stocktradersdaily.com", "seekingalpha.com/instablog"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for HostLists {
    fn default() -> Self {
        Self {
            trusted: default_trusted_hosts(),
            blocked: default_blocked_hosts(),
        }
    }
}

impl HostLists {
    /// Exact host or any subdomain of an allowlisted host.
    pub fn is_trusted(&self, host: &str) -> bool {
        if host.is_empty() {
            return false;
        }
        self.trusted
            .iter()
            .any(|t| host == t || host.strip_suffix(t.as_str()).is_some_and(|p| p.ends_with('.')))
    }

    /// Entries with a `/` match as a prefix of `host/path`; others match the host exactly.
    pub fn is_blocked(&self, url: &str) -> bool {
        let host = hostname_of(url);
        if host.is_empty() {
            return false;
        }
        let full = host_and_path(url);
        self.blocked.iter().any(|b| {
            if b.contains('/') {
                full == *b || full.starts_with(&format!("{b}/"))
            } else {
                host == *b
            }
        })
    }
}

/// HTTP settings of the search feed client.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_base_url")]
    pub base_url: String,
    #[serde(default = "default_feed_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_feed_base_url() -> String {
    DEFAULT_FEED_BASE_URL.to_string()
}
fn default_feed_timeout_secs() -> u64 {
    DEFAULT_FEED_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_feed_base_url(),
            timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}
