// src/config/mod.rs
//! Matcher configuration: word lists, host lists, acceptance policy and feed
//! client settings. Loaded from TOML or JSON, with env overrides.

pub mod sections;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub use sections::{FeedConfig, HostLists, KeywordRules, MatchPolicy, VariantRules};

pub const DEFAULT_MATCHER_CONFIG_PATH: &str = "config/matcher.toml";
pub const FALLBACK_MATCHER_CONFIG_JSON_PATH: &str = "config/matcher.json";

pub const ENV_MATCHER_CONFIG_PATH: &str = "MATCHER_CONFIG_PATH";
pub const ENV_MATCHER_SCORE_THRESHOLD: &str = "MATCHER_SCORE_THRESHOLD";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub policy: MatchPolicy,
    #[serde(default)]
    pub keywords: KeywordRules,
    #[serde(default)]
    pub variants: VariantRules,
    #[serde(default)]
    pub hosts: HostLists,
    #[serde(default)]
    pub feed: FeedConfig,
}

impl MatcherConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: MatcherConfig = toml::from_str(s).context("parsing matcher toml")?;
        Ok(cfg.sanitized())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: MatcherConfig = serde_json::from_str(s).context("parsing matcher json")?;
        Ok(cfg.sanitized())
    }

    /// Load from an explicit path; the extension picks the format (TOML unless `.json`).
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading matcher config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if ext == "json" {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Load using env var + fallbacks, then apply env overrides:
    /// 1) $MATCHER_CONFIG_PATH
    /// 2) config/matcher.toml
    /// 3) config/matcher.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_MATCHER_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!(
                    "{ENV_MATCHER_CONFIG_PATH} points to non-existent path {}",
                    pb.display()
                ));
            }
            Self::load_from(&pb)?
        } else if Path::new(DEFAULT_MATCHER_CONFIG_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_MATCHER_CONFIG_PATH))?
        } else if Path::new(FALLBACK_MATCHER_CONFIG_JSON_PATH).exists() {
            Self::load_from(Path::new(FALLBACK_MATCHER_CONFIG_JSON_PATH))?
        } else {
            Self::default()
        };

        if let Some(t) = parse_threshold_env(std::env::var(ENV_MATCHER_SCORE_THRESHOLD).ok()) {
            cfg.policy.score_threshold = t;
        }
        Ok(cfg)
    }

    /// Clean list entries and replace nonsensical numbers with defaults.
    fn sanitized(mut self) -> Self {
        self.keywords.stopwords = clean_set(self.keywords.stopwords);
        self.variants.generic_phrases = clean_set(self.variants.generic_phrases);
        self.hosts.trusted = clean_hosts(self.hosts.trusted);
        self.hosts.blocked = clean_hosts(self.hosts.blocked);

        let p = &mut self.policy;
        if !p.score_threshold.is_finite() {
            p.score_threshold = sections::DEFAULT_SCORE_THRESHOLD;
        }
        p.score_threshold = p.score_threshold.clamp(0.0, 1.0);
        if !p.trusted_bonus.is_finite() || p.trusted_bonus < 1.0 {
            p.trusted_bonus = sections::DEFAULT_TRUSTED_BONUS;
        }
        if p.early_accept_score.is_some_and(|s| !s.is_finite()) {
            p.early_accept_score = None;
        }
        if self.feed.timeout_secs == 0 {
            self.feed.timeout_secs = sections::DEFAULT_FEED_TIMEOUT_SECS;
        }
        self
    }
}

// parse optional float env and clamp to <0.0..=1.0>
fn parse_threshold_env(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

fn clean_set(items: BTreeSet<String>) -> BTreeSet<String> {
    items
        .into_iter()
        .map(|it| it.trim().to_lowercase())
        .filter(|it| !it.is_empty())
        .collect()
}

fn clean_hosts(items: BTreeSet<String>) -> BTreeSet<String> {
    clean_set(items)
        .into_iter()
        .map(|h| h.strip_prefix("www.").unwrap_or(&h).trim_end_matches('/').to_string())
        .filter(|h| !h.is_empty())
        .collect()
}
