// src/feed/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::normalize::hostname_of;

pub const DEFAULT_WINDOW_MIN: u32 = 60;
pub const DEFAULT_LANG: &str = "en-US";
pub const DEFAULT_REGION: &str = "US";

/// One search-feed result. Produced by a [`FeedSearch`] and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
    /// Publisher label, e.g. "Reuters"
    pub source_name: Option<String>,
    /// Publisher site the feed attributes the item to
    pub source_url: Option<String>,
}

impl Candidate {
    /// Publisher hostname: the attributed source site when present, else the link host.
    pub fn hostname(&self) -> String {
        self.source_url
            .as_deref()
            .map(hostname_of)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| hostname_of(&self.link))
    }
}

/// Per-call search scope. Passed explicitly by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Recency window in minutes
    pub window_min: u32,
    /// UI language, e.g. "en-US"
    pub lang: String,
    /// Result country, e.g. "US"
    pub region: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            window_min: DEFAULT_WINDOW_MIN,
            lang: DEFAULT_LANG.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl SearchParams {
    pub fn with_window(mut self, window_min: u32) -> Self {
        self.window_min = window_min;
        self
    }

    /// Combined channel id, `<region>:<lang>`.
    pub fn channel_id(&self) -> String {
        format!("{}:{}", self.region, self.lang)
    }
}

/// One text query for one variant, anchored at the lookup instant.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub params: &'a SearchParams,
    pub now: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait FeedSearch: Send + Sync {
    /// Fresh, complete candidates for `req.query`. Empty when the feed has no items.
    async fn search_once(&self, req: &SearchRequest<'_>) -> Result<Vec<Candidate>, FeedError>;
    fn name(&self) -> &'static str;
}
