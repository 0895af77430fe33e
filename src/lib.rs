// src/lib.rs
//! Recent-article reconciliation: given a short market headline, find the one
//! independently published article about the same event in a recency-ordered
//! news search feed.
//!
//! ```ignore
//! let cfg = MatcherConfig::load_default()?;
//! let feed = Arc::new(GoogleNewsFeed::from_config(&cfg.feed)?);
//! let selector = MatchSelector::new(feed, &cfg);
//! let found = selector
//!     .find_recent_article("Acme Corp announces $50M contract with Navy", &SearchParams::default())
//!     .await;
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod freshness;
pub mod headline;
pub mod keywords;
pub mod normalize;
pub mod scoring;
pub mod selector;
pub mod telemetry;
pub mod variants;

// ---- Re-exports for stable public API ----
pub use crate::config::MatcherConfig;
pub use crate::error::FeedError;
pub use crate::feed::{Candidate, FeedSearch, GoogleNewsFeed, SearchParams, SearchRequest};
pub use crate::filter::CandidateFilter;
pub use crate::headline::{Headline, Resolution};
pub use crate::keywords::extract_keywords;
pub use crate::normalize::normalize;
pub use crate::scoring::{BigramDice, SimilarityScorer, TitleSimilarity};
pub use crate::selector::{Match, MatchSelector, ScoredCandidate};
pub use crate::variants::variants_for_query;
