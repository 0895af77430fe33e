// src/feed/mod.rs
//! Search-feed boundary: request/record types, the [`FeedSearch`] trait and
//! the RSS-backed implementation.

pub mod google_news;
pub mod types;

pub use google_news::{parse_candidates, GoogleNewsFeed};
pub use types::{Candidate, FeedSearch, SearchParams, SearchRequest};
