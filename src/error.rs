// src/error.rs
//! Errors raised at the search-feed boundary.

use thiserror::Error;

/// A single feed request failed. The selector treats this as zero candidates
/// for the variant that issued it.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Connect/timeout/body-read failure
    #[error("feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("feed returned HTTP {status}")]
    Status { status: u16 },
}
