// src/freshness.rs
//! Recency-window helpers.

use chrono::{DateTime, Utc};

/// Minutes elapsed between `published` and `now` (negative for future timestamps).
pub fn minutes_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - published).num_milliseconds() as f64 / 60_000.0
}

/// True if `published` lies within `window_min` minutes before `now`.
/// Timestamps slightly in the future (feed clock skew) count as fresh.
pub fn is_fresh(published: DateTime<Utc>, window_min: u32, now: DateTime<Utc>) -> bool {
    minutes_ago(published, now) <= f64::from(window_min)
}
