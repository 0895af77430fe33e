// src/telemetry.rs
//! Metric descriptors and log-safe identifiers.

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on scrape).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "matcher_feed_requests_total",
            "Search requests sent to the feed."
        );
        describe_counter!(
            "matcher_feed_errors_total",
            "Feed requests that failed (network or HTTP status)."
        );
        describe_counter!(
            "matcher_feed_parse_errors_total",
            "Feed bodies that could not be parsed as RSS."
        );
        describe_counter!(
            "matcher_feed_items_total",
            "Complete, fresh candidates returned by the feed."
        );
        describe_counter!(
            "matcher_feed_stale_total",
            "Feed items dropped as incomplete or outside the recency window."
        );
        describe_histogram!("matcher_feed_fetch_ms", "Feed round trip in milliseconds.");
        describe_counter!("matcher_lookups_total", "Headline lookups started.");
        describe_counter!("matcher_matches_total", "Lookups that produced a match.");
        describe_counter!(
            "matcher_variant_errors_total",
            "Variants skipped because their search failed."
        );
    });
}

/// Short, stable id for a text so logs never carry the raw headline.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
