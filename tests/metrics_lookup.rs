// tests/metrics_lookup.rs
#![cfg(feature = "strict-metrics")]
use chrono::{TimeZone, Utc};
use headline_matcher::{GoogleNewsFeed, MatchSelector, MatcherConfig, SearchParams};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;

#[tokio::test]
async fn lookup_counters_are_exposed() {
    // Install a local recorder for the test
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("recorder");

    let xml = std::fs::read_to_string("tests/fixtures/search_acme.xml").expect("fixture");
    let feed = GoogleNewsFeed::from_fixture_str(&xml);
    let sel = MatchSelector::new(Arc::new(feed), &MatcherConfig::default());
    let now = Utc.with_ymd_and_hms(2024, 10, 8, 16, 0, 0).unwrap();
    let found = sel
        .find_recent_article_at(
            "Acme Corp announces $50M contract with Navy",
            &SearchParams::default(),
            now,
        )
        .await;
    assert!(found.is_some());

    // Scrape metrics text and check series presence by substring
    let out = handle.render();
    for needle in [
        "matcher_lookups_total",
        "matcher_matches_total",
        "matcher_feed_requests_total",
        "matcher_feed_items_total",
        "matcher_feed_stale_total",
    ] {
        assert!(out.contains(needle), "missing {needle}\n{out}");
    }
}
