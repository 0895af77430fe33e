// src/feed/google_news.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;
use std::time::Duration;
use time::{format_description::well_known::Rfc2822, OffsetDateTime};

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::feed::types::{Candidate, FeedSearch, SearchRequest};
use crate::freshness::is_fresh;
use crate::telemetry::{anon_hash, ensure_metrics_described};

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source: Option<ItemSource>,
}

#[derive(Debug, Deserialize)]
struct ItemSource {
    #[serde(rename = "@url", default)]
    url: Option<String>,
    #[serde(rename = "$text", default)]
    name: Option<String>,
}

/// RFC-2822 timestamp to UTC. `time` handles the common forms; chrono's
/// parser is the fallback for legacy zone names.
pub(crate) fn parse_pub_date(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    OffsetDateTime::parse(ts, &Rfc2822)
        .ok()
        .and_then(|dt| DateTime::from_timestamp(dt.unix_timestamp(), dt.nanosecond()))
        .or_else(|| {
            DateTime::parse_from_rfc2822(ts)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

/// Drop the " - Publisher" suffix the feed appends to every title.
fn strip_source_suffix(title: &str, source_name: Option<&str>) -> String {
    let title = title.trim();
    if let Some(name) = source_name.map(str::trim).filter(|n| !n.is_empty()) {
        if let Some(head) = title.strip_suffix(name) {
            let head = head.trim_end();
            if let Some(head) = head.strip_suffix(['-', '|']) {
                let head = head.trim_end();
                if !head.is_empty() {
                    return head.to_string();
                }
            }
        }
    }
    title.to_string()
}

fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}

fn parse_rss(xml: &str) -> Result<Vec<Item>> {
    let xml_clean = scrub_html_entities_for_xml(xml);
    let rss: Rss = from_str(&xml_clean).context("parsing search feed rss xml")?;
    Ok(rss.channel.item)
}

/// Parse a feed body into complete, fresh candidates.
///
/// A body that is not valid RSS yields no candidates; it is logged and
/// counted, never raised.
pub fn parse_candidates(xml: &str, window_min: u32, now: DateTime<Utc>) -> Vec<Candidate> {
    ensure_metrics_described();

    let items = match parse_rss(xml) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(target: "feed", error = ?e, "unparsable feed body; treating as empty");
            counter!("matcher_feed_parse_errors_total").increment(1);
            return Vec::new();
        }
    };

    let total = items.len();
    let mut out = Vec::with_capacity(total);
    for it in items {
        let (source_name, source_url) = match it.source {
            Some(s) => (
                s.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
                s.url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()),
            ),
            None => (None, None),
        };

        let title = it
            .title
            .as_deref()
            .map(|t| html_escape::decode_html_entities(t).to_string())
            .map(|t| strip_source_suffix(&t, source_name.as_deref()))
            .unwrap_or_default();
        let link = it.link.as_deref().map(str::trim).unwrap_or_default();
        let published_at = it.pub_date.as_deref().and_then(parse_pub_date);

        let Some(published_at) = published_at else {
            continue;
        };
        if title.is_empty() || link.is_empty() || !is_fresh(published_at, window_min, now) {
            continue;
        }

        out.push(Candidate {
            title,
            link: link.to_string(),
            published_at,
            source_name,
            source_url,
        });
    }

    counter!("matcher_feed_items_total").increment(out.len() as u64);
    counter!("matcher_feed_stale_total").increment((total - out.len()) as u64);
    out
}

/// Recency-ordered news search over RSS.
///
/// `Http` queries the live endpoint; `Fixture` serves a fixed body for every
/// query (tests, offline runs).
pub struct GoogleNewsFeed {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http {
        client: reqwest::Client,
        base_url: String,
    },
}

impl GoogleNewsFeed {
    pub fn from_config(cfg: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .connect_timeout(Duration::from_secs(cfg.timeout_secs.min(5)))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            mode: Mode::Http {
                client,
                base_url: cfg.base_url.clone(),
            },
        })
    }

    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    async fn fetch_body(
        client: &reqwest::Client,
        base_url: &str,
        req: &SearchRequest<'_>,
    ) -> Result<String, FeedError> {
        let ceid = req.params.channel_id();
        let resp = client
            .get(base_url)
            .query(&[
                ("q", req.query),
                ("hl", req.params.lang.as_str()),
                ("gl", req.params.region.as_str()),
                ("ceid", ceid.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }
}

#[async_trait]
impl FeedSearch for GoogleNewsFeed {
    async fn search_once(&self, req: &SearchRequest<'_>) -> Result<Vec<Candidate>, FeedError> {
        ensure_metrics_described();
        counter!("matcher_feed_requests_total").increment(1);

        let body = match &self.mode {
            Mode::Fixture(s) => s.clone(),
            Mode::Http { client, base_url } => {
                let t0 = std::time::Instant::now();
                let res = Self::fetch_body(client, base_url, req).await;
                histogram!("matcher_feed_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
                match res {
                    Ok(body) => body,
                    Err(e) => {
                        tracing::warn!(
                            target: "feed",
                            error = %e,
                            query_id = %anon_hash(req.query),
                            "search request failed"
                        );
                        counter!("matcher_feed_errors_total").increment(1);
                        return Err(e);
                    }
                }
            }
        };

        let out = parse_candidates(&body, req.params.window_min, req.now);
        tracing::debug!(
            target: "feed",
            query_id = %anon_hash(req.query),
            window_min = req.params.window_min,
            candidates = out.len(),
            "search done"
        );
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "GoogleNews"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 8, 16, 0, 0).unwrap()
    }

    fn feed(items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>"acme" - Google News</title><link>https://news.google.com</link>
{items}
</channel></rss>"#
        )
    }

    #[test]
    fn pub_date_parses_gmt_and_offsets() {
        let a = parse_pub_date("Tue, 08 Oct 2024 15:55:00 GMT").unwrap();
        assert_eq!(a, Utc.with_ymd_and_hms(2024, 10, 8, 15, 55, 0).unwrap());
        let b = parse_pub_date(" Tue, 08 Oct 2024 11:55:00 -0400 ").unwrap();
        assert_eq!(a, b);
        assert!(parse_pub_date("yesterday").is_none());
    }

    #[test]
    fn source_suffix_is_stripped_only_when_it_matches() {
        assert_eq!(
            strip_source_suffix("Acme wins deal - Reuters", Some("Reuters")),
            "Acme wins deal"
        );
        assert_eq!(
            strip_source_suffix("Acme wins deal | MarketWatch", Some("MarketWatch")),
            "Acme wins deal"
        );
        assert_eq!(
            strip_source_suffix("Acme wins deal - Reuters", Some("Bloomberg")),
            "Acme wins deal - Reuters"
        );
        assert_eq!(strip_source_suffix("Reuters", Some("Reuters")), "Reuters");
        assert_eq!(strip_source_suffix(" Acme ", None), "Acme");
    }

    #[test]
    fn parses_items_and_drops_incomplete_or_stale() {
        let xml = feed(
            r#"
<item><title>Acme wins deal - Reuters</title><link>https://news.google.com/rss/articles/a1</link>
  <pubDate>Tue, 08 Oct 2024 15:55:00 GMT</pubDate><source url="https://www.reuters.com">Reuters</source></item>
<item><title>No link here</title><pubDate>Tue, 08 Oct 2024 15:55:00 GMT</pubDate></item>
<item><title>No date here</title><link>https://example.com/b</link></item>
<item><title>Too old</title><link>https://example.com/c</link><pubDate>Tue, 08 Oct 2024 13:00:00 GMT</pubDate></item>
<item><title>AT&amp;amp;T &amp; Acme team up</title><link>https://example.com/d</link><pubDate>Tue, 08 Oct 2024 15:59:00 GMT</pubDate></item>
"#,
        );
        let out = parse_candidates(&xml, 60, now());
        assert_eq!(out.len(), 2);

        assert_eq!(out[0].title, "Acme wins deal");
        assert_eq!(out[0].source_name.as_deref(), Some("Reuters"));
        assert_eq!(out[0].source_url.as_deref(), Some("https://www.reuters.com"));
        assert_eq!(out[0].hostname(), "reuters.com");

        assert_eq!(out[1].title, "AT&T & Acme team up");
        assert_eq!(out[1].hostname(), "example.com");
        assert!(out[1].source_name.is_none());
    }

    #[test]
    fn empty_channel_and_garbage_yield_nothing() {
        assert!(parse_candidates(&feed(""), 60, now()).is_empty());
        assert!(parse_candidates("<html>not a feed", 60, now()).is_empty());
        assert!(parse_candidates("", 60, now()).is_empty());
    }

    #[tokio::test]
    async fn fixture_mode_applies_window() {
        let xml = feed(
            r#"<item><title>Acme wins deal</title><link>https://example.com/a</link><pubDate>Tue, 08 Oct 2024 15:30:00 GMT</pubDate></item>"#,
        );
        let p = GoogleNewsFeed::from_fixture_str(&xml);
        let params = crate::feed::SearchParams::default();
        let req = SearchRequest {
            query: "Acme wins deal",
            params: &params,
            now: now(),
        };
        assert_eq!(p.search_once(&req).await.unwrap().len(), 1);

        let narrow = params.clone().with_window(10);
        let req = SearchRequest {
            query: "Acme wins deal",
            params: &narrow,
            now: now(),
        };
        assert!(p.search_once(&req).await.unwrap().is_empty());
        assert_eq!(p.name(), "GoogleNews");
    }
}
