//! headline-matcher — one-shot driver.
//! Looks up the headline given on the command line and prints the resolution as JSON.
//!
//! Usage: `headline-matcher <headline words...>`
//! Env: MATCHER_CONFIG_PATH, MATCHER_SCORE_THRESHOLD, SEARCH_WINDOW_MIN, SEARCH_LANG,
//! SEARCH_REGION, HEADLINE_LINK, RUST_LOG.

use anyhow::{bail, Context, Result};
use headline_matcher::{GoogleNewsFeed, Headline, MatchSelector, MatcherConfig, SearchParams};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("headline_matcher=info,matcher=info,feed=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn search_params_from_env() -> Result<SearchParams> {
    let mut params = SearchParams::default();
    if let Ok(w) = std::env::var("SEARCH_WINDOW_MIN") {
        params.window_min = w
            .trim()
            .parse()
            .with_context(|| format!("SEARCH_WINDOW_MIN must be whole minutes, got {w:?}"))?;
    }
    if let Ok(lang) = std::env::var("SEARCH_LANG") {
        params.lang = lang;
    }
    if let Ok(region) = std::env::var("SEARCH_REGION") {
        params.region = region;
    }
    Ok(params)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let title = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if title.trim().is_empty() {
        bail!("usage: headline-matcher <headline>");
    }

    let cfg = MatcherConfig::load_default().context("loading matcher config")?;
    let params = search_params_from_env()?;
    let feed = GoogleNewsFeed::from_config(&cfg.feed).context("building feed client")?;
    let selector = MatchSelector::new(Arc::new(feed), &cfg);

    let headline = Headline::new(title, std::env::var("HEADLINE_LINK").unwrap_or_default());
    let resolution = selector.resolve(&headline, &params, None).await;

    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}
