// tests/selector_fold.rs
// Best-candidate selection across variants, driven by a scripted feed and
// fixed similarity values so scores are exact.

use async_trait::async_trait;
use chrono::Utc;
use headline_matcher::{
    Candidate, FeedError, FeedSearch, MatchSelector, MatcherConfig, SearchParams,
    SearchRequest, TitleSimilarity,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const QUERY: &str = "Acme Corp announces $50M contract with Navy";
const QUOTED: &str = "\"Acme Corp announces $50M contract with Navy\"";

// Same length as QUERY, distinct text, all keywords present.
const TITLE_X: &str = "Acme Corp announces $50M contract with NAVY";
const TITLE_Y: &str = "ACME Corp announces $50M contract with Navy";

/// Per-query scripted responses; `None` means the search fails.
#[derive(Default)]
struct ScriptedFeed {
    responses: HashMap<String, Option<Vec<Candidate>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFeed {
    fn on(mut self, query: &str, titles: &[&str]) -> Self {
        let items = titles.iter().map(|t| cand(t)).collect();
        self.responses.insert(query.to_string(), Some(items));
        self
    }

    fn failing(mut self, query: &str) -> Self {
        self.responses.insert(query.to_string(), None);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedSearch for ScriptedFeed {
    async fn search_once(&self, req: &SearchRequest<'_>) -> Result<Vec<Candidate>, FeedError> {
        self.calls.lock().unwrap().push(req.query.to_string());
        match self.responses.get(req.query) {
            Some(Some(items)) => Ok(items.clone()),
            Some(None) => Err(FeedError::Status { status: 503 }),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &'static str {
        "Scripted"
    }
}

fn cand(title: &str) -> Candidate {
    Candidate {
        title: title.to_string(),
        link: format!("https://example.com/{}", title.len()),
        published_at: Utc::now(),
        source_name: Some("Example".into()),
        source_url: Some("https://example.com".into()),
    }
}

/// Similarity looked up by candidate title.
struct TitleTable(HashMap<&'static str, f64>);

impl TitleSimilarity for TitleTable {
    fn similarity(&self, _query: &str, title: &str) -> f64 {
        self.0.get(title).copied().unwrap_or(0.0)
    }
}

fn table(pairs: &[(&'static str, f64)]) -> Arc<TitleTable> {
    Arc::new(TitleTable(pairs.iter().copied().collect()))
}

fn selector(feed: Arc<ScriptedFeed>, cfg: &MatcherConfig, sims: Arc<TitleTable>) -> MatchSelector {
    MatchSelector::new(feed, cfg).with_similarity(sims)
}

async fn lookup(sel: &MatchSelector) -> Option<headline_matcher::Match> {
    sel.find_recent_article(QUERY, &SearchParams::default()).await
}

#[tokio::test]
async fn best_score_wins_not_first_found() {
    let feed = Arc::new(
        ScriptedFeed::default()
            .on(QUERY, &[TITLE_X])
            .on(QUOTED, &[TITLE_Y]),
    );
    let sel = selector(
        feed.clone(),
        &MatcherConfig::default(),
        table(&[(TITLE_X, 0.55), (TITLE_Y, 0.72)]),
    );

    let m = lookup(&sel).await.expect("0.72 candidate should win");
    assert_eq!(m.candidate.title, TITLE_Y);
    assert!((m.score - 0.72).abs() < 1e-12);
    assert_eq!(m.variant, QUOTED);
    assert_eq!(feed.calls(), vec![QUERY.to_string(), QUOTED.to_string()]);
}

#[tokio::test]
async fn later_lower_score_does_not_replace_earlier_best() {
    let feed = Arc::new(
        ScriptedFeed::default()
            .on(QUERY, &[TITLE_Y])
            .on(QUOTED, &[TITLE_X]),
    );
    let sel = selector(
        feed,
        &MatcherConfig::default(),
        table(&[(TITLE_X, 0.65), (TITLE_Y, 0.72)]),
    );

    let m = lookup(&sel).await.unwrap();
    assert_eq!(m.candidate.title, TITLE_Y);
    assert_eq!(m.variant, QUERY);
}

#[tokio::test]
async fn all_candidates_in_one_variant_are_considered() {
    let feed = Arc::new(ScriptedFeed::default().on(QUERY, &[TITLE_X, TITLE_Y]));
    let sel = selector(
        feed,
        &MatcherConfig::default(),
        table(&[(TITLE_X, 0.61), (TITLE_Y, 0.93)]),
    );
    assert_eq!(lookup(&sel).await.unwrap().candidate.title, TITLE_Y);
}

#[tokio::test]
async fn threshold_is_inclusive() {
    let feed = Arc::new(ScriptedFeed::default().on(QUERY, &[TITLE_X]));
    let sel = selector(feed, &MatcherConfig::default(), table(&[(TITLE_X, 0.60)]));
    let m = lookup(&sel).await.expect("exactly 0.60 is accepted");
    assert!((m.score - 0.60).abs() < 1e-12);

    let feed = Arc::new(ScriptedFeed::default().on(QUERY, &[TITLE_X]));
    let sel = selector(feed, &MatcherConfig::default(), table(&[(TITLE_X, 0.59)]));
    assert!(lookup(&sel).await.is_none());
}

#[tokio::test]
async fn configured_threshold_is_honoured() {
    let mut cfg = MatcherConfig::default();
    cfg.policy.score_threshold = 0.80;
    let feed = Arc::new(ScriptedFeed::default().on(QUERY, &[TITLE_X]));
    let sel = selector(feed, &cfg, table(&[(TITLE_X, 0.72)]));
    assert!(lookup(&sel).await.is_none());
}

#[tokio::test]
async fn failed_variant_is_skipped() {
    let feed = Arc::new(
        ScriptedFeed::default()
            .failing(QUERY)
            .on(QUOTED, &[TITLE_Y]),
    );
    let sel = selector(feed.clone(), &MatcherConfig::default(), table(&[(TITLE_Y, 0.72)]));

    let m = lookup(&sel).await.expect("second variant still matches");
    assert_eq!(m.variant, QUOTED);
    assert_eq!(feed.calls().len(), 2);
}

#[tokio::test]
async fn every_variant_failing_is_no_match() {
    let feed = Arc::new(ScriptedFeed::default().failing(QUERY).failing(QUOTED));
    let sel = selector(feed.clone(), &MatcherConfig::default(), table(&[]));
    assert!(lookup(&sel).await.is_none());
    assert_eq!(feed.calls().len(), 2);
}

#[tokio::test]
async fn early_accept_stops_remaining_variants() {
    let mut cfg = MatcherConfig::default();
    cfg.policy.early_accept_score = Some(0.70);
    let feed = Arc::new(
        ScriptedFeed::default()
            .on(QUERY, &[TITLE_X])
            .on(QUOTED, &[TITLE_Y]),
    );
    let sel = selector(feed.clone(), &cfg, table(&[(TITLE_X, 0.72), (TITLE_Y, 0.95)]));

    let m = lookup(&sel).await.unwrap();
    assert_eq!(m.candidate.title, TITLE_X);
    assert_eq!(feed.calls(), vec![QUERY.to_string()]);
}

#[tokio::test]
async fn spent_budget_still_runs_first_variant() {
    let mut cfg = MatcherConfig::default();
    cfg.policy.lookup_budget_secs = Some(0);
    let feed = Arc::new(
        ScriptedFeed::default()
            .on(QUERY, &[TITLE_X])
            .on(QUOTED, &[TITLE_Y]),
    );
    let sel = selector(feed.clone(), &cfg, table(&[(TITLE_X, 0.65), (TITLE_Y, 0.95)]));

    let m = lookup(&sel).await.unwrap();
    assert_eq!(m.candidate.title, TITLE_X);
    assert_eq!(feed.calls().len(), 1);
}

#[tokio::test]
async fn short_variant_results_are_gated_on_headline_keywords() {
    // The before-colon variant has only three keywords of its own, but the
    // candidate it surfaces shares seven of the headline's nine.
    const HEADLINE: &str = "Earnings Preview Acme: Beta Labs wins FDA approval for drug";
    const SIDE: &str = "Earnings Preview Acme";
    const FOUND: &str = "Acme unit Beta Labs wins FDA approval for new drug";

    let feed = Arc::new(ScriptedFeed::default().on(SIDE, &[FOUND]));
    let sel = selector(feed.clone(), &MatcherConfig::default(), table(&[(FOUND, 0.95)]));

    let m = sel
        .find_recent_article(HEADLINE, &SearchParams::default())
        .await
        .expect("candidate from the short variant should match");
    assert_eq!(m.candidate.title, FOUND);
    assert_eq!(m.variant, SIDE);
    assert!(feed.calls().iter().any(|q| q == SIDE));
}

#[tokio::test]
async fn candidate_missing_headline_keywords_is_dropped() {
    const HEADLINE: &str = "Earnings Preview Acme: Beta Labs wins FDA approval for drug";
    const SIDE: &str = "Earnings Preview Acme";
    // shares only "acme", "earnings", "preview" with the headline
    const WEAK: &str = "Acme earnings preview: what analysts expect this quarter";

    let feed = Arc::new(ScriptedFeed::default().on(SIDE, &[WEAK]));
    let sel = selector(feed, &MatcherConfig::default(), table(&[(WEAK, 0.99)]));

    assert!(sel
        .find_recent_article(HEADLINE, &SearchParams::default())
        .await
        .is_none());
}
