// src/selector.rs
//! Match selector: tries every query variant against the feed and keeps the
//! single best candidate across all of them.
//!
//! Per variant: search → filter (gate on the headline's keywords) → score
//! (original headline vs candidate title) → fold into the running best.
//! A candidate only becomes best if it
//! 1. scores strictly higher than the current best,
//! 2. scores at or above the acceptance threshold,
//! 3. passes the keyword gate again against the *original* headline's keywords.
//!
//! A failed search contributes no candidates; the lookup carries on with the
//! next variant. "No match" is a normal outcome, never an error.

use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{KeywordRules, MatchPolicy, MatcherConfig, VariantRules};
use crate::feed::{Candidate, FeedSearch, SearchParams, SearchRequest};
use crate::filter::CandidateFilter;
use crate::headline::{Headline, Resolution};
use crate::keywords::{extract_keywords, passes_keyword_gate};
use crate::scoring::{SimilarityScorer, TitleSimilarity};
use crate::telemetry::{anon_hash, ensure_metrics_described};
use crate::variants::variants_for_query;

/// A candidate with its score and the variant whose search surfaced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
    pub variant: String,
}

/// The accepted candidate of a lookup. Only the selector builds one, so a
/// `Match` always met the threshold and the original-keyword gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Match(pub ScoredCandidate);

impl std::ops::Deref for Match {
    type Target = ScoredCandidate;

    fn deref(&self) -> &ScoredCandidate {
        &self.0
    }
}

impl Match {
    pub fn into_inner(self) -> ScoredCandidate {
        self.0
    }
}

/// One fold step: `next` replaces `best` only if it is strictly better,
/// clears `threshold` and shares enough of the original `required` keywords.
pub fn consider(
    best: Option<ScoredCandidate>,
    next: ScoredCandidate,
    threshold: f64,
    required: &BTreeSet<String>,
) -> Option<ScoredCandidate> {
    let higher = best.as_ref().map_or(true, |b| next.score > b.score);
    if higher && next.score >= threshold && passes_keyword_gate(&next.candidate.title, required) {
        Some(next)
    } else {
        best
    }
}

pub struct MatchSelector {
    feed: Arc<dyn FeedSearch>,
    policy: MatchPolicy,
    keyword_rules: KeywordRules,
    variant_rules: VariantRules,
    filter: CandidateFilter,
    scorer: SimilarityScorer,
}

impl MatchSelector {
    pub fn new(feed: Arc<dyn FeedSearch>, cfg: &MatcherConfig) -> Self {
        Self {
            feed,
            policy: cfg.policy.clone(),
            keyword_rules: cfg.keywords.clone(),
            variant_rules: cfg.variants.clone(),
            filter: CandidateFilter::new(cfg.hosts.clone()),
            scorer: SimilarityScorer::new(cfg.hosts.clone(), cfg.policy.trusted_bonus),
        }
    }

    /// Replace the base similarity primitive used by the scorer.
    pub fn with_similarity(mut self, similarity: Arc<dyn TitleSimilarity>) -> Self {
        self.scorer = self.scorer.with_similarity(similarity);
        self
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Best recent article for `query`, anchored at the current time.
    pub async fn find_recent_article(&self, query: &str, params: &SearchParams) -> Option<Match> {
        self.find_recent_article_at(query, params, Utc::now()).await
    }

    /// Same as [`Self::find_recent_article`] with an explicit lookup instant.
    pub async fn find_recent_article_at(
        &self,
        query: &str,
        params: &SearchParams,
        now: DateTime<Utc>,
    ) -> Option<Match> {
        ensure_metrics_described();
        counter!("matcher_lookups_total").increment(1);

        let query_id = anon_hash(query);
        let variants = variants_for_query(query, &self.variant_rules);
        let required = extract_keywords(query, &self.keyword_rules);
        if variants.is_empty() {
            debug!(target: "matcher", %query_id, "no searchable variants");
            return None;
        }

        let started = Instant::now();
        let budget = self.policy.lookup_budget_secs.map(Duration::from_secs);
        let mut best: Option<ScoredCandidate> = None;
        let mut tried = 0usize;

        for (idx, variant) in variants.iter().enumerate() {
            if budget.is_some_and(|b| idx > 0 && started.elapsed() >= b) {
                debug!(target: "matcher", %query_id, tried, "lookup budget spent");
                break;
            }
            tried += 1;

            let req = SearchRequest {
                query: variant,
                params,
                now,
            };
            let candidates = match self.feed.search_once(&req).await {
                Ok(c) => c,
                Err(e) => {
                    warn!(
                        target: "matcher",
                        %query_id,
                        variant = idx,
                        feed = self.feed.name(),
                        error = %e,
                        "variant search failed; skipping"
                    );
                    counter!("matcher_variant_errors_total").increment(1);
                    continue;
                }
            };
            if candidates.is_empty() {
                continue;
            }

            let scored = self
                .filter
                .filter(candidates, &required)
                .into_iter()
                .map(|c| ScoredCandidate {
                    score: self.scorer.score(query, &c.title, &c.hostname()),
                    candidate: c,
                    variant: variant.clone(),
                });

            best = scored.fold(best, |acc, next| {
                consider(acc, next, self.policy.score_threshold, &required)
            });

            debug!(
                target: "matcher",
                %query_id,
                variant = idx,
                best_score = ?best.as_ref().map(|b| b.score),
                "variant done"
            );

            if let (Some(b), Some(early)) = (&best, self.policy.early_accept_score) {
                if b.score >= early {
                    debug!(target: "matcher", %query_id, score = b.score, "early accept");
                    break;
                }
            }
        }

        match &best {
            Some(b) => {
                counter!("matcher_matches_total").increment(1);
                info!(
                    target: "matcher",
                    %query_id,
                    tried,
                    score = b.score,
                    host = %b.candidate.hostname(),
                    "match found"
                );
            }
            None => info!(target: "matcher", %query_id, tried, "no match"),
        }
        best.map(Match)
    }

    /// Look up a headline record and decide which link/title the caller
    /// should hand to article extraction. `window_min` overrides the window
    /// in `params` when the headline source supplies one.
    pub async fn resolve(
        &self,
        headline: &Headline,
        params: &SearchParams,
        window_min: Option<u32>,
    ) -> Resolution {
        let params = match window_min {
            Some(w) => params.clone().with_window(w),
            None => params.clone(),
        };
        let found = self.find_recent_article(&headline.title, &params).await;
        Resolution::from_lookup(headline, found)
    }
}
