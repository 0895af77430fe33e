// src/filter.rs
//! Candidate filter: blocked publishers out, then the keyword gate.

use std::collections::BTreeSet;

use crate::config::HostLists;
use crate::feed::Candidate;
use crate::keywords::passes_keyword_gate;

#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    hosts: HostLists,
}

impl CandidateFilter {
    pub fn new(hosts: HostLists) -> Self {
        Self { hosts }
    }

    /// Blocked if either the article link or the attributed source site is listed.
    pub fn is_blocked(&self, c: &Candidate) -> bool {
        self.hosts.is_blocked(&c.link)
            || c.source_url
                .as_deref()
                .is_some_and(|u| self.hosts.is_blocked(u))
    }

    pub fn admits(&self, c: &Candidate, keywords: &BTreeSet<String>) -> bool {
        !self.is_blocked(c) && passes_keyword_gate(&c.title, keywords)
    }

    /// Keep candidates from allowed sources that share enough keywords.
    pub fn filter(&self, candidates: Vec<Candidate>, keywords: &BTreeSet<String>) -> Vec<Candidate> {
        let before = candidates.len();
        let kept: Vec<Candidate> = candidates
            .into_iter()
            .filter(|c| self.admits(c, keywords))
            .collect();
        tracing::debug!(
            target: "matcher",
            before,
            kept = kept.len(),
            keywords = keywords.len(),
            "candidate filter"
        );
        kept
    }
}
