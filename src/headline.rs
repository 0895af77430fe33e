// src/headline.rs
//! Headline records as the acquisition side delivers them, and what the
//! caller should do with a lookup result.

use serde::{Deserialize, Serialize};

use crate::selector::Match;

/// A headline from the source site. Only `title` drives the lookup; the
/// other fields travel along for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    /// Link to the headline on the source site
    #[serde(alias = "titleLink")]
    pub title_link: String,
    #[serde(default, alias = "rawCategory")]
    pub raw_category: String,
    #[serde(default, deserialize_with = "de_tickers")]
    pub tickers: Vec<String>,
    /// Source-local timestamp, e.g. "2024-10-08 16:00:00"
    #[serde(default, alias = "publishDatetime")]
    pub publish_datetime: String,
}

impl Headline {
    pub fn new(title: impl Into<String>, title_link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            title_link: title_link.into(),
            raw_category: String::new(),
            tickers: Vec::new(),
            publish_datetime: String::new(),
        }
    }
}

/// Split a ticker list given as "AAPL, MSFT TSLA" into symbols.
pub fn split_tickers(s: &str) -> Vec<String> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Tickers arrive either as a JSON array or as one delimited string.
fn de_tickers<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
    }
    Ok(match Raw::deserialize(d)? {
        Raw::List(v) => v
            .into_iter()
            .flat_map(|t| split_tickers(&t))
            .collect(),
        Raw::Joined(s) => split_tickers(&s),
    })
}

/// Which article the downstream extractor should work from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Matched article link, or the headline's own link on no match
    pub link: String,
    /// Matched article title, or the headline itself on no match
    pub title: String,
    pub matched: Option<Match>,
}

impl Resolution {
    pub fn from_lookup(headline: &Headline, found: Option<Match>) -> Self {
        match found {
            Some(m) => Self {
                link: m.candidate.link.clone(),
                title: m.candidate.title.clone(),
                matched: Some(m),
            },
            None => Self {
                link: headline.title_link.clone(),
                title: headline.title.clone(),
                matched: None,
            },
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched.is_some()
    }
}
