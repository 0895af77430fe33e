// src/normalize.rs
//! Text normalization shared by every stage of the matcher.

use url::Url;

/// Quote artifacts that headline sources and feeds wrap around titles.
const QUOTE_CHARS: [char; 7] = [
    '"', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '\u{00AB}', '\u{00BB}',
];

/// Replace quote characters with spaces, collapse whitespace, trim.
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let replaced = text.replace(QUOTE_CHARS, " ");
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized + lowercased form used for substring keyword checks.
pub fn normalize_lower(text: &str) -> String {
    normalize(text).to_lowercase()
}

/// Hostname of `url`, lowercased and without a leading `www.`.
/// Returns an empty string when the URL does not parse.
pub fn hostname_of(url: &str) -> String {
    Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
        .map(|h| h.strip_prefix("www.").unwrap_or(&h).to_string())
        .unwrap_or_default()
}

/// `host/path` form of `url` (path without trailing slash), for prefix-style blocklist entries.
pub fn host_and_path(url: &str) -> String {
    let host = hostname_of(url);
    if host.is_empty() {
        return host;
    }
    let path = Url::parse(url.trim())
        .map(|u| u.path().trim_end_matches('/').to_string())
        .unwrap_or_default();
    format!("{host}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_quotes_and_collapses_whitespace() {
        let s = "  \u{201C}Acme\u{201D}   beats \u{00BB}estimates\u{00AB}\t\n ";
        assert_eq!(normalize(s), "Acme beats estimates");
    }

    #[test]
    fn straight_quotes_become_spaces() {
        assert_eq!(normalize(r#"Acme says "no deal""#), "Acme says no deal");
    }

    #[test]
    fn idempotent_on_noisy_input() {
        let inputs = [
            "",
            "   ",
            "Fly: \u{2018}Acme\u{2019}  to buy  Beta ",
            "\u{201C}\u{201D}",
            "Already clean text",
        ];
        for s in inputs {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn hostname_strips_www_and_lowercases() {
        assert_eq!(hostname_of("https://WWW.Reuters.com/markets/x"), "reuters.com");
        assert_eq!(hostname_of("https://finance.yahoo.com/news/a"), "finance.yahoo.com");
        assert_eq!(hostname_of("not a url"), "");
    }

    #[test]
    fn host_and_path_keeps_path_prefix() {
        assert_eq!(
            host_and_path("https://www.seekingalpha.com/instablog/123/"),
            "seekingalpha.com/instablog/123"
        );
        assert_eq!(host_and_path("https://cnbc.com/"), "cnbc.com");
        assert_eq!(host_and_path(""), "");
    }
}
