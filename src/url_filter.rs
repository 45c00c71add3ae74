/// URL normalization and filter matching for Sort Tabs
use regex::Regex;

use crate::error::SortError;
use crate::tab_data::is_match_all_filter;

/// Strip the scheme and a `www.` right after it
///
/// Only `http://` and `https://` are stripped, and `www.` only when it
/// directly follows one of them.
///
/// Examples:
/// - https://www.google.com/search → google.com/search
/// - http://github.com → github.com
/// - www.example.com → www.example.com
/// - ftp://example.com → ftp://example.com
pub fn normalize_url(url: &str) -> &str {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match without_scheme {
        Some(rest) => rest.strip_prefix("www.").unwrap_or(rest),
        None => url,
    }
}

/// Normalize a user supplied filter before it is compiled
///
/// Same stripping as [`normalize_url`], then one trailing literal `/.` is
/// dropped. Note this does not strip a trailing path like `/docs`, only the
/// two characters `/.`.
pub fn normalize_filter(filter: &str) -> String {
    let normalized = normalize_url(filter);
    normalized
        .strip_suffix("/.")
        .unwrap_or(normalized)
        .to_string()
}

/// A compiled `urlPart` filter
#[derive(Debug, Clone)]
pub enum UrlFilter {
    All,
    Pattern(Regex),
}

impl UrlFilter {
    /// Compile a raw filter; empty or `" "` matches every tab
    pub fn compile(filter: &str) -> Result<UrlFilter, SortError> {
        if is_match_all_filter(filter) {
            return Ok(UrlFilter::All);
        }

        let pattern = normalize_filter(filter);
        Regex::new(&pattern)
            .map(UrlFilter::Pattern)
            .map_err(|source| {
                log::warn!("Rejected url filter {:?}: {}", filter, source);
                SortError::InvalidPattern { pattern, source }
            })
    }

    /// Test a raw tab URL against the filter
    pub fn matches(&self, url: &str) -> bool {
        match self {
            UrlFilter::All => true,
            UrlFilter::Pattern(regex) => regex.is_match(normalize_url(url)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_schemes() {
        assert_eq!(normalize_url("https://www.google.com"), "google.com");
        assert_eq!(normalize_url("https://google.com"), "google.com");
        assert_eq!(normalize_url("http://www.google.com/maps"), "google.com/maps");
        assert_eq!(normalize_url("http://docs.rs/regex"), "docs.rs/regex");
    }

    #[test]
    fn test_normalize_url_leaves_other_urls() {
        assert_eq!(normalize_url("about:blank"), "about:blank");
        assert_eq!(normalize_url("ftp://www.example.com"), "ftp://www.example.com");
        assert_eq!(normalize_url("www.example.com"), "www.example.com");
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn test_normalize_url_strips_www_once() {
        assert_eq!(normalize_url("https://www.www.example.com"), "www.example.com");
    }

    #[test]
    fn test_normalize_filter_trailing_slash_dot() {
        assert_eq!(normalize_filter("https://www.github.com/."), "github.com");
        assert_eq!(normalize_filter("github.com/."), "github.com");
        // Only the literal two characters go
        assert_eq!(normalize_filter("github.com/rust"), "github.com/rust");
        assert_eq!(normalize_filter("github.com/"), "github.com/");
    }

    #[test]
    fn test_compile_match_all() {
        assert!(matches!(UrlFilter::compile(" ").unwrap(), UrlFilter::All));
        assert!(matches!(UrlFilter::compile("").unwrap(), UrlFilter::All));
        assert!(UrlFilter::All.matches("about:config"));
    }

    #[test]
    fn test_pattern_matches_normalized_url() {
        let filter = UrlFilter::compile("https://www.github.com").unwrap();

        assert!(filter.matches("https://github.com/rust-lang"));
        assert!(filter.matches("http://www.github.com"));
        assert!(!filter.matches("https://gitlab.com"));
    }

    #[test]
    fn test_pattern_is_a_regex() {
        let filter = UrlFilter::compile("^(docs|crates)\\.").unwrap();

        assert!(filter.matches("https://docs.rs/log"));
        assert!(filter.matches("https://www.crates.io/"));
        assert!(!filter.matches("https://blog.docs.rs"));
    }

    #[test]
    fn test_scheme_anchor_does_not_see_scheme() {
        // The URL is normalized before matching, so the scheme is gone
        let filter = UrlFilter::compile("^https").unwrap();
        assert!(!filter.matches("https://example.com"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = UrlFilter::compile("https://foo(").unwrap_err();
        match err {
            SortError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "foo("),
        }
    }
}
