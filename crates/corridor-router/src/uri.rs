//! Request-time URI parsing.
//!
//! A [`ParsedUri`] is the router's view of one incoming request: decoded
//! path segments and a query multimap. Percent-decoding happens once per
//! segment, never across the full path, so an encoded `%2F` inside a
//! segment cannot shift segment boundaries. Instances are built fresh per
//! request and never mutated after construction.

use percent_encoding::percent_decode_str;

/// A parsed request URI: decoded path segments plus query key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUri {
    segments: Vec<String>,
    query: Vec<(String, String)>,
    allow_empty_segments: bool,
}

impl ParsedUri {
    /// Parse a raw request path and optional raw query string.
    ///
    /// The leading slash contributes no segment. With
    /// `allow_empty_segments` unset, empty segments produced by duplicate
    /// or trailing slashes are dropped; with it set they are kept and may
    /// bind to labels.
    #[must_use]
    pub fn parse(path: &str, query: Option<&str>, allow_empty_segments: bool) -> Self {
        let trimmed = path.strip_prefix('/').unwrap_or(path);

        let segments = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed
                .split('/')
                .filter(|segment| allow_empty_segments || !segment.is_empty())
                .map(decode_component)
                .collect()
        };

        Self {
            segments,
            query: query.map(parse_query).unwrap_or_default(),
            allow_empty_segments,
        }
    }

    /// The decoded path segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// All query pairs in request order, repeats preserved.
    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// All values supplied for one query key, in request order.
    pub fn query_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.query
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether empty path segments are permitted for this request.
    #[must_use]
    pub fn allow_empty_segments(&self) -> bool {
        self.allow_empty_segments
    }
}

/// Decode a percent-encoded URI component.
fn decode_component(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().into_owned()
}

/// Parse a raw query string into decoded key/value pairs, repeats preserved.
fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(pair), String::new()),
        })
        .collect()
}
