//! Request URI parsing: `http::Uri` into the router's [`ParsedUri`].
//!
//! Percent-decoding happens inside [`ParsedUri::parse`], once per path
//! segment, so encoded slashes inside a segment never shift segment
//! boundaries.

use corridor_router::ParsedUri;

/// Build a [`ParsedUri`] from a request URI.
#[must_use]
pub fn parse_request_uri(uri: &http::Uri, allow_empty_segments: bool) -> ParsedUri {
    ParsedUri::parse(uri.path(), uri.query(), allow_empty_segments)
}
