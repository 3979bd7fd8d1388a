//! Query-pattern matching at leaf-eligible tree nodes.
//!
//! A [`QueryMatcher`] is attached to every tree node that terminates a
//! registered pattern. It carries the pattern's query template (if any),
//! the pattern's path rank, and the operation payload. Matching is a
//! single stateless pass over the request's query multimap: required
//! literal keys must be present with exactly one value equal to the
//! expected literal, and label-bound keys capture every supplied value.

use crate::pattern::QueryPattern;
use crate::uri::ParsedUri;

/// A terminal-node matcher: query template, path rank, and payload.
#[derive(Debug)]
pub struct QueryMatcher<T> {
    template: String,
    query: Option<QueryPattern>,
    path_rank: usize,
    payload: T,
}

/// The outcome of a successful query match: captured label values and the
/// match's query rank (the number of required literals satisfied).
#[derive(Debug)]
pub(crate) struct QueryMatch<'a> {
    pub(crate) captures: Vec<(&'a str, &'a str)>,
    pub(crate) rank: usize,
}

impl<T> QueryMatcher<T> {
    pub(crate) fn new(
        template: String,
        query: Option<QueryPattern>,
        path_rank: usize,
        payload: T,
    ) -> Self {
        Self {
            template,
            query,
            path_rank,
            payload,
        }
    }

    /// The rendered template this matcher was registered under.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The number of literal path segments in the owning pattern.
    #[must_use]
    pub fn path_rank(&self) -> usize {
        self.path_rank
    }

    /// The operation payload registered with the owning pattern.
    #[must_use]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Evaluate this matcher against a request's query parameters.
    ///
    /// Returns `None` when any required literal constraint fails; an absent
    /// query template trivially succeeds with rank 0.
    pub(crate) fn matches<'a>(&'a self, uri: &'a ParsedUri) -> Option<QueryMatch<'a>> {
        let Some(query) = &self.query else {
            return Some(QueryMatch {
                captures: Vec::new(),
                rank: 0,
            });
        };

        for (key, expected) in query.literals() {
            let mut values = uri.query_values(key);
            // Exactly one value, equal to the expected literal.
            match (values.next(), values.next()) {
                (Some(value), None) if value == expected => {}
                _ => return None,
            }
        }

        let mut captures = Vec::new();
        for (key, name) in query.label_bindings() {
            for value in uri.query_values(key) {
                captures.push((name.as_str(), value));
            }
        }

        Some(QueryMatch {
            captures,
            rank: query.literal_count(),
        })
    }

    /// Required literal pairs, sorted, for structural-conflict comparison.
    pub(crate) fn required_literals(&self) -> Vec<(&str, &str)> {
        sorted_literals(self.query.as_ref())
    }
}

/// Sorted required-literal pairs of an optional query pattern.
pub(crate) fn sorted_literals(query: Option<&QueryPattern>) -> Vec<(&str, &str)> {
    let mut literals: Vec<(&str, &str)> = query
        .map(QueryPattern::literals)
        .unwrap_or_default()
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    literals.sort_unstable();
    literals
}
