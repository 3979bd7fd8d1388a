//! The routing engine: depth-first backtracking search over the pattern
//! tree.
//!
//! Given a [`ParsedUri`], the engine walks the tree collecting every
//! structurally valid match and keeps the most specific one. At each node:
//!
//! 1. An exact literal child is tried first; a real match found through it
//!    is accepted immediately — an exact textual match is always more
//!    specific than any label binding at the same position, so no other
//!    branch can outrank it.
//! 2. Every label branch is tried, extending the capture chain by one
//!    binding per branch.
//! 3. Every greedy branch is tried the same way; a greedy node then keeps
//!    absorbing trailing segments through its self-loop.
//! 4. Candidates compare by `(path rank, query rank)`, lexicographically,
//!    higher first.
//!
//! "No match" is a value (`None`), not an error: the caller owns the
//! translation into a protocol-level not-found response. Routing is a pure
//! function of the frozen tree and the request, safe to run concurrently
//! from any number of tasks.

use crate::captures::{Captures, LabelBindings};
use crate::tree::{Node, PatternTree};
use crate::uri::ParsedUri;

/// A winning route: the registered payload plus everything captured on the
/// way to it.
#[derive(Debug)]
pub struct TreeMatch<'a, T> {
    payload: &'a T,
    path_rank: usize,
    query_rank: usize,
    captures: Captures<'a>,
    query_captures: Vec<(&'a str, &'a str)>,
}

impl<'a, T> TreeMatch<'a, T> {
    /// The payload registered with the winning pattern.
    #[must_use]
    pub fn payload(&self) -> &'a T {
        self.payload
    }

    /// Literal path segments in the winning pattern.
    #[must_use]
    pub fn path_rank(&self) -> usize {
        self.path_rank
    }

    /// Required query literals satisfied by the winning pattern.
    #[must_use]
    pub fn query_rank(&self) -> usize {
        self.query_rank
    }

    /// Build the merged label bindings: path captures (greedy parts joined
    /// by `/`) followed by query captures in request order.
    #[must_use]
    pub fn labels(&self) -> LabelBindings {
        let mut bindings = LabelBindings::default();
        self.captures.collect_into(&mut bindings);
        for (name, value) in &self.query_captures {
            bindings.append_query(name, value);
        }
        bindings
    }

    /// Strictly-more-specific comparison on `(path rank, query rank)`.
    fn outranks(&self, other: &Self) -> bool {
        (self.path_rank, self.query_rank) > (other.path_rank, other.query_rank)
    }
}

impl<T> PatternTree<T> {
    /// Route a parsed request URI to the most specific registered pattern.
    ///
    /// Returns `None` when no pattern matches; this is the router's only
    /// request-time failure mode and it is an expected outcome, not an
    /// error.
    #[must_use]
    pub fn route<'a>(&'a self, uri: &'a ParsedUri) -> Option<TreeMatch<'a, T>> {
        let segments: Vec<&str> = uri.segments().iter().map(String::as_str).collect();

        let best = match_node(&self.root, &segments, 0, &Captures::empty(), uri);
        if best.is_some() {
            return best;
        }

        // A service that permits empty segments may bind a label at the
        // root with no literal prefix: retry an empty path as one
        // empty-string segment.
        if uri.allow_empty_segments() && segments.is_empty() && !self.root.labels.is_empty() {
            return match_node(&self.root, &[""], 0, &Captures::empty(), uri);
        }

        None
    }
}

/// Keep the more specific of two candidate matches. Ties keep `current`,
/// so earlier-registered branches win deterministically.
fn better<'a, T>(
    current: Option<TreeMatch<'a, T>>,
    candidate: Option<TreeMatch<'a, T>>,
) -> Option<TreeMatch<'a, T>> {
    match (current, candidate) {
        (Some(current), Some(candidate)) => {
            if candidate.outranks(&current) {
                Some(candidate)
            } else {
                Some(current)
            }
        }
        (current, candidate) => current.or(candidate),
    }
}

/// Recursive search step at `node`, consuming `segments[index..]`.
fn match_node<'a, T>(
    node: &'a Node<T>,
    segments: &[&'a str],
    index: usize,
    captures: &Captures<'a>,
    uri: &'a ParsedUri,
) -> Option<TreeMatch<'a, T>> {
    if index == segments.len() {
        return best_terminal(node, captures, uri);
    }
    let segment = segments[index];

    // (a) Exact literal continuation: accepted immediately on success.
    if let Some(child) = node.literals.get(segment) {
        let matched = match_node(child, segments, index + 1, captures, uri);
        if matched.is_some() {
            return matched;
        }
    }

    let mut best = None;

    // (b) Single-segment label branches.
    for branch in &node.labels {
        let extended = captures.push(&branch.name, segment, false);
        best = better(
            best,
            match_node(&branch.node, segments, index + 1, &extended, uri),
        );
    }

    // (c) Greedy branches: the first consumed segment enters the branch.
    for branch in &node.greedy {
        let extended = captures.push(&branch.name, segment, true);
        best = better(
            best,
            match_node(&branch.node, segments, index + 1, &extended, uri),
        );
    }

    // (d) Greedy self-loop: this node absorbs the segment itself.
    if let Some(name) = &node.greedy_self {
        let extended = captures.push(name, segment, true);
        best = better(best, match_node(node, segments, index + 1, &extended, uri));
    }

    best
}

/// Evaluate every query matcher at a candidate terminal position.
fn best_terminal<'a, T>(
    node: &'a Node<T>,
    captures: &Captures<'a>,
    uri: &'a ParsedUri,
) -> Option<TreeMatch<'a, T>> {
    let mut best = None;
    for matcher in &node.matchers {
        if let Some(query) = matcher.matches(uri) {
            best = better(
                best,
                Some(TreeMatch {
                    payload: matcher.payload(),
                    path_rank: matcher.path_rank(),
                    query_rank: query.rank,
                    captures: captures.clone(),
                    query_captures: query.captures,
                }),
            );
        }
    }
    best
}
