//! Pattern tree construction.
//!
//! A [`PatternTree`] holds every registered route pattern of one service.
//! Each node represents a path-segment position, with exact-match literal
//! children, ordered label branches, and ordered greedy-label branches.
//! A node that terminates at least one registered pattern carries that
//! pattern's [`QueryMatcher`]; a node can terminate several patterns when
//! operations share a path and differ only by query pattern.
//!
//! Construction is append-only and expected to run single-threaded at
//! service startup. Once built, routing takes `&self`, so the borrow
//! checker enforces the build-once-then-share discipline: the tree cannot
//! be mutated while request handlers hold references to it.

use std::collections::HashMap;

use crate::error::PatternError;
use crate::pattern::{Segment, UriPattern};
use crate::query::{QueryMatcher, sorted_literals};

/// The compiled pattern tree for one service's registered operations.
#[derive(Debug)]
pub struct PatternTree<T> {
    pub(crate) root: Node<T>,
    len: usize,
}

impl<T> Default for PatternTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One path-segment position in the tree.
#[derive(Debug)]
pub(crate) struct Node<T> {
    /// Exact-match continuations keyed by segment text.
    pub(crate) literals: HashMap<String, Node<T>>,
    /// Single-segment label branches, in registration order.
    pub(crate) labels: Vec<LabelBranch<T>>,
    /// Greedy label branches, in registration order.
    pub(crate) greedy: Vec<LabelBranch<T>>,
    /// Set when this node is itself a greedy-label node: the label name
    /// under which it keeps absorbing trailing segments.
    pub(crate) greedy_self: Option<String>,
    /// Non-empty iff this node terminates at least one registered pattern.
    pub(crate) matchers: Vec<QueryMatcher<T>>,
}

/// A label-keyed edge to a child node.
#[derive(Debug)]
pub(crate) struct LabelBranch<T> {
    pub(crate) name: String,
    pub(crate) node: Node<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            literals: HashMap::new(),
            labels: Vec::new(),
            greedy: Vec::new(),
            greedy_self: None,
            matchers: Vec::new(),
        }
    }
}

impl<T> PatternTree<T> {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            len: 0,
        }
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no patterns have been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Register one pattern with its operation payload.
    ///
    /// Walks the tree creating literal, label, or greedy branches as
    /// needed, then attaches a [`QueryMatcher`] at the terminal node.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::ConflictingPattern`] when an
    /// already-registered pattern has the same literal/label shape and the
    /// same required query literals — such a pair could only be ordered by
    /// registration order, which is rejected rather than silently decided.
    pub fn insert(&mut self, pattern: UriPattern, payload: T) -> Result<(), PatternError> {
        let template = pattern.to_string();

        if let Some(existing) = shape_conflict(&self.root, &pattern, 0) {
            return Err(PatternError::ConflictingPattern {
                existing: existing.to_owned(),
                inserted: template,
            });
        }

        let mut node = &mut self.root;
        for segment in pattern.segments() {
            node = match segment {
                Segment::Literal(text) => node.literals.entry(text.clone()).or_default(),
                Segment::Label(name) => descend_branch(&mut node.labels, name, None),
                Segment::GreedyLabel(name) => {
                    descend_branch(&mut node.greedy, name, Some(name.clone()))
                }
            };
        }

        node.matchers.push(QueryMatcher::new(
            template.clone(),
            pattern.query().cloned(),
            pattern.literal_count(),
            payload,
        ));
        self.len += 1;

        tracing::debug!(template = %template, "registered route pattern");
        Ok(())
    }
}

/// Find or create the branch named `name` in a branch list and return its
/// node. `greedy_self` is set on newly created greedy-label nodes.
fn descend_branch<'n, T>(
    branches: &'n mut Vec<LabelBranch<T>>,
    name: &str,
    greedy_self: Option<String>,
) -> &'n mut Node<T> {
    let position = branches.iter().position(|branch| branch.name == name);
    let index = match position {
        Some(index) => index,
        None => {
            branches.push(LabelBranch {
                name: name.to_owned(),
                node: Node {
                    greedy_self,
                    ..Node::default()
                },
            });
            branches.len() - 1
        }
    };
    &mut branches[index].node
}

/// Walk the tree by pattern *shape* (literal text, any label, any greedy
/// label — names ignored) and report the template of an existing matcher
/// with the same required query literals, if one exists.
fn shape_conflict<'t, T>(
    node: &'t Node<T>,
    pattern: &UriPattern,
    index: usize,
) -> Option<&'t str> {
    if index == pattern.segments().len() {
        let required = sorted_literals(pattern.query());
        return node
            .matchers
            .iter()
            .find(|matcher| matcher.required_literals() == required)
            .map(QueryMatcher::template);
    }

    match &pattern.segments()[index] {
        Segment::Literal(text) => node
            .literals
            .get(text)
            .and_then(|child| shape_conflict(child, pattern, index + 1)),
        Segment::Label(_) => node
            .labels
            .iter()
            .find_map(|branch| shape_conflict(&branch.node, pattern, index + 1)),
        Segment::GreedyLabel(_) => node
            .greedy
            .iter()
            .find_map(|branch| shape_conflict(&branch.node, pattern, index + 1)),
    }
}
