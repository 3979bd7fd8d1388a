//! URI pattern routing for Corridor services.
//!
//! This crate is the request-routing core of the Corridor runtime: given
//! the set of route templates a service's generated code registers at
//! startup, it decides which operation a concrete request URI addresses
//! and extracts the label values the template binds.
//!
//! - **Pattern model** ([`UriPattern`], [`Segment`], [`QueryPattern`]):
//!   parses one template into literal, label (`{name}`), and greedy label
//!   (`{name+}`) segments plus an optional query pattern.
//! - **Pattern tree** ([`PatternTree`]): all of a service's patterns
//!   compiled into one prefix tree, built once at startup and frozen.
//! - **Routing engine** ([`PatternTree::route`], [`TreeMatch`]):
//!   depth-first backtracking search with literal-first acceptance and
//!   `(path rank, query rank)` specificity ordering, so `widgets/current`
//!   beats `widgets/{id}` for the input `current`, and a pattern requiring
//!   `?Action=Get` beats an unconstrained twin when both fit.
//! - **Query matching** ([`QueryMatcher`]): required literal query pairs
//!   and label-bound query keys, evaluated at terminal nodes.
//!
//! # Usage
//!
//! ```rust
//! use corridor_router::{ParsedUri, PatternTree, UriPattern};
//!
//! let mut tree = PatternTree::new();
//! tree.insert(UriPattern::parse("widgets/{id}")?, "GetWidget")?;
//! tree.insert(UriPattern::parse("widgets/current")?, "GetCurrentWidget")?;
//!
//! let request = ParsedUri::parse("/widgets/42", None, false);
//! let matched = tree.route(&request).expect("registered route");
//! assert_eq!(*matched.payload(), "GetWidget");
//! assert_eq!(matched.labels().get("id"), Some("42"));
//! # Ok::<(), corridor_router::PatternError>(())
//! ```
//!
//! Routing holds no locks and performs no I/O: the tree is immutable after
//! construction and all per-request state is allocated fresh per call, so
//! one tree can serve any number of concurrent request tasks.

mod captures;
mod engine;
mod error;
mod label;
mod pattern;
mod query;
mod tree;
mod uri;

pub use captures::LabelBindings;
pub use engine::TreeMatch;
pub use error::PatternError;
pub use pattern::{QueryPattern, Segment, UriPattern};
pub use query::QueryMatcher;
pub use tree::PatternTree;
pub use uri::ParsedUri;
