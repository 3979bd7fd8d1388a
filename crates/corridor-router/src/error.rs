//! Error types for pattern construction.
//!
//! Every variant here is a startup-time failure: a service whose generated
//! route templates do not parse, or collide with each other, must refuse to
//! start. Nothing in this module is produced at request time — a request
//! that matches no pattern is a routing outcome, not an error.

/// Errors raised while parsing a URI template or building a pattern tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PatternError {
    /// A `{` was opened but never closed within its segment.
    #[error("unclosed label brace in segment `{0}`")]
    UnclosedLabel(String),

    /// A `{` appeared inside an already-open label reference.
    #[error("nested or repeated label brace in segment `{0}`")]
    NestedLabel(String),

    /// A `}` without a matching `{`, or brace text embedded in a literal.
    #[error("stray brace in segment `{0}`")]
    StrayBrace(String),

    /// A label reference with no name (`{}` or `{+}`).
    #[error("empty label in segment `{0}`")]
    EmptyLabel(String),

    /// A label name containing query-string structural characters.
    #[error("label name contains reserved character in segment `{0}`")]
    InvalidLabelName(String),

    /// A greedy label somewhere other than the final path segment.
    #[error("greedy label `{0}` must be the final path segment")]
    GreedyLabelNotLast(String),

    /// The same label name bound more than once within a single template.
    #[error("label `{0}` is bound more than once in the same template")]
    DuplicateLabel(String),

    /// Two registered patterns are structurally indistinguishable: same
    /// literal/label shape and same required query literals. Routing between
    /// them could only be decided by registration order, so construction
    /// rejects the second registration.
    #[error("pattern `{inserted}` conflicts with already-registered pattern `{existing}`")]
    ConflictingPattern {
        /// The template that was registered first.
        existing: String,
        /// The template whose registration was rejected.
        inserted: String,
    },
}
