//! The pattern model: parsed URI templates.
//!
//! A [`UriPattern`] is the parsed form of one operation's route template,
//! e.g. `widgets/{id}/parts/{part+}?Action=Describe&Filter={filter}`. It
//! holds the ordered path segments and, when the template carries a query
//! portion, a [`QueryPattern`] of required literal pairs and label-bound
//! keys. Patterns are produced once at startup from the code-generation
//! layer's registration list; parsing failures are fatal there and never
//! reach request handling.

use std::fmt;

use crate::error::PatternError;
use crate::label;

/// One segment position of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches a request segment byte-for-byte.
    Literal(String),
    /// Matches exactly one request segment, captured under the label name.
    Label(String),
    /// Matches one or more trailing request segments, captured joined by `/`.
    /// Legal only as the final segment of a template.
    GreedyLabel(String),
}

impl Segment {
    /// The label name bound by this segment, if any.
    #[must_use]
    pub fn label_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Label(name) | Self::GreedyLabel(name) => Some(name),
        }
    }
}

/// The query portion of a template: required literal pairs plus query keys
/// whose request values are captured under a label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPattern {
    literals: Vec<(String, String)>,
    labels: Vec<(String, String)>,
}

impl QueryPattern {
    /// Required literal key/value pairs. A request matches only when each
    /// key is present with exactly one value equal to the expected literal.
    #[must_use]
    pub fn literals(&self) -> &[(String, String)] {
        &self.literals
    }

    /// Query keys bound to labels, as `(key, label name)` pairs.
    #[must_use]
    pub fn label_bindings(&self) -> &[(String, String)] {
        &self.labels
    }

    /// Number of required literal constraints; the query rank of a match.
    #[must_use]
    pub fn literal_count(&self) -> usize {
        self.literals.len()
    }
}

/// A parsed URI template: ordered path segments plus an optional query
/// pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriPattern {
    segments: Vec<Segment>,
    query: Option<QueryPattern>,
    literal_count: usize,
}

impl UriPattern {
    /// Parse a raw template string.
    ///
    /// The template is normalized first: the query portion is split off at
    /// the first `?`, and leading, trailing, and duplicate slashes are
    /// discarded from the path portion.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] for any label syntax violation: brace
    /// misuse, empty or reserved-character label names, a greedy label
    /// anywhere but the final path segment, or the same label name bound
    /// twice in one template.
    pub fn parse(template: &str) -> Result<Self, PatternError> {
        let (path, query) = label::split_template(template);

        let mut segments = Vec::new();
        for token in label::path_tokens(path) {
            segments.push(label::parse_token(token)?);
        }

        // Greedy labels only in final position.
        for segment in segments.iter().rev().skip(1) {
            if let Segment::GreedyLabel(name) = segment {
                return Err(PatternError::GreedyLabelNotLast(name.clone()));
            }
        }

        let query = match query {
            Some(raw) => Some(Self::parse_query(raw)?),
            None => None,
        };

        let pattern = Self {
            literal_count: segments
                .iter()
                .filter(|segment| matches!(segment, Segment::Literal(_)))
                .count(),
            segments,
            query,
        };

        pattern.check_duplicate_labels()?;
        Ok(pattern)
    }

    fn parse_query(raw: &str) -> Result<QueryPattern, PatternError> {
        let mut pattern = QueryPattern::default();

        for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                None => (pair, ""),
            };
            label::validate_query_key(key)?;

            match label::parse_query_label(value)? {
                Some(name) => pattern.labels.push((key.to_owned(), name)),
                None => pattern
                    .literals
                    .push((key.to_owned(), value.to_owned())),
            }
        }

        Ok(pattern)
    }

    fn check_duplicate_labels(&self) -> Result<(), PatternError> {
        let mut seen: Vec<&str> = Vec::new();
        let path_names = self.segments.iter().filter_map(Segment::label_name);
        let query_names = self
            .query
            .iter()
            .flat_map(|query| query.labels.iter().map(|(_, name)| name.as_str()));

        for name in path_names.chain(query_names) {
            if seen.contains(&name) {
                return Err(PatternError::DuplicateLabel(name.to_owned()));
            }
            seen.push(name);
        }
        Ok(())
    }

    /// The ordered path segments of the template.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The query pattern, if the template carried a query portion.
    #[must_use]
    pub fn query(&self) -> Option<&QueryPattern> {
        self.query.as_ref()
    }

    /// Number of literal path segments; the path rank of this pattern.
    #[must_use]
    pub fn literal_count(&self) -> usize {
        self.literal_count
    }
}

impl fmt::Display for UriPattern {
    /// Renders the normalized template: no leading slash, single `?`
    /// separator before the query portion.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Label(name) => write!(f, "{{{name}}}")?,
                Segment::GreedyLabel(name) => write!(f, "{{{name}+}}")?,
            }
        }

        if let Some(query) = &self.query {
            f.write_str("?")?;
            let mut first = true;
            for (key, value) in &query.literals {
                if !first {
                    f.write_str("&")?;
                }
                first = false;
                if value.is_empty() {
                    f.write_str(key)?;
                } else {
                    write!(f, "{key}={value}")?;
                }
            }
            for (key, name) in &query.labels {
                if !first {
                    f.write_str("&")?;
                }
                first = false;
                write!(f, "{key}={{{name}}}")?;
            }
        }

        Ok(())
    }
}
