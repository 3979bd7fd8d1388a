//! Label syntax validation and template normalization.
//!
//! A URI template is normalized before segmentation: the query portion is
//! split off at the first `?`, and leading, trailing, and duplicate slashes
//! in the path portion are discarded. Each remaining token is then classified
//! as a literal, a label (`{name}`), or a greedy label (`{name+}`).
//!
//! Brace misuse is fatal at construction time. A token is a label only when
//! `{` is its first character and `}` its last; anything else containing a
//! brace is rejected rather than silently treated as literal text.

use crate::error::PatternError;
use crate::pattern::Segment;

/// Characters that structure the query portion of a template. A label name
/// containing one of these could never round-trip through a query string.
const QUERY_STRUCTURAL: [char; 3] = ['?', '=', '&'];

/// Split a raw template into its path portion and optional query portion.
pub(crate) fn split_template(template: &str) -> (&str, Option<&str>) {
    match template.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (template, None),
    }
}

/// Iterate the normalized path tokens of a template: leading, trailing, and
/// duplicate slashes produce no tokens.
pub(crate) fn path_tokens(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|token| !token.is_empty())
}

/// Classify a single normalized path token as a segment.
///
/// # Errors
///
/// Returns a [`PatternError`] on any brace misuse: unclosed or nested braces,
/// stray braces, brace text embedded in a literal, empty label names, or
/// label names containing query-string structural characters.
pub(crate) fn parse_token(token: &str) -> Result<Segment, PatternError> {
    let span = brace_span(token)?;

    let Some((open, close)) = span else {
        return Ok(Segment::Literal(token.to_owned()));
    };

    // Braces closed properly but embedded in literal text (`a{b}c`).
    if open != 0 || close != token.len() - 1 {
        return Err(PatternError::StrayBrace(token.to_owned()));
    }

    let inner = &token[1..token.len() - 1];
    let (name, greedy) = match inner.strip_suffix('+') {
        Some(name) => (name, true),
        None => (inner, false),
    };

    validate_name(name, token)?;

    if greedy {
        Ok(Segment::GreedyLabel(name.to_owned()))
    } else {
        Ok(Segment::Label(name.to_owned()))
    }
}

/// Parse the value side of a query pair as a label reference, if it is one.
///
/// Returns `Ok(Some(name))` for `{name}`, `Ok(None)` for plain literal text,
/// and an error for brace misuse or a greedy reference (greedy labels are
/// only legal as the final path segment).
pub(crate) fn parse_query_label(value: &str) -> Result<Option<String>, PatternError> {
    let span = brace_span(value)?;

    let Some((open, close)) = span else {
        return Ok(None);
    };

    if open != 0 || close != value.len() - 1 {
        return Err(PatternError::StrayBrace(value.to_owned()));
    }

    let inner = &value[1..value.len() - 1];
    if let Some(name) = inner.strip_suffix('+') {
        return Err(PatternError::GreedyLabelNotLast(name.to_owned()));
    }

    validate_name(inner, value)?;
    Ok(Some(inner.to_owned()))
}

/// Reject a query key that contains brace characters.
pub(crate) fn validate_query_key(key: &str) -> Result<(), PatternError> {
    if key.contains(['{', '}']) {
        return Err(PatternError::StrayBrace(key.to_owned()));
    }
    Ok(())
}

/// Locate the single `{...}` span in a token, rejecting brace misuse.
fn brace_span(token: &str) -> Result<Option<(usize, usize)>, PatternError> {
    let mut open: Option<usize> = None;
    let mut span: Option<(usize, usize)> = None;

    for (index, ch) in token.char_indices() {
        match ch {
            '{' => {
                if open.is_some() || span.is_some() {
                    return Err(PatternError::NestedLabel(token.to_owned()));
                }
                open = Some(index);
            }
            '}' => match open.take() {
                Some(start) => span = Some((start, index)),
                None => return Err(PatternError::StrayBrace(token.to_owned())),
            },
            _ => {}
        }
    }

    if open.is_some() {
        return Err(PatternError::UnclosedLabel(token.to_owned()));
    }

    Ok(span)
}

/// Validate a label name extracted from a token.
fn validate_name(name: &str, token: &str) -> Result<(), PatternError> {
    if name.is_empty() {
        return Err(PatternError::EmptyLabel(token.to_owned()));
    }
    if name.contains(QUERY_STRUCTURAL) {
        return Err(PatternError::InvalidLabelName(token.to_owned()));
    }
    Ok(())
}
