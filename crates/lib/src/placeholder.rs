//! Placeholder tokens for values only the orchestrator knows.
//!
//! Commands, repository destinations and component paths reference build
//! metadata (build root, branch, build number, ...) that is not known until the
//! orchestrator schedules the build. Those references are written as
//! `%(name)` tokens and handed over verbatim; this crate never substitutes
//! them. It only builds and inspects them.
//!
//! # Example
//!
//! ```
//! use gobuild_lib::placeholder::{parse, Segment};
//!
//! let segments = parse("%(buildroot)/publish").unwrap();
//! assert_eq!(segments, vec![
//!     Segment::Placeholder("buildroot".to_string()),
//!     Segment::Literal("/publish".to_string()),
//! ]);
//! ```

use std::collections::BTreeSet;

use thiserror::Error;

pub const BUILDROOT: &str = "buildroot";
pub const BUILDTYPE: &str = "buildtype";
pub const RELEASETYPE: &str = "releasetype";
pub const BUILDNUMBER: &str = "buildnumber";
pub const PRODUCTBUILDNUMBER: &str = "productbuildnumber";
pub const CHANGENUMBER: &str = "changenumber";
pub const BRANCH: &str = "branch";
pub const GOBUILDC: &str = "gobuildc";
pub const BUILDID: &str = "buildid";

/// A segment of parsed template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Literal text (no placeholders)
  Literal(String),

  /// Name inside a `%(name)` token
  Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
  #[error("unclosed placeholder at position {0}")]
  Unclosed(usize),

  #[error("empty placeholder at position {0}")]
  Empty(usize),
}

/// Returns the `%(name)` token for `name`.
pub fn token(name: &str) -> String {
  format!("%({})", name)
}

/// Wraps a value in double quotes, as make flag values carrying tokens are.
pub fn quote(value: &str) -> String {
  format!("\"{}\"", value)
}

/// Parse a template into literal and placeholder segments.
///
/// A `%` that is not followed by `(` is literal text.
///
/// # Errors
///
/// Returns an error if a token is never closed or has an empty name.
pub fn parse(input: &str) -> Result<Vec<Segment>, PlaceholderError> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut chars = input.char_indices().peekable();

  while let Some((pos, ch)) = chars.next() {
    if ch != '%' || !matches!(chars.peek(), Some((_, '('))) {
      literal.push(ch);
      continue;
    }

    chars.next(); // consume the (

    let mut name = String::new();
    let mut found_close = false;
    for (_, c) in chars.by_ref() {
      if c == ')' {
        found_close = true;
        break;
      }
      name.push(c);
    }

    if !found_close {
      return Err(PlaceholderError::Unclosed(pos));
    }
    if name.is_empty() {
      return Err(PlaceholderError::Empty(pos));
    }

    if !literal.is_empty() {
      segments.push(Segment::Literal(std::mem::take(&mut literal)));
    }
    segments.push(Segment::Placeholder(name));
  }

  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  Ok(segments)
}

/// Distinct placeholder names referenced by `input`, sorted.
pub fn names(input: &str) -> Result<BTreeSet<String>, PlaceholderError> {
  Ok(
    parse(input)?
      .into_iter()
      .filter_map(|segment| match segment {
        Segment::Placeholder(name) => Some(name),
        Segment::Literal(_) => None,
      })
      .collect(),
  )
}
