//! Field paths for locating values in a form record.
//!
//! This module provides [`FieldPath`] and [`PathSegment`] types for addressing
//! fields of a [`FormRecord`](crate::FormRecord), including entries of its
//! document list (e.g., `documents[2].file`).

use std::fmt::{self, Display};
use std::str::FromStr;

/// A segment of a field path.
///
/// Paths are built from segments that represent either field access or list indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field (e.g., `email`, `fileName`)
    Field(String),
    /// A list index (e.g., `[0]`, `[2]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Returns the field name if this is a field segment.
    pub fn as_field(&self) -> Option<&str> {
        match self {
            PathSegment::Field(name) => Some(name),
            PathSegment::Index(_) => None,
        }
    }
}

/// Error returned when a textual path cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid field path '{input}': {reason}")]
pub struct PathParseError {
    /// The text that failed to parse.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

/// A path to a value inside a form record.
///
/// `FieldPath` represents locations like `documents[0].fileName` and provides
/// methods for building paths incrementally. Every [`FieldError`](crate::FieldError)
/// carries one, so errors on the third document's file can be told apart from
/// errors on the first.
///
/// # Example
///
/// ```rust
/// use paperwork::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("documents")
///     .push_index(2)
///     .push_field("file");
///
/// assert_eq!(path.to_string(), "documents[2].file");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path representing the whole record.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Parses a path written as `documents[2].file`.
    ///
    /// The empty string parses to the root path.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paperwork::FieldPath;
    ///
    /// let path = FieldPath::parse("documents[1].fileType").unwrap();
    /// assert_eq!(
    ///     path,
    ///     FieldPath::root().push_field("documents").push_index(1).push_field("fileType")
    /// );
    /// ```
    pub fn parse(input: &str) -> Result<Self, PathParseError> {
        let fail = |reason| PathParseError {
            input: input.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut rest = input;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('[') {
                let close = after.find(']').ok_or_else(|| fail("unclosed '['"))?;
                let idx = after[..close]
                    .parse::<usize>()
                    .map_err(|_| fail("index must be a non-negative integer"))?;
                segments.push(PathSegment::Index(idx));
                rest = &after[close + 1..];
            } else {
                if !segments.is_empty() {
                    rest = rest
                        .strip_prefix('.')
                        .ok_or_else(|| fail("expected '.' or '[' between segments"))?;
                }
                let end = rest.find(['.', '[']).unwrap_or(rest.len());
                if end == 0 {
                    return Err(fail("empty field name"));
                }
                segments.push(PathSegment::Field(rest[..end].to_string()));
                rest = &rest[end..];
            }
        }
        Ok(Self { segments })
    }

    /// Returns a new path with a field segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the segments as a slice, for pattern matching.
    pub fn as_slice(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns true if `prefix` is this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl FromStr for FieldPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
