//! What a failed rule reports, and the ordered set a failed form carries.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::FieldPath;

/// Code given to an error whose rule did not name one.
pub const DEFAULT_CODE: &str = "invalid";

/// One rule violation, addressed to the form field a UI shows it under.
///
/// `got` and `expected` are filled in where a rule has something concrete
/// to say, such as a file size against the upload ceiling.
///
/// ```rust
/// use paperwork::{FieldError, FieldPath};
///
/// let path = FieldPath::parse("documents[0].file").unwrap();
/// let error = FieldError::new(path, "File size should be less than 5MB")
///     .with_code("max_size")
///     .with_got("6000000 bytes");
///
/// assert_eq!(error.to_string(), "documents[0].file: File size should be less than 5MB (got: 6000000 bytes)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub path: FieldPath,
    /// Text shown next to the field.
    pub message: String,
    pub got: Option<String>,
    pub expected: Option<String>,
    /// Stable rule identifier such as `required`, `max_size` or `type_mismatch`.
    pub code: String,
}

impl FieldError {
    /// Code starts as [`DEFAULT_CODE`].
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: DEFAULT_CODE.into(),
        }
    }

    pub fn with_code(self, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..self
        }
    }

    pub fn with_got(self, got: impl Into<String>) -> Self {
        Self {
            got: Some(got.into()),
            ..self
        }
    }

    pub fn with_expected(self, expected: impl Into<String>) -> Self {
        Self {
            expected: Some(expected.into()),
            ..self
        }
    }

    /// True for errors about the form as a whole rather than one field.
    pub fn is_form_level(&self) -> bool {
        self.path.is_root()
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_form_level() {
            write!(f, "(form): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }
        match (&self.expected, &self.got) {
            (Some(expected), Some(got)) => write!(f, " (expected: {expected}) (got: {got})"),
            (Some(expected), None) => write!(f, " (expected: {expected})"),
            (None, Some(got)) => write!(f, " (got: {got})"),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for FieldError {}

/// Every violation of a failed form, in the order the rules ran.
///
/// Never empty. Results of independent rules merge with `Semigroup::combine`:
///
/// ```rust
/// use paperwork::{FieldPath, FieldError, FieldErrors};
/// use stillwater::prelude::*;
///
/// let errors1 = FieldErrors::single(
///     FieldError::new(FieldPath::from_field("firstName"), "First name is required")
/// );
/// let errors2 = FieldErrors::single(
///     FieldError::new(FieldPath::from_field("email"), "Invalid email address")
/// );
///
/// let combined = errors1.combine(errors2);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors(NonEmptyVec<FieldError>);

impl FieldErrors {
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// `None` for an empty vec.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        let mut iter = errors.into_iter();
        let head = iter.next()?;
        Some(iter.fold(Self::single(head), |acc, e| acc.combine(Self::single(e))))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Errors shown under the field at `path`; nested paths are not included.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&FieldError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    pub fn with_code(&self, code: &str) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// The error a UI should focus first.
    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0.into_vec()
    }
}

impl Semigroup for FieldErrors {
    fn combine(self, other: Self) -> Self {
        FieldErrors(self.0.combine(other.0))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Form has {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = Box<dyn Iterator<Item = &'a FieldError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

// Errors are handed to notification sinks that may live on other threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldErrors>();
    assert_sync::<FieldErrors>();
};
