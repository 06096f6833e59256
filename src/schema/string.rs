//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating text fields with
//! constraints like non-emptiness, maximum length, regex patterns, email
//! format and membership in a fixed set of choices.

use std::sync::LazyLock;

use regex::Regex;
use stillwater::Validation;

use crate::error::{FieldError, FieldErrors};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::traits::{into_validation, SchemaLike};

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        pattern_str: String,
        message: Option<String>,
    },
    Email {
        message: Option<String>,
    },
    OneOf {
        allowed: Vec<String>,
        message: Option<String>,
    },
}

/// A schema for validating string fields.
///
/// All constraint violations are accumulated rather than short-circuiting on
/// the first failure.
///
/// # Example
///
/// ```rust
/// use paperwork::{FieldPath, Schema, SchemaLike, ValidationContext};
///
/// let schema = Schema::string()
///     .non_empty()
///     .error("Street 1 is required")
///     .max_len(80);
///
/// let ctx = ValidationContext::now();
/// let path = FieldPath::from_field("residentialLine1");
/// assert!(SchemaLike::<str>::validate(&schema, "1 Main St", &path, &ctx).is_success());
/// assert!(SchemaLike::<str>::validate(&schema, "", &path, &ctx).is_failure());
/// ```
#[derive(Clone, Default)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Adds a minimum length constraint, in characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at least one character. Equivalent to `.min_len(1)`.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Adds a maximum length constraint, in characters.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Adds a regex pattern constraint.
    ///
    /// Returns an error if the regex pattern is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paperwork::{FieldPath, Schema, SchemaLike, ValidationContext};
    ///
    /// let schema = Schema::string().pattern(r"^\d{5}$").unwrap();
    /// let ctx = ValidationContext::now();
    /// assert!(SchemaLike::<str>::validate(&schema, "12345", &FieldPath::root(), &ctx).is_success());
    /// assert!(SchemaLike::<str>::validate(&schema, "1234", &FieldPath::root(), &ctx).is_failure());
    /// ```
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            pattern_str: pattern.to_string(),
            message: None,
        });
        Ok(self)
    }

    /// Requires a syntactically valid email address.
    ///
    /// An empty string fails this constraint, so it doubles as the
    /// required-check for email fields.
    pub fn email(mut self) -> Self {
        self.constraints
            .push(StringConstraint::Email { message: None });
        self
    }

    /// Requires the value to be one of `allowed`.
    ///
    /// Empty strings are not checked here; pair with [`non_empty`](Self::non_empty)
    /// when the field is required. A custom message may contain `{value}`.
    pub fn one_of<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.push(StringConstraint::OneOf {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: None,
        });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// Has no effect when no constraint has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                StringConstraint::MinLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::MaxLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::Pattern { message: m, .. } => *m = Some(message.into()),
                StringConstraint::Email { message: m } => *m = Some(message.into()),
                StringConstraint::OneOf { message: m, .. } => *m = Some(message.into()),
            }
        }
        self
    }

    /// Validates a string against every constraint.
    pub fn validate_str(&self, value: &str, path: &FieldPath) -> Validation<(), FieldErrors> {
        let errors: Vec<FieldError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, value, path))
            .collect();

        into_validation(errors)
    }
}

impl SchemaLike<str> for StringSchema {
    fn validate(
        &self,
        value: &str,
        path: &FieldPath,
        _ctx: &ValidationContext,
    ) -> Validation<(), FieldErrors> {
        self.validate_str(value, path)
    }
}

impl SchemaLike<String> for StringSchema {
    fn validate(
        &self,
        value: &String,
        path: &FieldPath,
        _ctx: &ValidationContext,
    ) -> Validation<(), FieldErrors> {
        self.validate_str(value, path)
    }
}

/// Checks a single constraint and returns an error if it fails.
fn check_constraint(
    constraint: &StringConstraint,
    value: &str,
    path: &FieldPath,
) -> Option<FieldError> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            if len < *min {
                let msg = message.clone().unwrap_or_else(|| {
                    if *min == 1 {
                        "is required".to_string()
                    } else {
                        format!("length must be at least {}, got {}", min, len)
                    }
                });
                Some(
                    FieldError::new(path.clone(), msg)
                        .with_code("min_length")
                        .with_expected(format!("at least {} characters", min))
                        .with_got(format!("{} characters", len)),
                )
            } else {
                None
            }
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            if len > *max {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at most {}, got {}", max, len));
                Some(
                    FieldError::new(path.clone(), msg)
                        .with_code("max_length")
                        .with_expected(format!("at most {} characters", max))
                        .with_got(format!("{} characters", len)),
                )
            } else {
                None
            }
        }
        StringConstraint::Pattern {
            regex,
            pattern_str,
            message,
        } => {
            if !regex.is_match(value) {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must match pattern '{}'", pattern_str));
                Some(
                    FieldError::new(path.clone(), msg)
                        .with_code("pattern")
                        .with_expected(format!("string matching '{}'", pattern_str))
                        .with_got(value.to_string()),
                )
            } else {
                None
            }
        }
        StringConstraint::Email { message } => {
            if !EMAIL_REGEX.is_match(value) {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| "invalid email address".to_string());
                Some(
                    FieldError::new(path.clone(), msg)
                        .with_code("pattern")
                        .with_expected("email address")
                        .with_got(value.to_string()),
                )
            } else {
                None
            }
        }
        StringConstraint::OneOf { allowed, message } => {
            if !value.is_empty() && !allowed.iter().any(|a| a == value) {
                let msg = match message {
                    Some(m) => m.replace("{value}", value),
                    None => format!("unsupported value: {}", value),
                };
                Some(
                    FieldError::new(path.clone(), msg)
                        .with_code("invalid_choice")
                        .with_expected(format!("one of {}", allowed.join(", ")))
                        .with_got(value.to_string()),
                )
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_non_empty() {
        let schema = StringSchema::new().non_empty();
        assert!(schema.validate_str("a", &FieldPath::root()).is_success());

        let errors = unwrap_failure(schema.validate_str("", &FieldPath::root()));
        assert_eq!(errors.first().code, "min_length");
        assert_eq!(errors.first().message, "is required");
    }

    #[test]
    fn test_custom_error_message() {
        let schema = StringSchema::new().non_empty().error("Last name is required");
        let errors = unwrap_failure(schema.validate_str("", &FieldPath::from_field("lastName")));
        assert_eq!(errors.first().message, "Last name is required");
        assert_eq!(errors.first().path.to_string(), "lastName");
    }

    #[test]
    fn test_error_without_constraint_is_ignored() {
        let schema = StringSchema::new().error("unused");
        assert!(schema.validate_str("", &FieldPath::root()).is_success());
    }

    #[test]
    fn test_email() {
        let schema = StringSchema::new().email();
        for ok in ["a@b.co", "first.last+tag@mail.example.org", "o'neil@x.io"] {
            assert!(schema.validate_str(ok, &FieldPath::root()).is_success(), "{ok}");
        }
        for bad in ["", "plain", "a@b", "@b.com", "a@.com", "a..b@c.com", "a@b.c", "a b@c.com"] {
            assert!(schema.validate_str(bad, &FieldPath::root()).is_failure(), "{bad}");
        }
    }

    #[test]
    fn test_empty_email_reports_once() {
        let schema = StringSchema::new().email().error("Invalid email address");
        let errors = unwrap_failure(schema.validate_str("", &FieldPath::root()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().message, "Invalid email address");
    }

    #[test]
    fn test_one_of_skips_empty() {
        let schema = StringSchema::new().one_of(["image/png", "application/pdf"]);
        assert!(schema.validate_str("", &FieldPath::root()).is_success());
        assert!(schema.validate_str("image/png", &FieldPath::root()).is_success());

        let errors = unwrap_failure(schema.validate_str("text/plain", &FieldPath::root()));
        assert_eq!(errors.first().code, "invalid_choice");
        assert_eq!(errors.first().got.as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_error_accumulation() {
        let schema = StringSchema::new().min_len(10).pattern(r"^\d+$").unwrap();

        let errors = unwrap_failure(schema.validate_str("abc", &FieldPath::root()));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.with_code("min_length").len(), 1);
        assert_eq!(errors.with_code("pattern").len(), 1);
    }

    #[test]
    fn test_unicode_length() {
        let schema = StringSchema::new().min_len(3).max_len(5);
        assert!(schema.validate_str("日本語", &FieldPath::root()).is_success());
        assert!(schema.validate_str("🎉🎊", &FieldPath::root()).is_failure());
    }

    #[test]
    fn test_invalid_regex_pattern() {
        assert!(StringSchema::new().pattern(r"[invalid").is_err());
    }
}
