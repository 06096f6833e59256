//! List schema validation.
//!
//! This module provides [`ListSchema`] for validating ordered collections:
//! length bounds on the list itself and an item schema applied to every
//! entry at its indexed path.

use stillwater::Validation;

use crate::error::{FieldError, FieldErrors};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::traits::{into_validation, SchemaLike};

/// A constraint applied to the list as a whole.
enum ListConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
}

/// A schema for validating slices of items.
///
/// Length violations are reported at the list's own path; item violations
/// at `path[index]...`. Every item is validated even when others fail, so an
/// error on entry 2 never hides one on entry 0.
///
/// # Example
///
/// ```rust
/// use paperwork::{FieldPath, Schema, SchemaLike, ValidationContext};
///
/// let schema = Schema::list(Schema::string().non_empty()).min_len(2);
/// let ctx = ValidationContext::now();
/// let path = FieldPath::from_field("tags");
///
/// let tags = vec!["a".to_string(), String::new()];
/// let errors = schema.validate(&tags[..], &path, &ctx).into_result().unwrap_err();
/// assert_eq!(errors.first().path.to_string(), "tags[1]");
/// ```
pub struct ListSchema<S> {
    item_schema: S,
    constraints: Vec<ListConstraint>,
}

impl<S> ListSchema<S> {
    /// Creates a new list schema with the given item schema.
    pub fn new(item_schema: S) -> Self {
        Self {
            item_schema,
            constraints: Vec::new(),
        }
    }

    /// The list must have at least `min` items.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(ListConstraint::MinLength { min, message: None });
        self
    }

    /// The list must have at most `max` items.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(ListConstraint::MaxLength { max, message: None });
        self
    }

    /// The list must have at least one item. Equivalent to `.min_len(1)`.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Sets a custom error message for the most recent constraint.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                ListConstraint::MinLength { message: m, .. } => *m = Some(message.into()),
                ListConstraint::MaxLength { message: m, .. } => *m = Some(message.into()),
            }
        }
        self
    }
}

impl<T, S> SchemaLike<[T]> for ListSchema<S>
where
    S: SchemaLike<T>,
{
    fn validate(
        &self,
        items: &[T],
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<(), FieldErrors> {
        let mut errors = Vec::new();
        let len = items.len();

        for constraint in &self.constraints {
            match constraint {
                ListConstraint::MinLength { min, message } if len < *min => {
                    let msg = message.clone().unwrap_or_else(|| {
                        format!("must have at least {} items, got {}", min, len)
                    });
                    errors.push(
                        FieldError::new(path.clone(), msg)
                            .with_code("min_items")
                            .with_expected(format!("at least {} items", min))
                            .with_got(format!("{} items", len)),
                    );
                }
                ListConstraint::MaxLength { max, message } if len > *max => {
                    let msg = message.clone().unwrap_or_else(|| {
                        format!("must have at most {} items, got {}", max, len)
                    });
                    errors.push(
                        FieldError::new(path.clone(), msg)
                            .with_code("max_items")
                            .with_expected(format!("at most {} items", max))
                            .with_got(format!("{} items", len)),
                    );
                }
                _ => {}
            }
        }

        for (index, item) in items.iter().enumerate() {
            let item_path = path.push_index(index);
            if let Validation::Failure(e) = self.item_schema.validate(item, &item_path, ctx) {
                errors.extend(e.into_iter());
            }
        }

        into_validation(errors)
    }
}
