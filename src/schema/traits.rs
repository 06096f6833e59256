//! Traits for schema polymorphism.
//!
//! This module provides the [`SchemaLike`] trait that lets rule builders for
//! different value types (strings, dates, files, lists, objects) be composed
//! into a single schema for a record.

use stillwater::Validation;

use crate::error::{FieldError, FieldErrors};
use crate::path::FieldPath;
use crate::validation::ValidationContext;
use crate::ValidationResult;

/// A schema that validates values of type `T`.
///
/// Implementations report every violated constraint, never just the first.
/// The `Send + Sync` bounds allow a built schema to be shared and reused for
/// every validation pass (e.g., on each field blur).
///
/// # Example
///
/// ```rust
/// use paperwork::{FieldPath, Schema, SchemaLike, ValidationContext};
///
/// let schema = Schema::string().non_empty().error("First name is required");
/// let result = SchemaLike::<str>::validate(&schema, "", &FieldPath::from_field("firstName"), &ValidationContext::now());
/// assert!(result.is_failure());
/// ```
pub trait SchemaLike<T: ?Sized>: Send + Sync {
    /// Validates a value against this schema.
    ///
    /// Returns `Validation::Success(())` when every constraint holds, or
    /// `Validation::Failure` with all accumulated errors.
    fn validate(
        &self,
        value: &T,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> ValidationResult<()>;
}

/// Turns a list of collected errors into a validation result.
pub(crate) fn into_validation(errors: Vec<FieldError>) -> ValidationResult<()> {
    match FieldErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}
