//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating a typed struct: each
//! named field is read through an accessor and checked by its own schema,
//! then cross-field rules run over the whole value.

use indexmap::IndexMap;
use stillwater::Validation;

use crate::error::{FieldError, FieldErrors};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::traits::{into_validation, SchemaLike};

type Check<T> =
    Box<dyn Fn(&T, &FieldPath, &ValidationContext) -> Validation<(), FieldErrors> + Send + Sync>;

/// A schema for validating values of a struct type `T`.
///
/// Validation happens in two passes:
///
/// 1. **Field pass**: every field registered with [`field`](Self::field) is
///    validated independently, in declaration order.
/// 2. **Cross-field pass**: rules registered with [`require_if`](Self::require_if),
///    [`each`](Self::each) and [`custom`](Self::custom) run in declaration order.
///
/// Both passes always run to completion and all errors are returned together.
///
/// # Example
///
/// ```rust
/// use paperwork::{FieldPath, Schema, SchemaLike, ValidationContext};
///
/// struct Shipping {
///     pickup: bool,
///     street: String,
/// }
///
/// let schema = Schema::object::<Shipping>()
///     .require_if(|s| !s.pickup, "street", |s| s.street.as_str(), "Street is required");
///
/// let ctx = ValidationContext::now();
/// let pickup = Shipping { pickup: true, street: String::new() };
/// let delivery = Shipping { pickup: false, street: String::new() };
///
/// assert!(schema.validate(&pickup, &FieldPath::root(), &ctx).is_success());
/// assert!(schema.validate(&delivery, &FieldPath::root(), &ctx).is_failure());
/// ```
pub struct ObjectSchema<T> {
    fields: IndexMap<String, Check<T>>,
    refinements: Vec<Check<T>>,
}

impl<T: 'static> ObjectSchema<T> {
    /// Creates a new object schema with no rules.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            refinements: Vec::new(),
        }
    }

    /// Adds a field validated by `schema`.
    ///
    /// `get` selects the field's value from the struct; errors are reported
    /// at `path.name`. Registering the same name twice replaces the earlier
    /// rule but keeps its position.
    pub fn field<F, S, A>(mut self, name: impl Into<String>, get: A, schema: S) -> Self
    where
        F: ?Sized,
        A: Fn(&T) -> &F + Send + Sync + 'static,
        S: SchemaLike<F> + 'static,
    {
        let name = name.into();
        let field_name = name.clone();
        let check = move |value: &T, path: &FieldPath, ctx: &ValidationContext| {
            schema.validate(get(value), &path.push_field(&field_name), ctx)
        };
        self.fields.insert(name, Box::new(check));
        self
    }

    /// Requires a text field to be non-empty whenever `condition` holds.
    ///
    /// When the condition is false the field is not checked at all.
    pub fn require_if<C, A>(
        mut self,
        condition: C,
        name: impl Into<String>,
        get: A,
        message: impl Into<String>,
    ) -> Self
    where
        C: Fn(&T) -> bool + Send + Sync + 'static,
        A: Fn(&T) -> &str + Send + Sync + 'static,
    {
        let name = name.into();
        let message = message.into();
        let check = move |value: &T, path: &FieldPath, _ctx: &ValidationContext| {
            if condition(value) && get(value).is_empty() {
                Validation::Failure(FieldErrors::single(
                    FieldError::new(path.push_field(&name), message.clone())
                        .with_code("conditional_required")
                        .with_expected("value"),
                ))
            } else {
                Validation::Success(())
            }
        };
        self.refinements.push(Box::new(check));
        self
    }

    /// Runs `rule` on every item of a list field.
    ///
    /// The rule receives the item and its path (`path.name[index]`); each
    /// item is checked independently and all failures are kept.
    pub fn each<I, A, R>(mut self, name: impl Into<String>, items: A, rule: R) -> Self
    where
        I: 'static,
        A: Fn(&T) -> &[I] + Send + Sync + 'static,
        R: Fn(&I, &FieldPath) -> Option<FieldError> + Send + Sync + 'static,
    {
        let name = name.into();
        let check = move |value: &T, path: &FieldPath, _ctx: &ValidationContext| {
            let list_path = path.push_field(&name);
            let errors = items(value)
                .iter()
                .enumerate()
                .filter_map(|(index, item)| rule(item, &list_path.push_index(index)))
                .collect();
            into_validation(errors)
        };
        self.refinements.push(Box::new(check));
        self
    }

    /// Adds an arbitrary cross-field rule.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paperwork::{FieldError, FieldErrors, FieldPath, Schema, SchemaLike, ValidationContext};
    /// use stillwater::Validation;
    ///
    /// struct Range { low: u32, high: u32 }
    ///
    /// let schema = Schema::object::<Range>().custom(|r, path, _ctx| {
    ///     if r.low <= r.high {
    ///         Validation::Success(())
    ///     } else {
    ///         Validation::Failure(FieldErrors::single(
    ///             FieldError::new(path.push_field("high"), "high must not be below low"),
    ///         ))
    ///     }
    /// });
    ///
    /// let ctx = ValidationContext::now();
    /// assert!(schema.validate(&Range { low: 3, high: 1 }, &FieldPath::root(), &ctx).is_failure());
    /// ```
    pub fn custom<R>(mut self, rule: R) -> Self
    where
        R: Fn(&T, &FieldPath, &ValidationContext) -> Validation<(), FieldErrors>
            + Send
            + Sync
            + 'static,
    {
        self.refinements.push(Box::new(rule));
        self
    }

    /// Names of the registered fields, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<T: 'static> Default for ObjectSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SchemaLike<T> for ObjectSchema<T> {
    fn validate(
        &self,
        value: &T,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<(), FieldErrors> {
        let mut errors = Vec::new();

        for check in self.fields.values().chain(self.refinements.iter()) {
            if let Validation::Failure(e) = check(value, path, ctx) {
                errors.extend(e.into_iter());
            }
        }

        into_validation(errors)
    }
}
