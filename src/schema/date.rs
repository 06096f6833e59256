//! Date schema validation.
//!
//! [`DateSchema`] validates an optional calendar date: presence, and a
//! minimum age measured against the [`ValidationContext`]'s current date.

use chrono::{Datelike, NaiveDate};
use stillwater::Validation;

use crate::error::{FieldError, FieldErrors};
use crate::path::FieldPath;
use crate::validation::ValidationContext;

use super::traits::{into_validation, SchemaLike};

enum DateConstraint {
    Required { message: Option<String> },
    MinAge { years: i32, message: Option<String> },
}

/// A schema for validating `Option<NaiveDate>` fields.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use paperwork::{FieldPath, Schema, SchemaLike, ValidationContext};
///
/// let schema = Schema::date().required().min_age(18);
/// let ctx = ValidationContext::at(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// let path = FieldPath::from_field("dateOfBirth");
///
/// assert!(schema.validate(&NaiveDate::from_ymd_opt(2006, 12, 31), &path, &ctx).is_success());
/// assert!(schema.validate(&NaiveDate::from_ymd_opt(2007, 1, 1), &path, &ctx).is_failure());
/// assert!(schema.validate(&None, &path, &ctx).is_failure());
/// ```
#[derive(Default)]
pub struct DateSchema {
    constraints: Vec<DateConstraint>,
}

impl DateSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a date to be present.
    pub fn required(mut self) -> Self {
        self.constraints
            .push(DateConstraint::Required { message: None });
        self
    }

    /// Requires the age, in whole calendar years, to be at least `years`.
    ///
    /// Age is today's year minus the birth year; month and day are ignored.
    /// A missing date is left to [`required`](Self::required).
    pub fn min_age(mut self, years: i32) -> Self {
        self.constraints
            .push(DateConstraint::MinAge { years, message: None });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                DateConstraint::Required { message: m } => *m = Some(message.into()),
                DateConstraint::MinAge { message: m, .. } => *m = Some(message.into()),
            }
        }
        self
    }
}

/// Age in calendar years: the difference of the year components.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth.year()
}

impl SchemaLike<Option<NaiveDate>> for DateSchema {
    fn validate(
        &self,
        value: &Option<NaiveDate>,
        path: &FieldPath,
        ctx: &ValidationContext,
    ) -> Validation<(), FieldErrors> {
        let errors = self
            .constraints
            .iter()
            .filter_map(|c| match (c, value) {
                (DateConstraint::Required { message }, None) => Some(
                    FieldError::new(
                        path.clone(),
                        message.clone().unwrap_or_else(|| "is required".to_string()),
                    )
                    .with_code("required")
                    .with_expected("date"),
                ),
                (DateConstraint::MinAge { years, message }, Some(date)) => {
                    let age = age_in_years(*date, ctx.today());
                    (age < *years).then(|| {
                        FieldError::new(
                            path.clone(),
                            message
                                .clone()
                                .unwrap_or_else(|| format!("must be at least {} years old", years)),
                        )
                        .with_code("min_age")
                        .with_expected(format!("age >= {}", years))
                        .with_got(age.to_string())
                    })
                }
                _ => None,
            })
            .collect();

        into_validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_ignores_month_and_day() {
        let today = date(2024, 1, 1);
        assert_eq!(age_in_years(date(2006, 12, 31), today), 18);
        assert_eq!(age_in_years(date(2007, 1, 1), today), 17);
    }

    #[test]
    fn test_min_age_boundary() {
        let schema = DateSchema::new().min_age(18).error("You must be at least 18 years old");
        let ctx = ValidationContext::at(date(2024, 6, 15));
        let path = FieldPath::from_field("dateOfBirth");

        assert!(schema.validate(&Some(date(2006, 12, 31)), &path, &ctx).is_success());

        let errors = schema
            .validate(&Some(date(2007, 1, 1)), &path, &ctx)
            .into_result()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().code, "min_age");
        assert_eq!(errors.first().message, "You must be at least 18 years old");
        assert_eq!(errors.first().got.as_deref(), Some("17"));
    }

    #[test]
    fn test_missing_date_only_reports_required() {
        let schema = DateSchema::new().required().min_age(18);
        let ctx = ValidationContext::at(date(2024, 1, 1));
        let errors = schema
            .validate(&None, &FieldPath::root(), &ctx)
            .into_result()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().code, "required");
    }

    #[test]
    fn test_optional_date_without_required() {
        let schema = DateSchema::new().min_age(18);
        let ctx = ValidationContext::at(date(2024, 1, 1));
        assert!(schema.validate(&None, &FieldPath::root(), &ctx).is_success());
    }
}
