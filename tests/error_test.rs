//! Integration tests for FieldError, FieldErrors and SubmitError.

use paperwork::{
    BindingError, FieldError, FieldErrors, FieldPath, SubmitError, TransportError,
    ValidationResult,
};
use stillwater::prelude::*;
use stillwater::Validation;

#[test]
fn test_field_error_full_context() {
    let error = FieldError::new(
        FieldPath::parse("documents[1].file").unwrap(),
        "File size should be less than 5MB",
    )
    .with_code("max_size")
    .with_got("6000000 bytes")
    .with_expected("at most 5000000 bytes");

    assert_eq!(error.path.to_string(), "documents[1].file");
    assert_eq!(error.code, "max_size");
    assert_eq!(error.got.as_deref(), Some("6000000 bytes"));
    assert_eq!(
        error.to_string(),
        "documents[1].file: File size should be less than 5MB (expected: at most 5000000 bytes) (got: 6000000 bytes)"
    );
}

#[test]
fn test_root_error_display() {
    let error = FieldError::new(FieldPath::root(), "Form is empty");
    assert_eq!(error.to_string(), "(form): Form is empty");
}

#[test]
fn test_errors_combine_in_order() {
    let combined = FieldErrors::single(FieldError::new(
        FieldPath::from_field("firstName"),
        "First name is required",
    ))
    .combine(FieldErrors::single(FieldError::new(
        FieldPath::from_field("email"),
        "Invalid email address",
    )))
    .combine(FieldErrors::single(FieldError::new(
        FieldPath::from_field("documents"),
        "At least one document is required",
    )));

    let paths: Vec<String> = combined.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["firstName", "email", "documents"]);
    assert!(!combined.is_empty());
}

#[test]
fn test_from_vec() {
    assert!(FieldErrors::from_vec(Vec::new()).is_none());

    let errors = FieldErrors::from_vec(vec![
        FieldError::new(FieldPath::from_field("a"), "a").with_code("required"),
        FieldError::new(FieldPath::from_field("b"), "b").with_code("pattern"),
        FieldError::new(FieldPath::from_field("a"), "a again").with_code("pattern"),
    ])
    .unwrap();

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.at_path(&FieldPath::from_field("a")).len(), 2);
    assert_eq!(errors.with_code("pattern").len(), 2);
    assert_eq!(errors.first().message, "a");
    assert_eq!(errors.into_vec().len(), 3);
}

#[test]
fn test_validation_and_accumulates_errors() {
    let v1: ValidationResult<()> = Validation::Failure(FieldErrors::single(FieldError::new(
        FieldPath::from_field("lastName"),
        "Last name is required",
    )));
    let v2: ValidationResult<()> = Validation::Failure(FieldErrors::single(FieldError::new(
        FieldPath::from_field("residentialLine1"),
        "Street 1 is required",
    )));

    match v1.and(v2) {
        Validation::Failure(errors) => assert_eq!(errors.len(), 2),
        Validation::Success(_) => panic!("Expected failure"),
    }
}

#[test]
fn test_errors_display_lists_each() {
    let errors = FieldErrors::single(FieldError::new(
        FieldPath::from_field("email"),
        "Invalid email address",
    ));
    let text = errors.to_string();
    assert!(text.contains("1 error(s)"));
    assert!(text.contains("1. email: Invalid email address"));
}

#[test]
fn test_submit_error_variants() {
    let errors = FieldErrors::single(FieldError::new(FieldPath::from_field("email"), "x"));
    let err = SubmitError::Validation(errors);
    assert_eq!(err.field_errors().map(FieldErrors::len), Some(1));

    let err: SubmitError = TransportError::Request("bad mime".into()).into();
    assert!(err.field_errors().is_none());
    assert_eq!(err.to_string(), "failed to build request: bad mime");

    let err = SubmitError::Application {
        status: 500,
        message: "Failed to submit the form".into(),
    };
    assert_eq!(
        err.to_string(),
        "server rejected submission with status 500: Failed to submit the form"
    );
}

#[test]
fn test_network_error_keeps_source() {
    use std::error::Error;

    let err = TransportError::Network {
        endpoint: "http://localhost:8000/api/form/submitForm".into(),
        source: "connection refused".into(),
    };
    assert!(err.source().is_some());
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_binding_error_display() {
    let err = BindingError::UnknownPath(FieldPath::from_field("nickname"));
    assert_eq!(err.to_string(), "no field at 'nickname'");
}
