//! Error types for validation and submission failures.
//!
//! [`FieldError`] / [`FieldErrors`] describe what is wrong with a record and
//! never leave the client. [`SubmitError`] is the outcome taxonomy of one
//! submit attempt.

mod field_error;
mod submit_error;

pub use field_error::{FieldError, FieldErrors, DEFAULT_CODE};
pub use submit_error::{BindingError, ConfigError, SubmitError, TransportError};
