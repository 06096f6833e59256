//! # Paperwork
//!
//! Validation and submission for a personal-details form with a dynamic
//! list of uploaded documents.
//!
//! ## Overview
//!
//! A [`FormRecord`] holds what the user typed. Validation checks every rule
//! and collects ALL violations, each addressed by a [`FieldPath`] such as
//! `documents[2].file`, so a UI can show every problem at once. A record
//! that passes becomes a [`ValidRecord`], which [`assemble`] maps onto the
//! multipart [`WirePayload`] a [`Transport`] posts to the server.
//! [`FormSession`] drives the whole cycle and reports the outcome through a
//! [`Notifier`].
//!
//! Error accumulation is built on stillwater's `Validation` type.
//!
//! ## Core Types
//!
//! - [`FieldPath`]: location of a field, including document entries
//! - [`FieldError`] / [`FieldErrors`]: one violation / a non-empty ordered set
//! - [`Schema`]: entry point for the composable rule builders
//! - [`FormValidator`]: the complete form rule set
//! - [`FormSession`]: one live form with its errors and submit action
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use paperwork::{validate_at, FormRecord, ValidationContext};
//!
//! let ctx = ValidationContext::at(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//! let errors = validate_at(&FormRecord::default(), &ctx).unwrap_err();
//!
//! let first = errors.first();
//! assert_eq!(first.path.to_string(), "firstName");
//! assert_eq!(first.message, "First name is required");
//! ```

pub mod binding;
pub mod config;
pub mod error;
pub mod form;
pub mod notify;
pub mod path;
pub mod payload;
pub mod record;
pub mod schema;
pub mod session;
pub mod transport;
pub mod validation;

pub use binding::{FieldBinding, FieldValue};
pub use config::SubmitConfig;
pub use error::{BindingError, ConfigError, FieldError, FieldErrors, SubmitError, TransportError};
pub use form::{
    document_schema, form_schema, validate, validate_at, validate_with, Address, FormSchemaOptions,
    FormValidator, ValidDocument, ValidRecord,
};
pub use notify::{BufferedNotifier, LogNotifier, Notification, Notifier};
pub use path::{FieldPath, PathParseError, PathSegment};
pub use payload::{assemble, PayloadValue, WirePayload};
pub use record::{AttachedFile, DocumentEntry, DocumentList, DocumentType, EntryId, FormRecord};
pub use schema::{
    DateSchema, FileSchema, ListSchema, ObjectSchema, Schema, SchemaLike, StringSchema,
};
pub use session::FormSession;
pub use transport::{Transport, TransportResponse};
pub use validation::ValidationContext;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

/// Type alias for validation results using FieldErrors
pub type ValidationResult<T> = stillwater::Validation<T, FieldErrors>;
