//! Submission, transport, binding and configuration errors.

use crate::path::FieldPath;

use super::FieldErrors;

/// Why a submit attempt did not succeed.
///
/// None of these is fatal: the record is preserved and the user may retry.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The record failed validation; nothing was sent.
    #[error("{0}")]
    Validation(FieldErrors),

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered but rejected the submission.
    #[error("server rejected submission with status {status}: {message}")]
    Application {
        /// HTTP status code of the response.
        status: u16,
        /// Server-provided message, or the generic failure text.
        message: String,
    },
}

impl SubmitError {
    /// Returns the validation errors if this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Failure to complete the POST at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The multipart body could not be built (e.g., an unparsable MIME type).
    #[error("failed to build request: {0}")]
    Request(String),

    /// Network-level failure: connection refused, DNS, reset, timeout.
    #[error("request to {endpoint} failed: {source}")]
    Network {
        /// Where the request was going.
        endpoint: String,
        /// Underlying cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Failure to read or write a field through a [`FieldBinding`](crate::FieldBinding).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// No field lives at the path.
    #[error("no field at '{0}'")]
    UnknownPath(FieldPath),

    /// The field exists but holds a different kind of value.
    #[error("field '{path}' expects a {expected} value")]
    KindMismatch {
        /// Field that was written.
        path: FieldPath,
        /// Kind the field holds.
        expected: &'static str,
    },
}

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value of the wrong shape.
    #[error("invalid value for {name}: '{value}' ({reason})")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// What was expected.
        reason: &'static str,
    },
}
