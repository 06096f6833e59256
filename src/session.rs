//! One live form: its record, its attached errors, and the submit action.

use crate::binding::{FieldBinding, FieldValue};
use crate::config::SubmitConfig;
use crate::error::{BindingError, FieldError, FieldErrors, SubmitError};
use crate::form::{FormValidator, ValidRecord};
use crate::notify::Notifier;
use crate::path::FieldPath;
use crate::payload::assemble;
use crate::record::FormRecord;
use crate::transport::Transport;
use crate::validation::ValidationContext;

/// Shown after a 2xx response.
pub const SUCCESS_MESSAGE: &str = "Successfully submitted the form!";

/// Shown when the server gives no usable message, or no response at all.
pub const FAILURE_MESSAGE: &str = "Failed to submit the form";

/// Owns the single [`FormRecord`] of a page session.
///
/// The record survives failed validation and failed submissions unchanged;
/// only a successful submission resets it.
///
/// # Example
///
/// ```rust,no_run
/// # #[cfg(feature = "http")]
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use paperwork::{FormSession, HttpTransport, LogNotifier, SubmitConfig};
///
/// let config = SubmitConfig::from_env()?;
/// let mut session = FormSession::new(config, HttpTransport::new()?, LogNotifier);
/// session.record_mut().first_name = "Ada".into();
///
/// match session.submit().await {
///     Ok(status) => println!("accepted with {status}"),
///     Err(e) => println!("not submitted: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct FormSession<T, N> {
    record: FormRecord,
    errors: Vec<FieldError>,
    validator: FormValidator,
    config: SubmitConfig,
    context: Option<ValidationContext>,
    transport: T,
    notifier: N,
}

impl<T: Transport, N: Notifier> FormSession<T, N> {
    /// Starts with a default record and the rule set implied by `config`.
    pub fn new(config: SubmitConfig, transport: T, notifier: N) -> Self {
        Self {
            record: FormRecord::default(),
            errors: Vec::new(),
            validator: FormValidator::new(config.schema_options()),
            config,
            context: None,
            transport,
            notifier,
        }
    }

    /// Replaces the rule set.
    ///
    /// The config's document minimum is updated to the validator's, so
    /// [`config`](Self::config) always reports what is enforced.
    pub fn with_validator(mut self, validator: FormValidator) -> Self {
        self.config.min_documents = validator.options().min_documents;
        self.validator = validator;
        self
    }

    /// Validates against a fixed date instead of the clock.
    pub fn with_context(mut self, context: ValidationContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut FormRecord {
        &mut self.record
    }

    /// Errors from the most recent validation, in rule order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn config(&self) -> &SubmitConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Back to a default record with no errors.
    pub fn reset(&mut self) {
        self.record = FormRecord::default();
        self.errors.clear();
    }

    fn context(&self) -> ValidationContext {
        self.context.unwrap_or_else(ValidationContext::now)
    }

    /// Validates the whole record and replaces the attached errors.
    pub fn validate(&mut self) -> Result<ValidRecord, FieldErrors> {
        let result = self.validator.validate(&self.record, &self.context());
        match &result {
            Ok(_) => self.errors.clear(),
            Err(errors) => self.attach_errors(errors),
        }
        result
    }

    /// Re-validates after the user leaves the field at `path`.
    ///
    /// Only the errors at `path` are replaced, so fields the user has not
    /// reached yet stay clean. Returns the errors now at `path`.
    pub fn blur(&mut self, path: &FieldPath) -> Vec<&FieldError> {
        let fresh: Vec<FieldError> = match self.validator.validate(&self.record, &self.context()) {
            Ok(_) => Vec::new(),
            Err(errors) => errors.into_iter().filter(|e| &e.path == path).collect(),
        };
        self.errors.retain(|e| &e.path != path);
        self.errors.extend(fresh);
        self.errors_at(path)
    }

    /// Validates, then sends the record once.
    ///
    /// On a 2xx response the success notification fires and the record is
    /// reset; the status is returned. Every other outcome leaves the record
    /// as it was. Validation failures attach their errors and send nothing.
    pub async fn submit(&mut self) -> Result<u16, SubmitError> {
        let valid = self.validate().map_err(SubmitError::Validation)?;

        let endpoint = self.config.endpoint();
        let payload = assemble(&valid);
        tracing::info!(endpoint = %endpoint, parts = payload.len(), "submitting form");

        match self.transport.post(&endpoint, payload).await {
            Ok(response) if response.is_success() => {
                tracing::info!(endpoint = %endpoint, status = response.status, "form submitted");
                self.notifier.notify_success(SUCCESS_MESSAGE);
                self.reset();
                Ok(response.status)
            }
            Ok(response) => {
                let message = response.message().unwrap_or(FAILURE_MESSAGE).to_string();
                tracing::warn!(
                    endpoint = %endpoint,
                    status = response.status,
                    message = %message,
                    "server rejected submission"
                );
                self.notifier.notify_failure(&message);
                Err(SubmitError::Application {
                    status: response.status,
                    message,
                })
            }
            Err(error) => {
                tracing::warn!(endpoint = %endpoint, error = %error, "submission did not complete");
                self.notifier.notify_failure(FAILURE_MESSAGE);
                Err(SubmitError::Transport(error))
            }
        }
    }
}

impl<T: Transport, N: Notifier> FieldBinding for FormSession<T, N> {
    fn get(&self, path: &FieldPath) -> Option<FieldValue> {
        self.record.get_field(path)
    }

    fn set(&mut self, path: &FieldPath, value: FieldValue) -> Result<(), BindingError> {
        self.record.set_field(path, value)
    }

    fn attach_errors(&mut self, errors: &FieldErrors) {
        self.errors = errors.iter().cloned().collect();
    }

    fn errors_at(&self, path: &FieldPath) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| &e.path == path).collect()
    }

    fn clear_errors(&mut self) {
        self.errors.clear();
    }
}
