//! Attached-file schema validation.
//!
//! [`FileSchema`] validates an optional [`AttachedFile`]: presence, a byte
//! size ceiling, and the reported MIME type against an allow-list.

use stillwater::Validation;

use crate::error::{FieldError, FieldErrors};
use crate::path::FieldPath;
use crate::record::AttachedFile;
use crate::validation::ValidationContext;

use super::traits::{into_validation, SchemaLike};

enum FileConstraint {
    Required {
        message: Option<String>,
    },
    MaxSize {
        max: usize,
        message: Option<String>,
    },
    MimeTypes {
        allowed: Vec<String>,
        message: Option<String>,
    },
}

/// A schema for validating `Option<AttachedFile>` fields.
///
/// Size and MIME constraints only apply once a file is attached; a missing
/// file is reported by [`required`](Self::required) alone.
///
/// # Example
///
/// ```rust
/// use paperwork::{AttachedFile, FieldPath, Schema, SchemaLike, ValidationContext};
///
/// let schema = Schema::file()
///     .required()
///     .max_size(4)
///     .mime_types(["image/png"]);
///
/// let ctx = ValidationContext::now();
/// let small = Some(AttachedFile::new("a.png", "image/png", vec![0u8; 4]));
/// let large = Some(AttachedFile::new("a.gif", "image/gif", vec![0u8; 5]));
///
/// assert!(schema.validate(&small, &FieldPath::root(), &ctx).is_success());
/// // too large AND wrong type: both reported
/// let errors = schema.validate(&large, &FieldPath::root(), &ctx).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Default)]
pub struct FileSchema {
    constraints: Vec<FileConstraint>,
}

impl FileSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a file to be attached.
    pub fn required(mut self) -> Self {
        self.constraints
            .push(FileConstraint::Required { message: None });
        self
    }

    /// Rejects files larger than `max` bytes.
    pub fn max_size(mut self, max: usize) -> Self {
        self.constraints
            .push(FileConstraint::MaxSize { max, message: None });
        self
    }

    /// Requires the reported MIME type to be one of `allowed`.
    pub fn mime_types<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.push(FileConstraint::MimeTypes {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: None,
        });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// For MIME constraints the placeholder `{mime}` is replaced by the
    /// reported type.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                FileConstraint::Required { message: m } => *m = Some(message.into()),
                FileConstraint::MaxSize { message: m, .. } => *m = Some(message.into()),
                FileConstraint::MimeTypes { message: m, .. } => *m = Some(message.into()),
            }
        }
        self
    }
}

impl SchemaLike<Option<AttachedFile>> for FileSchema {
    fn validate(
        &self,
        value: &Option<AttachedFile>,
        path: &FieldPath,
        _ctx: &ValidationContext,
    ) -> Validation<(), FieldErrors> {
        let errors = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, value.as_ref(), path))
            .collect();

        into_validation(errors)
    }
}

fn check_constraint(
    constraint: &FileConstraint,
    file: Option<&AttachedFile>,
    path: &FieldPath,
) -> Option<FieldError> {
    match (constraint, file) {
        (FileConstraint::Required { message }, None) => Some(
            FieldError::new(
                path.clone(),
                message.clone().unwrap_or_else(|| "file is required".to_string()),
            )
            .with_code("required")
            .with_expected("file"),
        ),
        (FileConstraint::MaxSize { max, message }, Some(file)) if file.size() > *max => Some(
            FieldError::new(
                path.clone(),
                message
                    .clone()
                    .unwrap_or_else(|| format!("file must be at most {} bytes", max)),
            )
            .with_code("max_size")
            .with_expected(format!("at most {} bytes", max))
            .with_got(format!("{} bytes", file.size())),
        ),
        (FileConstraint::MimeTypes { allowed, message }, Some(file))
            if !allowed.iter().any(|m| *m == file.mime_type) =>
        {
            let msg = match message {
                Some(m) => m.replace("{mime}", &file.mime_type),
                None => format!("unsupported file type: {}", file.mime_type),
            };
            Some(
                FieldError::new(path.clone(), msg)
                    .with_code("invalid_mime")
                    .with_expected(format!("one of {}", allowed.join(", ")))
                    .with_got(file.mime_type.clone()),
            )
        }
        _ => None,
    }
}
