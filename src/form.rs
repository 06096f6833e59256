//! The rule set for the submission form and the validated record it yields.
//!
//! [`FormValidator`] runs every per-field rule and then the cross-field
//! rules (conditional permanent address, declared type vs. real extension)
//! over a [`FormRecord`], and either returns every violation at once or a
//! [`ValidRecord`] ready for [`assemble`](crate::assemble).

use chrono::NaiveDate;
use stillwater::Validation;

use crate::error::{FieldError, FieldErrors};
use crate::path::FieldPath;
use crate::record::{AttachedFile, DocumentEntry, DocumentType, FormRecord, MAX_FILE_SIZE};
use crate::schema::{ObjectSchema, Schema, SchemaLike};
use crate::validation::ValidationContext;

/// Minimum age, in calendar years, of the person submitting.
pub const MIN_AGE: i32 = 18;

/// Tunable parts of the form rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchemaOptions {
    /// Fewest document entries accepted. Defaults to 1.
    pub min_documents: usize,
    /// Largest attached file accepted, in bytes.
    pub max_file_size: usize,
}

impl Default for FormSchemaOptions {
    fn default() -> Self {
        Self {
            min_documents: 1,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

fn min_documents_message(min: usize) -> String {
    match min {
        1 => "At least one document is required".to_string(),
        2 => "At least two documents are required".to_string(),
        n => format!("At least {} documents are required", n),
    }
}

fn max_size_message(max: usize) -> String {
    if max >= 1_000_000 && max % 1_000_000 == 0 {
        format!("File size should be less than {}MB", max / 1_000_000)
    } else {
        format!("File size should be less than {} bytes", max)
    }
}

/// Rules for a single document entry.
pub fn document_schema(options: &FormSchemaOptions) -> ObjectSchema<DocumentEntry> {
    Schema::object::<DocumentEntry>()
        .field(
            "fileName",
            |d: &DocumentEntry| d.file_name.as_str(),
            Schema::string().non_empty().error("File name is required"),
        )
        .field(
            "fileType",
            |d: &DocumentEntry| d.declared_type.as_str(),
            Schema::string()
                .non_empty()
                .error("File type is required")
                .one_of(DocumentType::allowed_mimes())
                .error("Unsupported file type: {value}"),
        )
        .field(
            "file",
            |d: &DocumentEntry| &d.file,
            Schema::file()
                .required()
                .error("File is required")
                .max_size(options.max_file_size)
                .error(max_size_message(options.max_file_size))
                .mime_types(DocumentType::allowed_mimes())
                .error("Invalid file type: {mime}"),
        )
}

/// The extension of the attached file must equal the declared type's subtype.
///
/// Entries with no file or an unrecognised declared type are skipped; their
/// field rules already report the problem.
fn declared_type_matches_extension(entry: &DocumentEntry, path: &FieldPath) -> Option<FieldError> {
    let declared = DocumentType::from_mime(&entry.declared_type)?;
    let file = entry.file.as_ref()?;
    let extension = file.extension();
    if extension.as_deref() == Some(declared.subtype()) {
        return None;
    }

    let message = match &extension {
        Some(ext) => format!(
            "File extension '{}' does not match declared type {}",
            ext,
            declared.mime()
        ),
        None => format!(
            "File has no extension; declared type {} requires '.{}'",
            declared.mime(),
            declared.subtype()
        ),
    };
    Some(
        FieldError::new(path.push_field("file"), message)
            .with_code("type_mismatch")
            .with_expected(declared.subtype())
            .with_got(file.file_name.clone()),
    )
}

/// The complete rule set for a [`FormRecord`].
pub fn form_schema(options: &FormSchemaOptions) -> ObjectSchema<FormRecord> {
    Schema::object::<FormRecord>()
        .field(
            "firstName",
            |r: &FormRecord| r.first_name.as_str(),
            Schema::string().non_empty().error("First name is required"),
        )
        .field(
            "lastName",
            |r: &FormRecord| r.last_name.as_str(),
            Schema::string().non_empty().error("Last name is required"),
        )
        .field(
            "email",
            |r: &FormRecord| r.email.as_str(),
            Schema::string().email().error("Invalid email address"),
        )
        .field(
            "dateOfBirth",
            |r: &FormRecord| &r.date_of_birth,
            Schema::date()
                .required()
                .error("Date of birth is required")
                .min_age(MIN_AGE)
                .error("You must be at least 18 years old"),
        )
        .field(
            "residentialLine1",
            |r: &FormRecord| r.residential_line1.as_str(),
            Schema::string().non_empty().error("Street 1 is required"),
        )
        .field(
            "residentialLine2",
            |r: &FormRecord| r.residential_line2.as_str(),
            Schema::string().non_empty().error("Street 2 is required"),
        )
        .field(
            "documents",
            |r: &FormRecord| r.documents.as_slice(),
            Schema::list(document_schema(options))
                .min_len(options.min_documents)
                .error(min_documents_message(options.min_documents)),
        )
        .require_if(
            |r| !r.same_as_residential,
            "permanentLine1",
            |r| r.permanent_line1.as_str(),
            "Street 1 is required",
        )
        .require_if(
            |r| !r.same_as_residential,
            "permanentLine2",
            |r| r.permanent_line2.as_str(),
            "Street 2 is required",
        )
        .each(
            "documents",
            |r| r.documents.as_slice(),
            declared_type_matches_extension,
        )
}

/// Two address lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub line1: String,
    pub line2: String,
}

impl Address {
    /// Both lines separated by one space.
    pub fn joined(&self) -> String {
        format!("{} {}", self.line1, self.line2)
    }
}

/// A document entry that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDocument {
    pub file_name: String,
    pub declared_type: DocumentType,
    pub file: AttachedFile,
}

/// A record that passed every rule.
///
/// Only [`FormValidator::validate`] constructs one, so holding a
/// `ValidRecord` proves the data was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    first_name: String,
    last_name: String,
    email: String,
    date_of_birth: NaiveDate,
    residential: Address,
    permanent: Option<Address>,
    documents: Vec<ValidDocument>,
}

impl ValidRecord {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// First and last name separated by one space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn residential(&self) -> &Address {
        &self.residential
    }

    /// The permanent address, or `None` when it is the residential one.
    pub fn permanent(&self) -> Option<&Address> {
        self.permanent.as_ref()
    }

    pub fn same_as_residential(&self) -> bool {
        self.permanent.is_none()
    }

    pub fn documents(&self) -> &[ValidDocument] {
        &self.documents
    }

    /// Builds the typed record from one whose rules passed.
    ///
    /// A schema that does not require the date, declared types or files can
    /// let a record through without them; those gaps are reported here.
    fn from_checked(record: &FormRecord) -> Result<Self, FieldErrors> {
        let missing_date = || {
            FieldError::new(FieldPath::from_field("dateOfBirth"), "Date of birth is required")
                .with_code("required")
        };
        let mut errors = Vec::new();
        if record.date_of_birth.is_none() {
            errors.push(missing_date());
        }

        let documents_path = FieldPath::from_field("documents");
        let mut documents = Vec::with_capacity(record.documents.len());
        for (index, entry) in record.documents.iter().enumerate() {
            let entry_path = documents_path.push_index(index);
            let declared_type = DocumentType::from_mime(&entry.declared_type);
            if declared_type.is_none() {
                errors.push(
                    FieldError::new(entry_path.push_field("fileType"), "File type is required")
                        .with_code("required"),
                );
            }
            if entry.file.is_none() {
                errors.push(
                    FieldError::new(entry_path.push_field("file"), "File is required")
                        .with_code("required"),
                );
            }
            if let (Some(declared_type), Some(file)) = (declared_type, &entry.file) {
                documents.push(ValidDocument {
                    file_name: entry.file_name.clone(),
                    declared_type,
                    file: file.clone(),
                });
            }
        }

        let date_of_birth = match (record.date_of_birth, FieldErrors::from_vec(errors)) {
            (_, Some(errors)) => return Err(errors),
            (Some(date), None) => date,
            (None, None) => return Err(FieldErrors::single(missing_date())),
        };

        let permanent = (!record.same_as_residential).then(|| Address {
            line1: record.permanent_line1.clone(),
            line2: record.permanent_line2.clone(),
        });

        Ok(Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            date_of_birth,
            residential: Address {
                line1: record.residential_line1.clone(),
                line2: record.residential_line2.clone(),
            },
            permanent,
            documents,
        })
    }
}

/// A built form rule set, reusable across validation passes.
pub struct FormValidator {
    schema: ObjectSchema<FormRecord>,
    options: FormSchemaOptions,
}

impl FormValidator {
    /// Builds the standard rule set with the given options.
    pub fn new(options: FormSchemaOptions) -> Self {
        Self::with_schema(form_schema(&options), options)
    }

    /// Uses a caller-supplied rule set, e.g. [`form_schema`] extended with
    /// extra `custom` rules.
    pub fn with_schema(schema: ObjectSchema<FormRecord>, options: FormSchemaOptions) -> Self {
        Self { schema, options }
    }

    pub fn options(&self) -> &FormSchemaOptions {
        &self.options
    }

    /// Checks `record` against every rule.
    ///
    /// Pure: the record is not modified and the same record and context
    /// always produce the same errors, in the same order.
    pub fn validate(
        &self,
        record: &FormRecord,
        ctx: &ValidationContext,
    ) -> Result<ValidRecord, FieldErrors> {
        validate_with(&self.schema, record, ctx)
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(FormSchemaOptions::default())
    }
}

/// Validates against an arbitrary rule set for [`FormRecord`].
pub fn validate_with(
    schema: &ObjectSchema<FormRecord>,
    record: &FormRecord,
    ctx: &ValidationContext,
) -> Result<ValidRecord, FieldErrors> {
    match schema.validate(record, &FieldPath::root(), ctx) {
        Validation::Success(()) => ValidRecord::from_checked(record),
        Validation::Failure(errors) => {
            tracing::debug!(error_count = errors.len(), "form validation failed");
            Err(errors)
        }
    }
}

/// Validates with the default rule set against today's date.
pub fn validate(record: &FormRecord) -> Result<ValidRecord, FieldErrors> {
    validate_at(record, &ValidationContext::now())
}

/// Validates with the default rule set against the context's date.
pub fn validate_at(
    record: &FormRecord,
    ctx: &ValidationContext,
) -> Result<ValidRecord, FieldErrors> {
    FormValidator::default().validate(record, ctx)
}
