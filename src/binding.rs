//! Path-addressed access to a form record, for UI field controllers.
//!
//! A UI input binds to one [`FieldPath`], reads and writes its value as a
//! [`FieldValue`], and shows whatever errors are attached at that path.

use chrono::NaiveDate;

use crate::error::{BindingError, FieldError, FieldErrors};
use crate::path::{FieldPath, PathSegment};
use crate::record::{AttachedFile, DocumentEntry, FormRecord};

/// The value held by one bound field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Date(Option<NaiveDate>),
    File(Option<AttachedFile>),
}

impl FieldValue {
    /// Name of the kind, as used in [`BindingError::KindMismatch`].
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Bool(_) => "bool",
            FieldValue::Date(_) => "date",
            FieldValue::File(_) => "file",
        }
    }
}

/// A live form that UI fields bind to.
pub trait FieldBinding {
    /// Current value at `path`, or `None` when no field lives there.
    fn get(&self, path: &FieldPath) -> Option<FieldValue>;

    /// Writes `value` at `path`.
    fn set(&mut self, path: &FieldPath, value: FieldValue) -> Result<(), BindingError>;

    /// Replaces the attached errors with `errors`.
    fn attach_errors(&mut self, errors: &FieldErrors);

    /// Errors attached exactly at `path`.
    fn errors_at(&self, path: &FieldPath) -> Vec<&FieldError>;

    fn clear_errors(&mut self);
}

const DOCUMENTS: &str = "documents";

impl FormRecord {
    /// Reads the field at `path`.
    ///
    /// Top-level fields use their form names (`firstName`, `sameAsResidential`,
    /// ...); document fields are `documents[i].fileName`, `.fileType` and
    /// `.file`.
    pub fn get_field(&self, path: &FieldPath) -> Option<FieldValue> {
        match path.as_slice() {
            [PathSegment::Field(name)] => match name.as_str() {
                "sameAsResidential" => Some(FieldValue::Bool(self.same_as_residential)),
                "dateOfBirth" => Some(FieldValue::Date(self.date_of_birth)),
                other => self.text_field(other).cloned().map(FieldValue::Text),
            },
            [PathSegment::Field(list), PathSegment::Index(index), PathSegment::Field(name)]
                if list == DOCUMENTS =>
            {
                let entry = self.documents.get(*index)?;
                match name.as_str() {
                    "fileName" => Some(FieldValue::Text(entry.file_name.clone())),
                    "fileType" => Some(FieldValue::Text(entry.declared_type.clone())),
                    "file" => Some(FieldValue::File(entry.file.clone())),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Writes the field at `path`. The value kind must match the field.
    pub fn set_field(&mut self, path: &FieldPath, value: FieldValue) -> Result<(), BindingError> {
        let mismatch = |expected| BindingError::KindMismatch {
            path: path.clone(),
            expected,
        };
        let unknown = || BindingError::UnknownPath(path.clone());

        match path.as_slice() {
            [PathSegment::Field(name)] => match (name.as_str(), value) {
                ("sameAsResidential", FieldValue::Bool(v)) => self.same_as_residential = v,
                ("sameAsResidential", _) => return Err(mismatch("bool")),
                ("dateOfBirth", FieldValue::Date(v)) => self.date_of_birth = v,
                ("dateOfBirth", _) => return Err(mismatch("date")),
                (other, value) => {
                    let slot = self.text_field_mut(other).ok_or_else(unknown)?;
                    match value {
                        FieldValue::Text(v) => *slot = v,
                        _ => return Err(mismatch("text")),
                    }
                }
            },
            [PathSegment::Field(list), PathSegment::Index(index), PathSegment::Field(name)]
                if list == DOCUMENTS =>
            {
                let entry = self.documents.get_mut(*index).ok_or_else(unknown)?;
                set_document_field(entry, name, value).map_err(|e| match e {
                    Some(expected) => mismatch(expected),
                    None => unknown(),
                })?;
            }
            _ => return Err(unknown()),
        }
        Ok(())
    }

    fn text_field(&self, name: &str) -> Option<&String> {
        Some(match name {
            "firstName" => &self.first_name,
            "lastName" => &self.last_name,
            "email" => &self.email,
            "residentialLine1" => &self.residential_line1,
            "residentialLine2" => &self.residential_line2,
            "permanentLine1" => &self.permanent_line1,
            "permanentLine2" => &self.permanent_line2,
            _ => return None,
        })
    }

    fn text_field_mut(&mut self, name: &str) -> Option<&mut String> {
        Some(match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "residentialLine1" => &mut self.residential_line1,
            "residentialLine2" => &mut self.residential_line2,
            "permanentLine1" => &mut self.permanent_line1,
            "permanentLine2" => &mut self.permanent_line2,
            _ => return None,
        })
    }
}

/// `Err(None)` for an unknown field, `Err(Some(kind))` for a kind mismatch.
fn set_document_field(
    entry: &mut DocumentEntry,
    name: &str,
    value: FieldValue,
) -> Result<(), Option<&'static str>> {
    match (name, value) {
        ("fileName", FieldValue::Text(v)) => entry.file_name = v,
        ("fileType", FieldValue::Text(v)) => entry.declared_type = v,
        ("file", FieldValue::File(v)) => entry.file = v,
        ("fileName" | "fileType", _) => return Err(Some("text")),
        ("file", _) => return Err(Some("file")),
        _ => return Err(None),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> FieldPath {
        FieldPath::parse(s).unwrap()
    }

    #[test]
    fn test_get_and_set_text() {
        let mut record = FormRecord::default();
        record
            .set_field(&path("firstName"), FieldValue::Text("Ada".into()))
            .unwrap();
        assert_eq!(record.first_name, "Ada");
        assert_eq!(
            record.get_field(&path("firstName")),
            Some(FieldValue::Text("Ada".into()))
        );
    }

    #[test]
    fn test_document_fields() {
        let mut record = FormRecord::default();
        let file = AttachedFile::new("scan.pdf", "application/pdf", vec![1, 2]);
        record
            .set_field(&path("documents[0].file"), FieldValue::File(Some(file.clone())))
            .unwrap();
        record
            .set_field(&path("documents[0].fileType"), FieldValue::Text("application/pdf".into()))
            .unwrap();

        assert_eq!(
            record.get_field(&path("documents[0].file")),
            Some(FieldValue::File(Some(file)))
        );
        assert_eq!(record.documents.get(0).unwrap().declared_type, "application/pdf");
        assert_eq!(record.get_field(&path("documents[1].file")), None);
    }

    #[test]
    fn test_unknown_path() {
        let mut record = FormRecord::default();
        assert_eq!(
            record.set_field(&path("nickname"), FieldValue::Text("x".into())),
            Err(BindingError::UnknownPath(path("nickname")))
        );
        assert_eq!(
            record.set_field(&path("documents[3].fileName"), FieldValue::Text("x".into())),
            Err(BindingError::UnknownPath(path("documents[3].fileName")))
        );
        assert_eq!(record.get_field(&path("documents[0].size")), None);
    }

    #[test]
    fn test_kind_mismatch() {
        let mut record = FormRecord::default();
        let err = record
            .set_field(&path("sameAsResidential"), FieldValue::Text("yes".into()))
            .unwrap_err();
        assert_eq!(
            err,
            BindingError::KindMismatch {
                path: path("sameAsResidential"),
                expected: "bool"
            }
        );

        let err = record
            .set_field(&path("documents[0].file"), FieldValue::Bool(true))
            .unwrap_err();
        assert!(matches!(err, BindingError::KindMismatch { expected: "file", .. }));
        assert_eq!(FieldValue::Bool(true).kind(), "bool");
    }
}
