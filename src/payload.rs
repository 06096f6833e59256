//! Mapping a validated record onto the multipart wire shape.

use chrono::NaiveDate;

use crate::form::ValidRecord;
use crate::record::AttachedFile;

/// One value in a [`WirePayload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadValue {
    Text(String),
    File(AttachedFile),
}

impl PayloadValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PayloadValue::Text(text) => Some(text),
            PayloadValue::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&AttachedFile> {
        match self {
            PayloadValue::File(file) => Some(file),
            PayloadValue::Text(_) => None,
        }
    }
}

/// An ordered sequence of key/value parts. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WirePayload {
    parts: Vec<(String, PayloadValue)>,
}

impl WirePayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parts
            .push((key.into(), PayloadValue::Text(value.into())));
    }

    pub fn push_file(&mut self, key: impl Into<String>, file: AttachedFile) {
        self.parts.push((key.into(), PayloadValue::File(file)));
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Parts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.parts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Every value stored under `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a PayloadValue> + 'a {
        self.iter().filter(move |(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in order, repeats included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(k, _)| k.as_str())
    }

    pub fn into_parts(self) -> Vec<(String, PayloadValue)> {
        self.parts
    }
}

impl IntoIterator for WirePayload {
    type Item = (String, PayloadValue);
    type IntoIter = std::vec::IntoIter<(String, PayloadValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

/// Renders a birth date as UTC midnight in ISO-8601, e.g. `1990-04-01T00:00:00.000Z`.
pub fn format_dob(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

/// Builds the outgoing payload.
///
/// Key order: `name`, `dob`, `email`, `residentialAddress`,
/// `sameAsResidential`, `permanentAddress` (only when the addresses differ),
/// then `documentsFileName`, `documentsFileType` and `documents` once per
/// document in list order.
pub fn assemble(record: &ValidRecord) -> WirePayload {
    let mut payload = WirePayload::new();
    payload.push_text("name", record.full_name());
    payload.push_text("dob", format_dob(record.date_of_birth()));
    payload.push_text("email", record.email());
    payload.push_text("residentialAddress", record.residential().joined());
    payload.push_text(
        "sameAsResidential",
        record.same_as_residential().to_string(),
    );
    if let Some(permanent) = record.permanent() {
        payload.push_text("permanentAddress", permanent.joined());
    }

    for document in record.documents() {
        payload.push_text("documentsFileName", document.file_name.as_str());
        payload.push_text("documentsFileType", document.declared_type.mime());
        payload.push_file("documents", document.file.clone());
    }

    payload
}
