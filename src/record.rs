//! The in-memory form record and its document list.
//!
//! [`FormRecord`] holds exactly what the user typed, in UI shape: strings may
//! be empty, the date and files may be missing, and declared file types are
//! raw MIME strings. Validation turns it into a [`ValidRecord`](crate::ValidRecord).

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use chrono::NaiveDate;

/// Upper bound for a single attached file, in bytes.
pub const MAX_FILE_SIZE: usize = 5_000_000;

/// The file types a document may be declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Pdf,
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl DocumentType {
    /// Every allowed type, in the order a UI should offer them.
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Pdf,
        DocumentType::Png,
        DocumentType::Jpeg,
        DocumentType::Gif,
        DocumentType::Webp,
    ];

    /// The MIME string, e.g. `image/png`.
    pub fn mime(self) -> &'static str {
        match self {
            DocumentType::Pdf => "application/pdf",
            DocumentType::Png => "image/png",
            DocumentType::Jpeg => "image/jpeg",
            DocumentType::Gif => "image/gif",
            DocumentType::Webp => "image/webp",
        }
    }

    /// The subtype half of the MIME string, e.g. `png`.
    ///
    /// A file declared as this type must carry this extension.
    pub fn subtype(self) -> &'static str {
        match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Png => "png",
            DocumentType::Jpeg => "jpeg",
            DocumentType::Gif => "gif",
            DocumentType::Webp => "webp",
        }
    }

    /// Looks up a type by its exact MIME string.
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.mime() == mime)
    }

    /// Guesses a type from a file extension (case-insensitive, `jpg` included).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentType::Pdf),
            "png" => Some(DocumentType::Png),
            "jpg" | "jpeg" => Some(DocumentType::Jpeg),
            "gif" => Some(DocumentType::Gif),
            "webp" => Some(DocumentType::Webp),
            _ => None,
        }
    }

    /// All allowed MIME strings.
    pub fn allowed_mimes() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.mime()).collect()
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// A file picked by the user, as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    /// The real filename, extension included.
    pub file_name: String,
    /// The MIME type reported for the file.
    pub mime_type: String,
    /// File contents.
    pub bytes: Bytes,
}

impl AttachedFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk.
    ///
    /// The MIME type is derived from the extension for the allowed document
    /// types and falls back to `application/octet-stream`.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let mime_type = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(DocumentType::from_extension)
            .map(DocumentType::mime)
            .unwrap_or("application/octet-stream");

        tracing::debug!(file = %file_name, size = bytes.len(), mime = mime_type, "read attachment");
        Ok(Self::new(file_name, mime_type, bytes))
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Lowercased extension of the real filename, if it has one.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }
}

/// One uploaded document plus its declared metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentEntry {
    /// User-supplied label, independent of the real filename.
    pub file_name: String,
    /// Declared MIME type, as chosen in the UI. Empty until chosen.
    pub declared_type: String,
    /// The attached file, once picked.
    pub file: Option<AttachedFile>,
}

impl DocumentEntry {
    pub fn new(
        file_name: impl Into<String>,
        declared_type: impl Into<String>,
        file: Option<AttachedFile>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            declared_type: declared_type.into(),
            file,
        }
    }
}

/// Stable identity of a document entry.
///
/// Indices shift when entries are inserted or removed; ids do not, so a UI
/// can key its rows on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

/// Growable, ordered list of document entries with stable ids.
///
/// Two lists are equal when their entries are, whatever ids were handed out.
#[derive(Debug, Clone, Default)]
pub struct DocumentList {
    entries: Vec<DocumentEntry>,
    ids: Vec<EntryId>,
    next_id: u64,
}

impl DocumentList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Appends an entry and returns its id.
    pub fn push(&mut self, entry: DocumentEntry) -> EntryId {
        let id = self.allocate_id();
        self.entries.push(entry);
        self.ids.push(id);
        id
    }

    /// Inserts an entry at `index` (clamped to the list length) and returns its id.
    pub fn insert(&mut self, index: usize, entry: DocumentEntry) -> EntryId {
        let index = index.min(self.entries.len());
        let id = self.allocate_id();
        self.entries.insert(index, entry);
        self.ids.insert(index, id);
        id
    }

    /// Removes the entry at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<DocumentEntry> {
        if index >= self.entries.len() {
            return None;
        }
        self.ids.remove(index);
        Some(self.entries.remove(index))
    }

    /// Removes the entry with the given id, if present.
    pub fn remove_by_id(&mut self, id: EntryId) -> Option<DocumentEntry> {
        let index = self.position(id)?;
        self.remove(index)
    }

    /// Current index of the entry with the given id.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.ids.iter().position(|&i| i == id)
    }

    /// Id of the entry at `index`.
    pub fn id_at(&self, index: usize) -> Option<EntryId> {
        self.ids.get(index).copied()
    }

    pub fn get(&self, index: usize) -> Option<&DocumentEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DocumentEntry> {
        self.entries.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in list order.
    pub fn as_slice(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentEntry> {
        self.entries.iter()
    }

    /// Entries paired with their ids, in list order.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (EntryId, &DocumentEntry)> {
        self.ids.iter().copied().zip(self.entries.iter())
    }
}

impl PartialEq for DocumentList {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for DocumentList {}

impl FromIterator<DocumentEntry> for DocumentList {
    fn from_iter<I: IntoIterator<Item = DocumentEntry>>(iter: I) -> Self {
        let mut list = DocumentList::new();
        for entry in iter {
            list.push(entry);
        }
        list
    }
}

/// Everything the user has entered for one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    /// When set, the permanent address is not validated and not sent.
    pub same_as_residential: bool,
    pub residential_line1: String,
    pub residential_line2: String,
    pub permanent_line1: String,
    pub permanent_line2: String,
    pub documents: DocumentList,
}

impl Default for FormRecord {
    /// An empty form with one blank document row.
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            date_of_birth: None,
            same_as_residential: false,
            residential_line1: String::new(),
            residential_line2: String::new(),
            permanent_line1: String::new(),
            permanent_line2: String::new(),
            documents: std::iter::once(DocumentEntry::default()).collect(),
        }
    }
}
