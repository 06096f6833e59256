//! Schema definitions for validation.
//!
//! This module provides rule builders for the value types a form holds.
//! Each schema accumulates all validation errors rather than short-circuiting
//! on the first failure, and schemas compose: an [`ObjectSchema`] holds
//! per-field schemas, a [`ListSchema`] holds an item schema.
//!
//! # Example
//!
//! ```rust
//! use paperwork::{FieldPath, Schema, SchemaLike, ValidationContext};
//!
//! struct Contact {
//!     name: String,
//!     email: String,
//! }
//!
//! let schema = Schema::object::<Contact>()
//!     .field("name", |c: &Contact| c.name.as_str(), Schema::string().non_empty())
//!     .field("email", |c: &Contact| c.email.as_str(), Schema::string().email());
//!
//! let contact = Contact { name: String::new(), email: "nope".into() };
//! let result = schema.validate(&contact, &FieldPath::root(), &ValidationContext::now());
//! assert_eq!(result.into_result().unwrap_err().len(), 2);
//! ```

mod date;
mod file;
mod list;
mod object;
mod string;
mod traits;

pub use date::{age_in_years, DateSchema};
pub use file::FileSchema;
pub use list::ListSchema;
pub use object::ObjectSchema;
pub use string::StringSchema;
pub use traits::SchemaLike;

/// Entry point for creating validation schemas.
///
/// `Schema` provides factory methods for the schema types. Each supports
/// constraints through a builder pattern, with `.error(..)` overriding the
/// message of the constraint added just before it.
pub struct Schema;

impl Schema {
    /// Creates a new string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a new schema for an optional calendar date.
    pub fn date() -> DateSchema {
        DateSchema::new()
    }

    /// Creates a new schema for an optional attached file.
    pub fn file() -> FileSchema {
        FileSchema::new()
    }

    /// Creates a new list schema whose items are checked by `item`.
    pub fn list<S>(item: S) -> ListSchema<S> {
        ListSchema::new(item)
    }

    /// Creates a new schema for struct values of type `T`.
    pub fn object<T: 'static>() -> ObjectSchema<T> {
        ObjectSchema::new()
    }
}
