//! Foundation types for the entry console.
//!
//! Every other entry crate depends on `entry-types`. The types here are plain
//! data: they carry no I/O and no encoding logic.
//!
//! # Key Types
//!
//! - [`DocumentMetadata`] -- The front matter header (title, summary, categories, tags, timestamps)
//! - [`Category`] / [`Tag`] -- Ordered classification records
//! - [`Document`] -- Metadata paired with a free-form body
//! - [`EntryId`] / [`Entry`] -- A stored document and its identifier

pub mod document;
pub mod error;
pub mod metadata;

pub use document::{Document, Entry, EntryId};
pub use error::TypeError;
pub use metadata::{Category, DocumentMetadata, Tag};
