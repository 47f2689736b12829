//! Change preview workflow for the entry console.
//!
//! Ties the codec and the diff engine to a [`DocumentStore`]: an edit form is
//! encoded, diffed against the stored original, shown for review, and saved
//! only on confirmation. This is the main entry point for applications that
//! embed the console core.

pub mod error;
pub mod form;
pub mod session;
pub mod workflow;

pub use error::{PreviewError, PreviewResult};
pub use form::{EntryForm, PreviewMode};
pub use session::PreviewSession;
pub use workflow::ChangePreviewWorkflow;

// Re-export key types
pub use entry_codec::FrontMatterCodec;
pub use entry_diff::{ChangeKind, DiffHunk, DiffLine, LineDiff};
pub use entry_store::{DocumentStore, StoreError};
pub use entry_types::{Document, DocumentMetadata, Entry, EntryId};
