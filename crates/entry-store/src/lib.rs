//! Document store collaborators for the entry console.
//!
//! The preview workflow reads the stored original of an entry and hands the
//! confirmed edit back for saving through the [`DocumentStore`] trait. Two
//! backends are provided:
//!
//! - [`InMemoryDocumentStore`] -- `BTreeMap` behind a `RwLock`, for tests and embedding
//! - [`DirectoryStore`] -- one encoded `<id>.md` file per entry under `<root>/<tenant>/`

pub mod catalog;
pub mod directory;
pub mod error;
pub mod memory;
pub mod traits;

pub use catalog::TagCount;
pub use directory::{DirectoryStore, DEFAULT_TENANT};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDocumentStore;
pub use traits::DocumentStore;
