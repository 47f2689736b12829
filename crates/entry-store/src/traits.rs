use entry_types::{Category, Document, Entry, EntryId};

use crate::catalog::{self, TagCount};
use crate::error::StoreResult;

/// Persistence collaborator for entries.
///
/// All implementations must satisfy these invariants:
/// - `fetch` of an id that was never saved returns `Ok(None)`, not an error.
/// - `save(None, ..)` assigns a fresh id one past the largest id in use,
///   starting at 1.
/// - `save(Some(id), ..)` creates or replaces the entry at `id`.
/// - `list` returns every stored entry in ascending id order.
/// - Failures are returned, never silently ignored, and leave previously
///   stored entries intact.
pub trait DocumentStore: Send + Sync {
    /// Read an entry by id.
    fn fetch(&self, id: EntryId) -> StoreResult<Option<Entry>>;

    /// Store a document and return the entry as the store now holds it.
    fn save(&self, id: Option<EntryId>, document: &Document) -> StoreResult<Entry>;

    /// All stored entries, ascending by id.
    fn list(&self) -> StoreResult<Vec<Entry>>;

    /// Remove an entry. Returns `true` if it existed.
    fn delete(&self, id: EntryId) -> StoreResult<bool>;

    /// Every tag in use with the number of entries carrying it, by name.
    fn tag_counts(&self) -> StoreResult<Vec<TagCount>> {
        Ok(catalog::tag_counts(&self.list()?))
    }

    /// Distinct non-empty category paths in use, sorted.
    fn category_paths(&self) -> StoreResult<Vec<Vec<Category>>> {
        Ok(catalog::category_paths(&self.list()?))
    }
}
