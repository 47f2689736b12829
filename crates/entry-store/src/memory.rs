use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use entry_types::{Document, Entry, EntryId};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::DocumentStore;

/// In-memory, map-based document store.
///
/// Intended for tests and embedding. Documents are cloned on read and write
/// and lost when the store is dropped.
pub struct InMemoryDocumentStore {
    entries: RwLock<BTreeMap<EntryId, Document>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store pre-populated with documents.
    pub fn with_entries(entries: impl IntoIterator<Item = (EntryId, Document)>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
        }
    }

    /// Number of stored entries.
    ///
    /// Counts through a poisoned lock. Writers never leave the map half
    /// updated, so the count stays accurate; `fetch` and `save` still report
    /// the poisoning as `StoreError::Backend`.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Backend(format!("lock poisoned: {e}"))
}

impl DocumentStore for InMemoryDocumentStore {
    fn fetch(&self, id: EntryId) -> StoreResult<Option<Entry>> {
        let map = self.entries.read().map_err(poisoned)?;
        Ok(map.get(&id).map(|document| Entry {
            entry_id: id,
            document: document.clone(),
        }))
    }

    fn save(&self, id: Option<EntryId>, document: &Document) -> StoreResult<Entry> {
        let mut map = self.entries.write().map_err(poisoned)?;
        let entry_id = match id {
            Some(id) => id,
            None => map
                .keys()
                .next_back()
                .map_or_else(EntryId::first, |last| last.next()),
        };
        let replaced = map.insert(entry_id, document.clone()).is_some();
        debug!(id = %entry_id, replaced, "saved entry in memory");
        Ok(Entry {
            entry_id,
            document: document.clone(),
        })
    }

    fn list(&self) -> StoreResult<Vec<Entry>> {
        let map = self.entries.read().map_err(poisoned)?;
        Ok(map
            .iter()
            .map(|(&entry_id, document)| Entry {
                entry_id,
                document: document.clone(),
            })
            .collect())
    }

    fn delete(&self, id: EntryId) -> StoreResult<bool> {
        let mut map = self.entries.write().map_err(poisoned)?;
        let removed = map.remove(&id).is_some();
        debug!(id = %id, removed, "deleted entry from memory");
        Ok(removed)
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("entry_count", &self.len())
            .finish()
    }
}
