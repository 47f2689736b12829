use entry_types::EntryId;

/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data exists but cannot be used.
    #[error("corrupt entry {id}: {reason}")]
    Corrupt { id: EntryId, reason: String },

    /// The tenant name cannot be used as a storage location.
    #[error("invalid tenant: {0:?}")]
    InvalidTenant(String),

    /// Storage backend is read-only or otherwise refuses writes.
    #[error("store is read-only")]
    ReadOnly,

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
