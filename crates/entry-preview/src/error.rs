use entry_types::EntryId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("invalid form: {0}")]
    InvalidForm(String),

    #[error("store error: {0}")]
    Store(#[from] entry_store::StoreError),
}

pub type PreviewResult<T> = Result<T, PreviewError>;
