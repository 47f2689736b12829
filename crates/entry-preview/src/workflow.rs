use entry_codec::FrontMatterCodec;
use entry_diff::diff_texts;
use entry_store::DocumentStore;
use entry_types::{Document, Entry, EntryId};
use tracing::{debug, info, warn};

use crate::error::{PreviewError, PreviewResult};
use crate::form::{EntryForm, PreviewMode};
use crate::session::PreviewSession;

/// Builds change previews and commits them to a store.
///
/// Holds no state besides the store. Each `prepare` performs one fetch at
/// most, one encode per side, and one diff.
pub struct ChangePreviewWorkflow<S> {
    store: S,
}

impl<S: DocumentStore> ChangePreviewWorkflow<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Encode the form, diff it against the stored original, and return the
    /// preview. Nothing is written.
    ///
    /// # Errors
    ///
    /// - `InvalidForm` if the title is blank.
    /// - `EntryNotFound` when editing an id the store does not have.
    /// - `Store` for any store failure other than a missing entry.
    pub fn prepare(&self, mode: PreviewMode, form: EntryForm) -> PreviewResult<PreviewSession> {
        form.validate()?;
        let original = self.load_original(mode)?;

        let metadata = form.to_metadata(mode, original.as_ref().map(|e| &e.document.metadata));
        let candidate = Document::new(metadata, form.content.clone());

        let original_text = original
            .as_ref()
            .map(|e| FrontMatterCodec::encode_document(&e.document))
            .unwrap_or_default();
        let candidate_text = FrontMatterCodec::encode_document(&candidate);
        let diff = diff_texts(&original_text, &candidate_text);

        info!(
            target_id = ?mode.target_id(),
            existing = original.is_some(),
            added = diff.additions(),
            deleted = diff.deletions(),
            "prepared change preview"
        );

        Ok(PreviewSession {
            mode,
            form,
            original,
            original_text,
            candidate,
            candidate_text,
            diff,
        })
    }

    /// Save the previewed document.
    ///
    /// # Errors
    ///
    /// Store failures are returned as `Store`; the session is unchanged and
    /// may be confirmed again.
    pub fn confirm(&self, session: &PreviewSession) -> PreviewResult<Entry> {
        let target = session.mode.target_id();
        let entry = self
            .store
            .save(target, &session.candidate)
            .inspect_err(|e| {
                warn!(target_id = ?target, error = %e, "saving previewed entry failed")
            })?;
        info!(id = %entry.entry_id, "saved previewed entry");
        Ok(entry)
    }

    fn load_original(&self, mode: PreviewMode) -> PreviewResult<Option<Entry>> {
        match mode {
            PreviewMode::Create { entry_id: None } => Ok(None),
            PreviewMode::Create { entry_id: Some(id) } => {
                let found = self.store.fetch(id)?;
                debug!(id = %id, existing = found.is_some(), "checked create target");
                Ok(found)
            }
            PreviewMode::Edit { entry_id, .. } => self.fetch_existing(entry_id).map(Some),
        }
    }

    fn fetch_existing(&self, id: EntryId) -> PreviewResult<Entry> {
        match self.store.fetch(id) {
            Ok(Some(entry)) => Ok(entry),
            Ok(None) => Err(PreviewError::EntryNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}
