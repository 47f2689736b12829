use entry_diff::LineDiff;
use entry_types::{Document, Entry};

use crate::form::{EntryForm, PreviewMode};

/// A prepared change preview, ready for review and confirmation.
///
/// Confirming borrows the session, so a failed save leaves it untouched and
/// the same preview can be confirmed again.
#[derive(Clone, Debug)]
pub struct PreviewSession {
    pub(crate) mode: PreviewMode,
    pub(crate) form: EntryForm,
    pub(crate) original: Option<Entry>,
    pub(crate) original_text: String,
    pub(crate) candidate: Document,
    pub(crate) candidate_text: String,
    pub(crate) diff: LineDiff,
}

impl PreviewSession {
    pub fn mode(&self) -> PreviewMode {
        self.mode
    }

    /// The form the preview was built from.
    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    /// The stored entry the edit is compared against, if there is one.
    pub fn original(&self) -> Option<&Entry> {
        self.original.as_ref()
    }

    /// Encoded text of the stored entry; empty for a new entry.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// The document that confirming will save.
    pub fn candidate(&self) -> &Document {
        &self.candidate
    }

    /// Encoded text of the candidate document.
    pub fn candidate_text(&self) -> &str {
        &self.candidate_text
    }

    pub fn diff(&self) -> &LineDiff {
        &self.diff
    }

    /// Whether saving would change anything.
    pub fn has_changes(&self) -> bool {
        !self.diff.is_identical()
    }

    /// Heading for the review screen.
    pub fn title(&self) -> String {
        match (self.mode, &self.original) {
            (PreviewMode::Edit { .. }, _) => "Review Changes".to_string(),
            (PreviewMode::Create { .. }, Some(existing)) => {
                format!("Review Changes for Entry {}", existing.entry_id)
            }
            (PreviewMode::Create { .. }, None) => "Review New Entry".to_string(),
        }
    }
}
