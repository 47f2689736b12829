use entry_types::{Category, DocumentMetadata, EntryId, Tag};
use serde::{Deserialize, Serialize};

use crate::error::{PreviewError, PreviewResult};

/// What the edit is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum PreviewMode {
    /// A new entry, optionally at a caller-chosen id. If an entry already
    /// exists at that id the preview diffs against it and saving replaces it.
    #[serde(rename_all = "camelCase")]
    Create { entry_id: Option<EntryId> },
    /// An edit of an existing entry. With `update_timestamp` unset the stored
    /// `updated` value is kept.
    #[serde(rename_all = "camelCase")]
    Edit {
        entry_id: EntryId,
        update_timestamp: bool,
    },
}

impl PreviewMode {
    /// The id a confirmed save goes to; `None` lets the store pick one.
    pub fn target_id(&self) -> Option<EntryId> {
        match *self {
            PreviewMode::Create { entry_id } => entry_id,
            PreviewMode::Edit { entry_id, .. } => Some(entry_id),
        }
    }
}

/// The raw fields of the edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryForm {
    pub title: String,
    pub summary: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub content: String,
}

impl EntryForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(name.into());
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(name.into());
        self
    }

    pub(crate) fn validate(&self) -> PreviewResult<()> {
        if self.title.trim().is_empty() {
            return Err(PreviewError::InvalidForm("title is required".into()));
        }
        Ok(())
    }

    /// Build the candidate metadata.
    ///
    /// `stored` is the metadata of the entry being edited. Its `date` is
    /// carried over in edit mode, and its `updated` too unless the edit asks
    /// for a new timestamp. Create mode carries neither.
    pub(crate) fn to_metadata(
        &self,
        mode: PreviewMode,
        stored: Option<&DocumentMetadata>,
    ) -> DocumentMetadata {
        let mut metadata = DocumentMetadata {
            title: self.title.clone(),
            summary: Some(self.summary.clone()).filter(|s| !s.is_empty()),
            categories: names(&self.categories).map(Category::new).collect(),
            tags: names(&self.tags).map(Tag::new).collect(),
            date: None,
            updated: None,
        };

        if let (PreviewMode::Edit { update_timestamp, .. }, Some(stored)) = (mode, stored) {
            metadata.date = stored.date.clone();
            if !update_timestamp {
                metadata.updated = stored.updated.clone();
            }
        }
        metadata
    }
}

fn names(raw: &[String]) -> impl Iterator<Item = &str> {
    raw.iter().map(|n| n.trim()).filter(|n| !n.is_empty())
}
