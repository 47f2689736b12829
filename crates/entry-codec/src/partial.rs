use entry_types::{Category, DocumentMetadata, Tag};
use serde::{Deserialize, Serialize};

/// Metadata recovered from a header, field by field.
///
/// `None` means the key never appeared (or its value was not recognised);
/// `Some(vec![])` means it appeared with an empty list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl PartialMetadata {
    /// Returns `true` if no field was recovered.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.summary.is_none()
            && self.categories.is_none()
            && self.tags.is_none()
            && self.date.is_none()
            && self.updated.is_none()
    }

    /// Fill in defaults for missing fields: empty title, empty lists.
    pub fn into_metadata(self) -> DocumentMetadata {
        DocumentMetadata {
            title: self.title.unwrap_or_default(),
            summary: self.summary,
            categories: self.categories.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            date: self.date,
            updated: self.updated,
        }
    }
}

impl From<PartialMetadata> for DocumentMetadata {
    fn from(partial: PartialMetadata) -> Self {
        partial.into_metadata()
    }
}
