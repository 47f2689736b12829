use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::metadata::DocumentMetadata;

/// Positive numeric identifier of a stored entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct EntryId(u64);

impl EntryId {
    /// Wrap a raw id. Zero is not a valid entry id.
    pub fn new(raw: u64) -> Result<Self, TypeError> {
        if raw == 0 {
            return Err(TypeError::InvalidEntryId("0".into()));
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The first id handed out by an empty store.
    pub fn first() -> Self {
        Self(1)
    }
}

impl TryFrom<u64> for EntryId {
    type Error = TypeError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<EntryId> for u64 {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

impl FromStr for EntryId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u64 = s
            .trim()
            .parse()
            .map_err(|_| TypeError::InvalidEntryId(s.to_string()))?;
        Self::new(raw)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A metadata header paired with its free-form body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: DocumentMetadata,
    pub body: String,
}

impl Document {
    pub fn new(metadata: DocumentMetadata, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }
}

/// A document as held by a store, together with its id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub entry_id: EntryId,
    pub document: Document,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_id_rejected() {
        assert_eq!(
            EntryId::new(0),
            Err(TypeError::InvalidEntryId("0".into()))
        );
        assert!("0".parse::<EntryId>().is_err());
    }

    #[test]
    fn parse_and_display() {
        let id: EntryId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:>4}"), "  42");
        assert_eq!(id.next().get(), 43);
    }

    #[test]
    fn non_numeric_id_rejected() {
        let err = "abc".parse::<EntryId>().unwrap_err();
        assert_eq!(err.to_string(), "invalid entry id: abc");
    }

    #[test]
    fn entry_id_serializes_as_number() {
        let entry = Entry {
            entry_id: EntryId::new(7).unwrap(),
            document: Document::new(DocumentMetadata::new("t"), "b"),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["entryId"], 7);
        let back: Entry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn zero_id_rejected_on_deserialize() {
        assert!(serde_json::from_str::<EntryId>("0").is_err());
    }
}
