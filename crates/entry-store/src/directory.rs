//! Directory-backed entry storage.
//!
//! Layout: `<root>/<tenant>/<id>.md`, each file holding the front matter
//! encoding of one entry. Writes go to a temporary file in the tenant
//! directory that is then renamed over the target, so a reader sees either
//! the old or the new entry, never a partial one.
//!
//! Entries are read back through the codec, which does not carry tag
//! versions. A versioned tag therefore comes back bare.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use entry_codec::FrontMatterCodec;
use entry_types::{Document, Entry, EntryId};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::DocumentStore;

/// Tenant used when none is configured.
pub const DEFAULT_TENANT: &str = "_";

const EXTENSION: &str = "md";

/// Stores each entry as an encoded text file.
#[derive(Clone, Debug)]
pub struct DirectoryStore {
    root: PathBuf,
    tenant: String,
}

impl DirectoryStore {
    /// Open a store for `tenant` under `root`.
    ///
    /// The tenant becomes a directory name, so it must be non-empty and may
    /// not contain path separators or be `.`/`..`. Directories are created
    /// lazily on first save.
    pub fn open(root: impl Into<PathBuf>, tenant: impl Into<String>) -> StoreResult<Self> {
        let tenant = tenant.into();
        validate_tenant(&tenant)?;
        Ok(Self {
            root: root.into(),
            tenant,
        })
    }

    /// Open a store for the default tenant.
    pub fn open_default(root: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open(root, DEFAULT_TENANT)
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Directory holding this tenant's entries.
    pub fn tenant_dir(&self) -> PathBuf {
        self.root.join(&self.tenant)
    }

    /// Path of the file for `id`.
    pub fn entry_path(&self, id: EntryId) -> PathBuf {
        self.tenant_dir().join(format!("{id}.{EXTENSION}"))
    }

    /// All entry ids present on disk, ascending. Files whose stem is not a
    /// valid id are skipped.
    pub fn ids(&self) -> StoreResult<Vec<EntryId>> {
        let dir = self.tenant_dir();
        let listing = match fs::read_dir(&dir) {
            Ok(listing) => listing,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for item in listing {
            let path = item?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            match parse_stem(&path) {
                Some(id) => ids.push(id),
                None => warn!(path = %path.display(), "skipping file with non-numeric name"),
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn next_id(&self) -> StoreResult<EntryId> {
        Ok(self
            .ids()?
            .last()
            .map_or_else(EntryId::first, |last| last.next()))
    }
}

fn validate_tenant(tenant: &str) -> StoreResult<()> {
    let bad = tenant.is_empty()
        || tenant == "."
        || tenant == ".."
        || tenant.contains(|c: char| c == '/' || c == '\\' || c == '\0');
    if bad {
        return Err(StoreError::InvalidTenant(tenant.to_string()));
    }
    Ok(())
}

fn parse_stem(path: &Path) -> Option<EntryId> {
    path.file_stem()?.to_str()?.parse().ok()
}

impl DocumentStore for DirectoryStore {
    fn fetch(&self, id: EntryId) -> StoreResult<Option<Entry>> {
        let path = self.entry_path(id);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(StoreError::Corrupt {
                    id,
                    reason: e.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        debug!(id = %id, bytes = text.len(), "read entry file");
        Ok(Some(Entry {
            entry_id: id,
            document: FrontMatterCodec::decode_document(&text),
        }))
    }

    fn save(&self, id: Option<EntryId>, document: &Document) -> StoreResult<Entry> {
        let entry_id = match id {
            Some(id) => id,
            None => self.next_id()?,
        };
        let dir = self.tenant_dir();
        fs::create_dir_all(&dir)?;

        let text = FrontMatterCodec::encode_document(document);
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        let path = self.entry_path(entry_id);
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        debug!(id = %entry_id, path = %path.display(), bytes = text.len(), "wrote entry file");

        Ok(Entry {
            entry_id,
            document: FrontMatterCodec::decode_document(&text),
        })
    }

    fn list(&self) -> StoreResult<Vec<Entry>> {
        let mut entries = Vec::new();
        for id in self.ids()? {
            // A file removed between listing and reading is skipped.
            if let Some(entry) = self.fetch(id)? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn delete(&self, id: EntryId) -> StoreResult<bool> {
        let path = self.entry_path(id);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(id = %id, path = %path.display(), "removed entry file");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
