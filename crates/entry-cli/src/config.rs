use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use entry_store::DEFAULT_TENANT;
use serde::{Deserialize, Serialize};

/// Settings for the `entry` binary, read from an optional TOML file.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Directory holding one subdirectory per tenant.
    pub store_root: PathBuf,
    pub tenant: String,
    /// Colorize diff output.
    pub color: bool,
    /// Unchanged lines shown around each change; `None` shows the whole
    /// document.
    pub context_lines: Option<usize>,
    /// Shown in place of an empty line in diff output.
    pub empty_line_placeholder: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            store_root: PathBuf::from("entries"),
            tenant: DEFAULT_TENANT.to_string(),
            color: true,
            context_lines: None,
            empty_line_placeholder: "(empty line)".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Load from `path`, or return the defaults when no path is given.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
