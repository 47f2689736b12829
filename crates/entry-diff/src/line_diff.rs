//! Alignment types produced by the diff engine.

use serde::{Deserialize, Serialize};

/// How a line relates the original to the modified text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Present in both texts.
    Unchanged,
    /// Present only in the modified text.
    Added,
    /// Present only in the original text.
    Deleted,
}

impl ChangeKind {
    /// The conventional one-character diff marker.
    pub fn marker(self) -> char {
        match self {
            ChangeKind::Unchanged => ' ',
            ChangeKind::Added => '+',
            ChangeKind::Deleted => '-',
        }
    }
}

/// A single aligned line.
///
/// `original_line` is set for unchanged and deleted lines, `new_line` for
/// unchanged and added lines. Both are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    pub kind: ChangeKind,
    pub content: String,
    #[serde(rename = "originalLineNumber")]
    pub original_line: Option<usize>,
    #[serde(rename = "newLineNumber")]
    pub new_line: Option<usize>,
}

impl DiffLine {
    pub fn unchanged(content: impl Into<String>, original_line: usize, new_line: usize) -> Self {
        Self {
            kind: ChangeKind::Unchanged,
            content: content.into(),
            original_line: Some(original_line),
            new_line: Some(new_line),
        }
    }

    pub fn added(content: impl Into<String>, new_line: usize) -> Self {
        Self {
            kind: ChangeKind::Added,
            content: content.into(),
            original_line: None,
            new_line: Some(new_line),
        }
    }

    pub fn deleted(content: impl Into<String>, original_line: usize) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            content: content.into(),
            original_line: Some(original_line),
            new_line: None,
        }
    }

    /// The number shown in a single-column gutter: the new-side number for
    /// added lines, the original-side number otherwise.
    pub fn gutter_line(&self) -> usize {
        match self.kind {
            ChangeKind::Added => self.new_line,
            ChangeKind::Unchanged | ChangeKind::Deleted => self.original_line,
        }
        .unwrap_or(0)
    }

    /// Whether this line exists in the original text.
    pub fn in_original(&self) -> bool {
        self.kind != ChangeKind::Added
    }

    /// Whether this line exists in the modified text.
    pub fn in_modified(&self) -> bool {
        self.kind != ChangeKind::Deleted
    }
}

/// The complete ordered alignment between two line sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineDiff {
    lines: Vec<DiffLine>,
}

impl LineDiff {
    pub fn new(lines: Vec<DiffLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<DiffLine> {
        self.lines
    }

    /// Number of aligned lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` only when both inputs were empty sequences.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.count(ChangeKind::Added)
    }

    /// Number of deleted lines.
    pub fn deletions(&self) -> usize {
        self.count(ChangeKind::Deleted)
    }

    /// Number of unchanged lines.
    pub fn unchanged(&self) -> usize {
        self.count(ChangeKind::Unchanged)
    }

    /// Returns `true` if no line was added or deleted.
    pub fn is_identical(&self) -> bool {
        self.lines.iter().all(|l| l.kind == ChangeKind::Unchanged)
    }

    /// Rebuild the original text from the alignment.
    pub fn original_text(&self) -> String {
        self.join(DiffLine::in_original)
    }

    /// Rebuild the modified text from the alignment.
    pub fn new_text(&self) -> String {
        self.join(DiffLine::in_modified)
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }

    fn join(&self, keep: fn(&DiffLine) -> bool) -> String {
        self.lines
            .iter()
            .filter(|l| keep(l))
            .map(|l| l.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a LineDiff {
    type Item = &'a DiffLine;
    type IntoIter = std::slice::Iter<'a, DiffLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
