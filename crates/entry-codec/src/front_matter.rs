//! Encoding and decoding of the `---`-delimited front matter header.
//!
//! Wire format, in fixed field order, each line present only when the field
//! is set and non-empty:
//!
//! ```text
//! ---
//! title: "<title>"
//! summary: "<summary>"
//! categories: ["<c1>", "<c2>"]
//! tags: ["<t1>", "<t2>"]
//! date: <date>
//! updated: <updated>
//! ---
//!
//! <body>
//! ```
//!
//! Values are written without escaping. A title containing `"` therefore
//! does not decode back to itself, and tag versions are never written.

use entry_types::{Category, Document, DocumentMetadata, Tag};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::partial::PartialMetadata;

/// The line that opens and closes the header.
pub const DELIMITER: &str = "---";

/// Output of [`FrontMatterCodec::decode`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    /// Fields recovered from the header. Empty when there was no header.
    pub metadata: PartialMetadata,
    /// The text after the header and its blank separator line, verbatim.
    /// Without a header, the whole text trimmed.
    pub body: String,
}

impl Decoded {
    /// Convert into a full [`Document`], defaulting missing fields.
    pub fn into_document(self) -> Document {
        Document::new(self.metadata.into_metadata(), self.body)
    }
}

/// Stateless codec between typed documents and their text form.
pub struct FrontMatterCodec;

impl FrontMatterCodec {
    /// Serialize metadata and body into a single text blob.
    ///
    /// Deterministic and total. Lines are joined with `\n` and no trailing
    /// newline is appended after the body.
    pub fn encode(metadata: &DocumentMetadata, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + 128);
        out.push_str(DELIMITER);
        out.push('\n');

        if !metadata.title.is_empty() {
            push_line(&mut out, "title", &quoted(&metadata.title));
        }
        if let Some(summary) = non_empty(&metadata.summary) {
            push_line(&mut out, "summary", &quoted(summary));
        }
        if !metadata.categories.is_empty() {
            let names = metadata.categories.iter().map(|c| c.name.as_str());
            push_line(&mut out, "categories", &quoted_list(names));
        }
        if !metadata.tags.is_empty() {
            let names = metadata.tags.iter().map(|t| t.name.as_str());
            push_line(&mut out, "tags", &quoted_list(names));
        }
        if let Some(date) = non_empty(&metadata.date) {
            push_line(&mut out, "date", date);
        }
        if let Some(updated) = non_empty(&metadata.updated) {
            push_line(&mut out, "updated", updated);
        }

        out.push_str(DELIMITER);
        out.push_str("\n\n");
        out.push_str(body);
        out
    }

    /// Serialize a whole document.
    pub fn encode_document(document: &Document) -> String {
        Self::encode(&document.metadata, &document.body)
    }

    /// Parse a text blob back into partial metadata and body.
    ///
    /// Never fails. Text that does not start with a complete header is
    /// returned whole (trimmed) as the body with empty metadata.
    pub fn decode(text: &str) -> Decoded {
        let Some((header, body)) = split_header(text) else {
            debug!(len = text.len(), "no front matter header; using whole text as body");
            return Decoded {
                metadata: PartialMetadata::default(),
                body: text.trim().to_string(),
            };
        };

        let mut metadata = PartialMetadata::default();
        for line in header.split('\n') {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "title" => metadata.title = Some(strip_quotes(value).to_string()),
                "summary" => metadata.summary = Some(strip_quotes(value).to_string()),
                "categories" => {
                    if let Some(names) = parse_list(value) {
                        metadata.categories = Some(names.into_iter().map(Category::new).collect());
                    }
                }
                // Versions are not part of the wire format, so tags come back bare.
                "tags" => {
                    if let Some(names) = parse_list(value) {
                        metadata.tags = Some(names.into_iter().map(Tag::new).collect());
                    }
                }
                "date" => metadata.date = Some(strip_quotes(value).to_string()),
                "updated" => metadata.updated = Some(strip_quotes(value).to_string()),
                _ => {}
            }
        }

        Decoded {
            metadata,
            body: body.strip_prefix('\n').unwrap_or(body).to_string(),
        }
    }

    /// A skeleton for a new entry with every list field shown once.
    pub fn template() -> String {
        let metadata = DocumentMetadata::new("Title")
            .with_summary("One-line summary")
            .with_category("Category")
            .with_tag(Tag::new("tag"));
        Self::encode(&metadata, "Write the entry here.\n")
    }

    /// Parse a text blob straight into a [`Document`].
    pub fn decode_document(text: &str) -> Document {
        Self::decode(text).into_document()
    }
}

fn push_line(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

fn quoted_list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<String> = names.map(quoted).collect();
    format!("[{}]", items.join(", "))
}

/// Split `text` into `(header, rest)` when it opens with a `---` line and a
/// later line is exactly `---`. The first closing delimiter wins.
fn split_header(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix("---\n")?;

    if let Some(body) = after_closing(rest) {
        return Some(("", body));
    }

    let mut from = 0;
    while let Some(pos) = rest[from..].find("\n---") {
        let at = from + pos;
        if let Some(body) = after_closing(&rest[at + 1..]) {
            return Some((&rest[..at], body));
        }
        from = at + 1;
    }
    None
}

/// If `s` starts with a complete `---` line, return what follows it.
fn after_closing(s: &str) -> Option<&str> {
    let tail = s.strip_prefix(DELIMITER)?;
    if tail.is_empty() {
        return Some("");
    }
    tail.strip_prefix('\n')
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Remove at most one leading and one trailing quote character.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(is_quote).unwrap_or(value);
    value.strip_suffix(is_quote).unwrap_or(value)
}

/// Parse `["a", "b"]`. Returns `None` unless the value is bracketed.
fn parse_list(value: &str) -> Option<Vec<String>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    Some(
        inner
            .split(',')
            .map(|item| strip_quotes(item.trim()))
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    )
}
