//! Terminal rendering of line diffs.

use colored::Colorize;
use entry_diff::{ChangeKind, DiffLine, LineDiff};

use crate::config::ConsoleConfig;

/// Renders a [`LineDiff`] one row per line: gutter number, marker, content.
pub struct DiffRenderer {
    color: bool,
    placeholder: String,
}

impl DiffRenderer {
    pub fn new(color: bool, placeholder: impl Into<String>) -> Self {
        Self {
            color,
            placeholder: placeholder.into(),
        }
    }

    pub fn from_config(config: &ConsoleConfig, no_color: bool) -> Self {
        Self::new(config.color && !no_color, config.empty_line_placeholder.clone())
    }

    /// Every line of the alignment.
    pub fn render(&self, diff: &LineDiff) -> String {
        let mut out = String::new();
        for line in diff {
            self.push_row(&mut out, line);
        }
        out
    }

    /// Only the changed regions, with `context` lines around each.
    pub fn render_hunks(&self, diff: &LineDiff, context: usize) -> String {
        let mut out = String::new();
        for hunk in diff.hunks(context) {
            let header = hunk.header();
            if self.color {
                out.push_str(&header.cyan().to_string());
            } else {
                out.push_str(&header);
            }
            out.push('\n');
            for line in &hunk.lines {
                self.push_row(&mut out, line);
            }
        }
        out
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// One-line `+N -M` summary.
    pub fn summary(&self, diff: &LineDiff) -> String {
        let added = format!("+{}", diff.additions());
        let deleted = format!("-{}", diff.deletions());
        if self.color {
            format!("{} {}", added.green(), deleted.red())
        } else {
            format!("{added} {deleted}")
        }
    }

    fn push_row(&self, out: &mut String, line: &DiffLine) {
        let content = if line.content.is_empty() {
            if self.color {
                self.placeholder.dimmed().to_string()
            } else {
                self.placeholder.clone()
            }
        } else {
            line.content.clone()
        };
        let gutter = format!("{:>4}", line.gutter_line());
        let row = format!("{} {}", line.kind.marker(), content);

        if self.color {
            let row = match line.kind {
                ChangeKind::Added => row.green().to_string(),
                ChangeKind::Deleted => row.red().to_string(),
                ChangeKind::Unchanged => row,
            };
            out.push_str(&format!("{} {}\n", gutter.dimmed(), row));
        } else {
            out.push_str(&format!("{gutter} {row}\n"));
        }
    }
}
