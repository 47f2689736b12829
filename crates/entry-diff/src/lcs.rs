//! Longest common subsequence alignment.
//!
//! The table is `(m + 1) x (n + 1)` and the backtrack walks from the bottom
//! right corner to the origin. When skipping a line on either side would
//! keep the same LCS length, the backtrack takes the modified-side line
//! first (reports it as added). Since the alignment is assembled back to
//! front, an ambiguous replacement reads as the deletion followed by the
//! addition.
//!
//! Time and memory are both O(m * n).

use tracing::debug;

use crate::line_diff::{DiffLine, LineDiff};

/// Split a text into lines on `\n`.
///
/// An empty text is a single empty line and a trailing newline yields a
/// trailing empty line, so joining the result with `\n` gives back the
/// input exactly.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Diff two full texts line by line.
pub fn diff_texts(original: &str, modified: &str) -> LineDiff {
    compute(&split_lines(original), &split_lines(modified))
}

/// Compute a minimum-edit alignment between two line sequences.
///
/// Lines are compared by exact string equality. Total over all inputs.
pub fn compute<A: AsRef<str>, B: AsRef<str>>(original: &[A], modified: &[B]) -> LineDiff {
    let table = LcsTable::build(original, modified);
    let lines = table.backtrack(original, modified);
    debug!(
        original = original.len(),
        modified = modified.len(),
        common = table.length(),
        aligned = lines.len(),
        "computed line diff"
    );
    LineDiff::new(lines)
}

/// Row-major LCS length table.
struct LcsTable {
    cells: Vec<usize>,
    width: usize,
    rows: usize,
}

impl LcsTable {
    fn build<A: AsRef<str>, B: AsRef<str>>(original: &[A], modified: &[B]) -> Self {
        let rows = original.len() + 1;
        let width = modified.len() + 1;
        let mut table = Self {
            cells: vec![0; rows * width],
            width,
            rows,
        };

        for i in 1..rows {
            for j in 1..width {
                let value = if original[i - 1].as_ref() == modified[j - 1].as_ref() {
                    table.at(i - 1, j - 1) + 1
                } else {
                    table.at(i - 1, j).max(table.at(i, j - 1))
                };
                let idx = i * width + j;
                table.cells[idx] = value;
            }
        }
        table
    }

    fn at(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.width + j]
    }

    /// Length of the longest common subsequence.
    fn length(&self) -> usize {
        self.at(self.rows - 1, self.width - 1)
    }

    fn backtrack<A: AsRef<str>, B: AsRef<str>>(
        &self,
        original: &[A],
        modified: &[B],
    ) -> Vec<DiffLine> {
        let mut out = Vec::with_capacity(original.len() + modified.len() - self.length());
        let (mut i, mut j) = (original.len(), modified.len());

        while i > 0 || j > 0 {
            if i > 0 && j > 0 && original[i - 1].as_ref() == modified[j - 1].as_ref() {
                out.push(DiffLine::unchanged(original[i - 1].as_ref(), i, j));
                i -= 1;
                j -= 1;
            } else if j > 0 && (i == 0 || self.at(i, j - 1) >= self.at(i - 1, j)) {
                out.push(DiffLine::added(modified[j - 1].as_ref(), j));
                j -= 1;
            } else {
                out.push(DiffLine::deleted(original[i - 1].as_ref(), i));
                i -= 1;
            }
        }

        out.reverse();
        out
    }
}
