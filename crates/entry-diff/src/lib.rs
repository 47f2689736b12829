//! Line diff engine for the entry console.
//!
//! Aligns an original and a candidate document line by line using a longest
//! common subsequence table, classifying every line as unchanged, added, or
//! deleted. The alignment is the change preview shown before an edit is
//! saved.
//!
//! # Key Types
//!
//! - [`LineDiff`] / [`DiffLine`] / [`ChangeKind`] -- Full line-by-line alignment
//! - [`DiffHunk`] -- Changed regions with surrounding context

pub mod hunk;
pub mod lcs;
pub mod line_diff;

pub use hunk::DiffHunk;
pub use lcs::{compute, diff_texts, split_lines};
pub use line_diff::{ChangeKind, DiffLine, LineDiff};
