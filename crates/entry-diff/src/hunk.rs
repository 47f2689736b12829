//! Grouping an alignment into hunks of changes with context.

use serde::{Deserialize, Serialize};
use similar::{group_diff_ops, DiffOp};

use crate::line_diff::{ChangeKind, DiffLine, LineDiff};

/// A contiguous region of changes in a diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffHunk {
    /// Line number in the original text where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of lines from the original text in this hunk.
    pub old_count: usize,
    /// Line number in the modified text where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of lines from the modified text in this hunk.
    pub new_count: usize,
    /// The aligned lines in this hunk.
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    /// The `@@ -a,b +c,d @@` header line.
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )
    }
}

impl LineDiff {
    /// Group changed lines into hunks, keeping up to `context` unchanged
    /// lines on each side. Hunks separated by at most `2 * context`
    /// unchanged lines are merged.
    ///
    /// An identical diff has no hunks.
    pub fn hunks(&self, context: usize) -> Vec<DiffHunk> {
        let index = AlignmentIndex::new(self.lines());

        group_diff_ops(self.ops(), context)
            .into_iter()
            .filter_map(|group| {
                let first = group.first()?;
                let lines: Vec<DiffLine> = group
                    .iter()
                    .flat_map(|op| index.lines_of(op))
                    .map(|idx| self.lines()[idx].clone())
                    .collect();
                Some(DiffHunk {
                    old_start: first.old_range().start + 1,
                    old_count: group.iter().map(|op| op.old_range().len()).sum(),
                    new_start: first.new_range().start + 1,
                    new_count: group.iter().map(|op| op.new_range().len()).sum(),
                    lines,
                })
            })
            .collect()
    }

    /// The alignment as runs of equal, deleted and inserted lines.
    pub fn ops(&self) -> Vec<DiffOp> {
        let mut ops = Vec::new();
        let (mut old_index, mut new_index) = (0, 0);

        for run in self.lines().chunk_by(|a, b| a.kind == b.kind) {
            let len = run.len();
            let op = match run[0].kind {
                ChangeKind::Unchanged => DiffOp::Equal {
                    old_index,
                    new_index,
                    len,
                },
                ChangeKind::Deleted => DiffOp::Delete {
                    old_index,
                    old_len: len,
                    new_index,
                },
                ChangeKind::Added => DiffOp::Insert {
                    old_index,
                    new_index,
                    new_len: len,
                },
            };
            old_index += op.old_range().len();
            new_index += op.new_range().len();
            ops.push(op);
        }
        ops
    }
}

/// Maps 0-based line indices on either side back to positions in the
/// alignment.
struct AlignmentIndex {
    old: Vec<usize>,
    new: Vec<usize>,
}

impl AlignmentIndex {
    fn new(lines: &[DiffLine]) -> Self {
        let mut index = Self {
            old: Vec::new(),
            new: Vec::new(),
        };
        for (pos, line) in lines.iter().enumerate() {
            if line.in_original() {
                index.old.push(pos);
            }
            if line.in_modified() {
                index.new.push(pos);
            }
        }
        index
    }

    /// Alignment positions covered by `op`, in order.
    fn lines_of(&self, op: &DiffOp) -> Vec<usize> {
        match op {
            DiffOp::Insert { .. } => self.new[op.new_range()].to_vec(),
            DiffOp::Equal { .. } | DiffOp::Delete { .. } => self.old[op.old_range()].to_vec(),
            // `ops` never emits replacements.
            DiffOp::Replace { .. } => {
                let mut positions = self.old[op.old_range()].to_vec();
                positions.extend_from_slice(&self.new[op.new_range()]);
                positions
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcs::compute;

    fn letters(s: &str) -> Vec<String> {
        s.chars().map(String::from).collect()
    }

    #[test]
    fn identical_has_no_hunks() {
        let a = letters("abcdef");
        assert!(compute(&a, &a).hunks(3).is_empty());
    }

    #[test]
    fn single_change_with_context() {
        let diff = compute(&letters("abcdefghij"), &letters("abcdXfghij"));
        let hunks = diff.hunks(2);
        assert_eq!(hunks.len(), 1);
        let hunk = &hunks[0];
        assert_eq!(hunk.old_start, 3);
        assert_eq!(hunk.new_start, 3);
        assert_eq!(hunk.old_count, 5);
        assert_eq!(hunk.new_count, 5);
        assert_eq!(hunk.header(), "@@ -3,5 +3,5 @@");
        assert_eq!(hunk.lines.first().map(|l| l.content.as_str()), Some("c"));
        assert_eq!(hunk.lines.last().map(|l| l.content.as_str()), Some("g"));
    }

    #[test]
    fn distant_changes_split_into_two_hunks() {
        let diff = compute(&letters("abcdefghijkl"), &letters("Xbcdefghijk"));
        let hunks = diff.hunks(1);
        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0].old_start, 1);
        assert_eq!(hunks[1].old_start, 11);
        assert_eq!(hunks[1].new_start, 11);
        assert_eq!(hunks[1].new_count, 1);
        assert_eq!(hunks[1].old_count, 2);
    }

    #[test]
    fn nearby_changes_merge() {
        let diff = compute(&letters("abcdef"), &letters("aXcdYf"));
        assert_eq!(diff.hunks(1).len(), 1);
        assert_eq!(diff.hunks(0).len(), 2);
    }

    #[test]
    fn zero_context_pure_insertion() {
        let diff = compute(&letters("ac"), &letters("abc"));
        let hunks = diff.hunks(0);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].old_count, 0);
        assert_eq!(hunks[0].old_start, 2);
        assert_eq!(hunks[0].new_start, 2);
        assert_eq!(hunks[0].new_count, 1);
    }

    #[test]
    fn hunks_cover_every_change() {
        let diff = compute(&letters("abcdefghijklmnop"), &letters("aBcdefgHijklmnoQ"));
        let changed_in_hunks: usize = diff
            .hunks(1)
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind != ChangeKind::Unchanged)
            .count();
        assert_eq!(changed_in_hunks, diff.additions() + diff.deletions());
    }

    #[test]
    fn ops_follow_alignment_runs() {
        let diff = compute(&letters("abc"), &letters("axc"));
        assert_eq!(
            diff.ops(),
            vec![
                DiffOp::Equal { old_index: 0, new_index: 0, len: 1 },
                DiffOp::Delete { old_index: 1, old_len: 1, new_index: 1 },
                DiffOp::Insert { old_index: 2, new_index: 1, new_len: 1 },
                DiffOp::Equal { old_index: 2, new_index: 2, len: 1 },
            ]
        );
    }

    #[test]
    fn hunk_keeps_deletion_before_addition() {
        let diff = compute(&letters("abc"), &letters("axc"));
        let hunks = diff.hunks(0);
        assert_eq!(hunks.len(), 1);
        let kinds: Vec<_> = hunks[0].lines.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![ChangeKind::Deleted, ChangeKind::Added]);
        assert_eq!(hunks[0].header(), "@@ -2,1 +2,1 @@");
    }

    #[test]
    fn gap_of_twice_context_still_merges() {
        // Two unchanged lines between changes, context 1.
        let diff = compute(&letters("aXbcYd"), &letters("abcd"));
        assert_eq!(diff.hunks(1).len(), 1);
        let diff = compute(&letters("aXbcdYe"), &letters("abcde"));
        assert_eq!(diff.hunks(1).len(), 2);
    }
}
