//! Action trait definition.
//!
//! Actions convert Issues into Operations. Each Action can be implemented
//! for multiple Issue types, providing type-safe handling.

use std::collections::HashSet;

use anyhow::Result;

use super::operation::Operation;
use crate::core::CheckContext;

/// Statistics from running an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionStats {
    /// Number of issues processed.
    pub processed: usize,
    /// Number of issues skipped (e.g., rename target already taken).
    pub skipped: usize,
    /// Number of changes actually applied to files.
    pub changes_applied: usize,
    /// Number of files modified.
    pub files_modified: usize,
}

impl std::ops::AddAssign for ActionStats {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.changes_applied += other.changes_applied;
        self.files_modified += other.files_modified;
    }
}

/// Action trait - converts Issues into Operations and executes them.
///
/// # Example
///
/// ```ignore
/// // In command code:
/// let stats = SortKeys::run(&issues, &ctx)?;
/// ```
pub trait Action<I> {
    /// Convert issues to file operations.
    ///
    /// Paths in issues are relative to the project root of `ctx`.
    fn to_operations(issues: &[I], ctx: &CheckContext) -> Vec<Operation>;

    /// Execute the action (modify files).
    ///
    /// Default implementation calls `to_operations` and executes each operation.
    fn run(issues: &[I], ctx: &CheckContext) -> Result<ActionStats> {
        let ops = Self::to_operations(issues, ctx);
        let mut stats = execute_operations(&ops)?;
        stats.processed = issues.len();
        Ok(stats)
    }
}

pub(crate) fn execute_operations(ops: &[Operation]) -> Result<ActionStats> {
    let mut files_modified: HashSet<&std::path::Path> = HashSet::new();
    let mut changes_applied = 0;

    for op in ops {
        let applied = op.execute()?;
        if applied > 0 {
            changes_applied += applied;
            files_modified.insert(op.file_path());
        }
    }

    Ok(ActionStats {
        processed: ops.len(),
        skipped: 0,
        changes_applied,
        files_modified: files_modified.len(),
    })
}
