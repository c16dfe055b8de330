//! SortKeys action.
//!
//! Sorts the top-level keys of locale files reported by ordered-keys.

use super::operation::Operation;
use super::traits::Action;
use crate::{core::CheckContext, issues::UnorderedKeysIssue};

pub struct SortKeys;

impl Action<UnorderedKeysIssue> for SortKeys {
    fn to_operations(issues: &[UnorderedKeysIssue], ctx: &CheckContext) -> Vec<Operation> {
        issues
            .iter()
            .map(|issue| Operation::SortJsonKeys {
                file_path: ctx.root_dir.join(&issue.file_path),
            })
            .collect()
    }
}
