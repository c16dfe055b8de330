//! RenameKey action.
//!
//! Renames misnamed keys to their suggested names, in every locale file and
//! in every source file that references them. Used by `check --fix` for
//! invalid-keys.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;

use super::operation::Operation;
use super::traits::{Action, ActionStats, execute_operations};
use crate::{
    core::{CheckContext, tokenizer::contains_quoted_token},
    issues::InvalidKeyNameIssue,
};

pub struct RenameKey;

/// Old key to new key, leaving out renames that would clash.
///
/// A rename is skipped when its target already exists in the source
/// dictionary or is claimed by an earlier rename.
fn plan_renames(
    issues: &[InvalidKeyNameIssue],
    ctx: &CheckContext,
) -> (BTreeMap<String, String>, usize) {
    let mut renames = BTreeMap::new();
    let mut targets = BTreeSet::new();
    let mut skipped = 0;

    for issue in issues {
        let target = &issue.suggested;
        if ctx.source.contains_key(target) || !targets.insert(target.as_str()) {
            tracing::warn!(
                "not renaming {}: {} already exists",
                issue.context.key,
                target
            );
            skipped += 1;
            continue;
        }
        renames.insert(issue.context.key.clone(), target.clone());
    }

    (renames, skipped)
}

/// Operations renaming `renames` in every locale file and in every project
/// source file quoting one of the old keys.
///
/// Source files come from the project-wide scan, so a file skipped by the
/// invalid-keys settings still has its references updated.
fn rename_operations(renames: &BTreeMap<String, String>, ctx: &CheckContext) -> Vec<Operation> {
    if renames.is_empty() {
        return Vec::new();
    }

    let mut ops: Vec<Operation> = ctx
        .all_dictionaries()
        .into_iter()
        .map(|file| Operation::RenameJsonKeys {
            file_path: file.path.clone(),
            renames: renames.clone(),
        })
        .collect();

    let src_dir = ctx.src_dir();
    let index = ctx.project_source_files();
    for (path, content) in index.iter() {
        let file_renames: BTreeMap<String, String> = renames
            .iter()
            .filter(|(old, _)| contains_quoted_token(content, old))
            .map(|(old, new)| (old.clone(), new.clone()))
            .collect();
        if !file_renames.is_empty() {
            ops.push(Operation::ReplaceSourceKeys {
                file_path: src_dir.join(path),
                renames: file_renames,
            });
        }
    }

    ops
}

impl Action<InvalidKeyNameIssue> for RenameKey {
    fn to_operations(issues: &[InvalidKeyNameIssue], ctx: &CheckContext) -> Vec<Operation> {
        let (renames, _) = plan_renames(issues, ctx);
        rename_operations(&renames, ctx)
    }

    fn run(issues: &[InvalidKeyNameIssue], ctx: &CheckContext) -> Result<ActionStats> {
        let (renames, skipped) = plan_renames(issues, ctx);
        let ops = rename_operations(&renames, ctx);
        let mut stats = execute_operations(&ops)?;
        stats.processed = issues.len();
        stats.skipped = skipped;
        Ok(stats)
    }
}
