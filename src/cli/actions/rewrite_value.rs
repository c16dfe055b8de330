//! RewriteValue action.
//!
//! Replaces alt text and aria label values with their suggested punctuation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::operation::Operation;
use super::traits::Action;
use crate::{
    core::{CheckContext, MessageContext},
    issues::{AltTextIssue, AriaLabelIssue},
};

pub struct RewriteValue;

fn set_values<'a>(
    entries: impl Iterator<Item = (&'a MessageContext, &'a String)>,
    ctx: &CheckContext,
) -> Vec<Operation> {
    let mut by_file: BTreeMap<PathBuf, BTreeMap<String, String>> = BTreeMap::new();
    for (context, suggested) in entries {
        by_file
            .entry(ctx.root_dir.join(context.file_path()))
            .or_default()
            .insert(context.key.clone(), suggested.clone());
    }
    by_file
        .into_iter()
        .map(|(file_path, values)| Operation::SetJsonValues { file_path, values })
        .collect()
}

impl Action<AltTextIssue> for RewriteValue {
    fn to_operations(issues: &[AltTextIssue], ctx: &CheckContext) -> Vec<Operation> {
        set_values(issues.iter().map(|i| (&i.context, &i.suggested)), ctx)
    }
}

impl Action<AriaLabelIssue> for RewriteValue {
    fn to_operations(issues: &[AriaLabelIssue], ctx: &CheckContext) -> Vec<Operation> {
        set_values(issues.iter().map(|i| (&i.context, &i.suggested)), ctx)
    }
}
