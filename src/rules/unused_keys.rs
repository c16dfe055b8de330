//! Unused key detection rule.
//!
//! Detects keys defined in the source dictionary that no scanned source file
//! references.

use crate::{
    core::{CheckContext, SourceDictionary, indexer::KeyFileMap},
    issues::UnusedKeyIssue,
    rules::CheckRule,
};

pub fn check_unused_keys_issues(ctx: &CheckContext) -> Vec<UnusedKeyIssue> {
    let rule = CheckRule::UnusedKeys;
    let key_file_map = ctx.key_file_map(rule);

    find_unused_keys(&ctx.source, &key_file_map)
        .into_iter()
        .filter(|key| !ctx.is_ignored(rule, key))
        .map(|key| UnusedKeyIssue {
            context: ctx.source.context(key),
        })
        .collect()
}

/// Keys of `dictionary` missing from `key_file_map`, in dictionary order.
pub fn find_unused_keys<'a>(
    dictionary: &'a SourceDictionary,
    key_file_map: &KeyFileMap,
) -> Vec<&'a str> {
    dictionary
        .keys()
        .filter(|key| !key_file_map.contains_key(*key))
        .map(String::as_str)
        .collect()
}
