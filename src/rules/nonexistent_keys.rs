//! Nonexistent key detection rule.
//!
//! Detects namespaced keys referenced in source files that the source
//! dictionary does not define.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    core::{
        CheckContext, MessageContext, MessageLocation, SourceDictionary,
        indexer::map_namespaced_tokens_to_files, tokenizer::find_quoted_token,
    },
    issues::NonexistentKeyIssue,
    rules::CheckRule,
};

pub fn check_nonexistent_keys_issues(ctx: &CheckContext) -> Vec<NonexistentKeyIssue> {
    let rule = CheckRule::NonexistentKeys;
    let index = ctx.source_files(rule);
    let used = map_namespaced_tokens_to_files(&index, &ctx.tokenizer);

    find_nonexistent_keys(&used, &ctx.source)
        .into_iter()
        .filter(|(key, _)| !ctx.is_ignored(rule, key))
        .filter_map(|(key, files)| {
            let first = files.first()?;
            let content = index.get(first).unwrap_or_default();
            let offset = find_quoted_token(content, &key).unwrap_or(0);
            let location = MessageLocation::at_offset(ctx.display_source_path(first), content, offset);
            Some(NonexistentKeyIssue {
                context: MessageContext::new(location, key, ""),
                usages: files.iter().map(|f| ctx.display_source_path(f)).collect(),
            })
        })
        .collect()
}

/// Keys used in source files but absent from `dictionary`, with the files
/// using each of them.
pub fn find_nonexistent_keys(
    used: &BTreeMap<String, BTreeSet<String>>,
    dictionary: &SourceDictionary,
) -> BTreeMap<String, Vec<String>> {
    used.iter()
        .filter(|(key, _)| !dictionary.contains_key(key))
        .map(|(key, files)| (key.clone(), files.iter().cloned().collect()))
        .collect()
}
