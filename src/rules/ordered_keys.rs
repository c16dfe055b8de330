//! Ordered key detection rule.
//!
//! Locale files keep their top-level keys in code-point order so that related
//! keys sit together and diffs stay small.

use crate::{
    core::{CheckContext, LocaleFile},
    issues::UnorderedKeysIssue,
};

pub fn check_ordered_keys_issues(ctx: &CheckContext) -> Vec<UnorderedKeysIssue> {
    ctx.all_dictionaries()
        .into_iter()
        .filter_map(check_ordered_keys)
        .collect()
}

/// Report `file` if its keys are out of order, naming the first misplaced key.
pub fn check_ordered_keys(file: &LocaleFile) -> Option<UnorderedKeysIssue> {
    first_unordered(file.keys().map(String::as_str)).map(|key| UnorderedKeysIssue {
        file_path: file.file_path.clone(),
        first_unordered: key.to_string(),
    })
}

/// The first key that sorts before the key preceding it.
pub fn first_unordered<'a>(keys: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut previous: Option<&str> = None;
    for key in keys {
        if previous.is_some_and(|p| key < p) {
            return Some(key);
        }
        previous = Some(key);
    }
    None
}
