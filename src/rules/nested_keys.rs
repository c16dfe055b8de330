//! Nested JSON detection rule.
//!
//! Keys are searched and replaced as whole dotted strings, which only works
//! when locale files are flat.

use crate::{
    core::{CheckContext, LocaleFile},
    issues::NestedJsonIssue,
};

pub fn check_nested_keys_issues(ctx: &CheckContext) -> Vec<NestedJsonIssue> {
    ctx.all_dictionaries()
        .into_iter()
        .filter_map(check_nested_keys)
        .collect()
}

pub fn check_nested_keys(file: &LocaleFile) -> Option<NestedJsonIssue> {
    let nested_keys: Vec<String> = file
        .values
        .iter()
        .filter(|(_, value)| value.is_object())
        .map(|(key, _)| key.clone())
        .collect();

    (!nested_keys.is_empty()).then(|| NestedJsonIssue {
        file_path: file.file_path.clone(),
        nested_keys,
    })
}
