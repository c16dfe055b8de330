//! Invalid key detection rule.
//!
//! A key is invalid when it breaks the format rule (lowercase letters,
//! digits, `.` and `_` only) or when its prefix does not match the location of
//! the files that use it.

use std::collections::BTreeMap;

use regex::Regex;

use crate::{
    core::{
        CheckContext,
        indexer::{KeyFileMap, strip_extension},
        synthesizer::IdealKeySynthesizer,
    },
    issues::{InvalidKeyFormatIssue, InvalidKeyNameIssue},
    rules::CheckRule,
    utils::is_valid_key,
};

/// Keys breaking the format rule and keys with a misplaced prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationSet {
    /// Keys with characters outside `[a-z0-9._]`, in key order.
    pub invalid_format: Vec<String>,
    /// Actual key to the suggested key.
    pub invalid_name: BTreeMap<String, String>,
}

impl ViolationSet {
    pub fn is_empty(&self) -> bool {
        self.invalid_format.is_empty() && self.invalid_name.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invalid_format.len() + self.invalid_name.len()
    }
}

/// Audit every used key against the format rule and its ideal name.
///
/// Keys matching one of `ignore` are left out. The two checks are
/// independent: a key can be reported by both.
pub fn audit_keys(
    key_file_map: &KeyFileMap,
    ignore: &[Regex],
    synthesizer: &IdealKeySynthesizer,
) -> ViolationSet {
    let mut violations = ViolationSet::default();

    for (key, files) in key_file_map {
        if ignore.iter().any(|re| re.is_match(key)) {
            continue;
        }

        if !is_valid_key(key) {
            violations.invalid_format.push(key.clone());
        }

        let prefix = synthesizer.ideal_prefix(files.iter().map(String::as_str));
        if !key.starts_with(&prefix) {
            let leaf = key.rsplit('.').next().unwrap_or(key);
            violations
                .invalid_name
                .insert(key.clone(), format!("{}{}", prefix, leaf));
        }
    }

    violations
}

pub fn check_invalid_keys_issues(
    ctx: &CheckContext,
) -> (Vec<InvalidKeyFormatIssue>, Vec<InvalidKeyNameIssue>) {
    let rule = CheckRule::InvalidKeys;
    let index = ctx.source_files(rule);
    let key_file_map = ctx.key_file_map(rule);
    let violations = audit_keys(&key_file_map, ctx.ignore_patterns(rule), &ctx.synthesizer);

    let format_issues = violations
        .invalid_format
        .iter()
        .map(|key| InvalidKeyFormatIssue {
            context: ctx.source.context(key),
        })
        .collect();

    let name_issues = violations
        .invalid_name
        .iter()
        .map(|(key, suggested)| {
            let files = key_file_map.get(key);
            let usages = index
                .paths()
                .filter(|path| files.is_some_and(|f| f.contains(&strip_extension(path))))
                .map(|path| ctx.display_source_path(path))
                .collect();
            InvalidKeyNameIssue {
                context: ctx.source.context(key),
                suggested: suggested.clone(),
                usages,
            }
        })
        .collect();

    (format_issues, name_issues)
}
