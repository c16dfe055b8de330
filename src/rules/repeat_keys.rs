//! Repeat key detection rule.
//!
//! A JSON object with the same key twice silently keeps the last value, so the
//! first translation is lost. The regular parse collapses duplicates; this rule
//! re-parses each file keeping every pair.

use crate::{
    core::{
        CheckContext, LocaleFile, MessageContext, MessageLocation,
        parsers::json::{find_duplicate_keys, find_key_offset, parse_ordered},
    },
    issues::{ParseErrorIssue, RepeatKeyIssue},
    rules::CheckRule,
};

pub fn check_repeat_keys_issues(ctx: &CheckContext) -> (Vec<RepeatKeyIssue>, Vec<ParseErrorIssue>) {
    let rule = CheckRule::RepeatKeys;
    let mut issues = Vec::new();
    let mut errors = Vec::new();

    for file in ctx.all_dictionaries() {
        match check_repeat_keys(file) {
            Ok(found) => issues.extend(
                found
                    .into_iter()
                    .filter(|issue| !ctx.is_ignored(rule, &issue.context.key)),
            ),
            Err(e) => errors.push(ParseErrorIssue {
                file_path: file.file_path.clone(),
                error: format!("{:#}", e),
            }),
        }
    }

    (issues, errors)
}

/// Duplicate keys of one locale file, located at their second declaration.
pub fn check_repeat_keys(file: &LocaleFile) -> anyhow::Result<Vec<RepeatKeyIssue>> {
    let parsed = parse_ordered(&file.content)?;

    Ok(find_duplicate_keys(&parsed)
        .into_iter()
        .map(|duplicate| {
            let location = locate_repeat(file, &duplicate.key);
            RepeatKeyIssue {
                context: MessageContext::new(
                    location,
                    duplicate.key,
                    duplicate.values.last().cloned().unwrap_or_default(),
                ),
                values: duplicate.values,
            }
        })
        .collect())
}

/// Position of the second declaration of `key`.
///
/// Nested keys are searched by their final segment only, unless the dotted
/// key itself is declared (flat files use dotted keys).
fn locate_repeat(file: &LocaleFile, key: &str) -> MessageLocation {
    let declared = if find_key_offset(&file.content, key, 0).is_some() {
        key
    } else {
        key.rsplit('.').next().unwrap_or(key)
    };

    let offset = find_key_offset(&file.content, declared, 0)
        .and_then(|first| find_key_offset(&file.content, declared, first + 1).or(Some(first)))
        .unwrap_or(0);
    MessageLocation::at_offset(&file.file_path, &file.content, offset)
}
