//! Missing key detection rule.
//!
//! A translated locale misses a key when the key is absent or its value is an
//! empty string. The check can be limited to a set of locales with the
//! `locales` setting, matched against the file name (`de.json`) or the
//! locale (`de`).

use crate::{
    core::{CheckContext, LocaleFile, SourceDictionary},
    issues::MissingKeysIssue,
    rules::CheckRule,
};

pub fn check_missing_keys_issues(ctx: &CheckContext) -> Vec<MissingKeysIssue> {
    let rule = CheckRule::MissingKeys;
    let locales = ctx.config.checks.locales(rule);

    ctx.translated_locale_files()
        .into_iter()
        .filter(|file| is_selected(file, &locales))
        .filter_map(|file| {
            let mut issue = check_missing_keys(&ctx.source, file)?;
            issue.missing.retain(|key| !ctx.is_ignored(rule, key));
            (!issue.missing.is_empty()).then_some(issue)
        })
        .collect()
}

fn is_selected(file: &LocaleFile, locales: &[String]) -> bool {
    if locales.is_empty() {
        return true;
    }
    let file_name = file
        .path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    locales
        .iter()
        .any(|locale| *locale == file_name || *locale == file.locale)
}

/// Source keys that `locale` lacks, sorted.
pub fn check_missing_keys(
    source: &SourceDictionary,
    locale: &LocaleFile,
) -> Option<MissingKeysIssue> {
    let mut missing: Vec<String> = source
        .keys()
        .filter(|key| match locale.get(key) {
            None => true,
            Some(value) => value.as_str() == Some(""),
        })
        .cloned()
        .collect();
    if missing.is_empty() {
        return None;
    }
    missing.sort();

    Some(MissingKeysIssue {
        file_path: locale.file_path.clone(),
        locale: locale.locale.clone(),
        missing,
        total: source.len(),
    })
}
