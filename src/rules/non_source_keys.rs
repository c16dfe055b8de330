//! Non-source key detection rule.
//!
//! Detects keys in translated locale files that the source dictionary does
//! not define. Such keys are left over from renames or removals and are never
//! displayed.

use crate::{
    core::{CheckContext, LocaleFile, SourceDictionary},
    issues::NonSourceKeyIssue,
    rules::CheckRule,
};

pub fn check_non_source_keys_issues(ctx: &CheckContext) -> Vec<NonSourceKeyIssue> {
    let rule = CheckRule::NonSourceKeys;
    ctx.translated_locale_files()
        .into_iter()
        .flat_map(|file| check_non_source_keys(&ctx.source, file))
        .filter(|issue| !ctx.is_ignored(rule, &issue.context.key))
        .collect()
}

/// Keys of `locale` absent from `source`, in file order.
pub fn check_non_source_keys(
    source: &SourceDictionary,
    locale: &LocaleFile,
) -> Vec<NonSourceKeyIssue> {
    locale
        .keys()
        .filter(|key| !source.contains_key(key))
        .map(|key| NonSourceKeyIssue {
            context: locale.context(key),
            locale: locale.locale.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parsers::json::parse_locale_str;
    use pretty_assertions::assert_eq;

    fn locale(name: &str, json: &str) -> LocaleFile {
        let path = format!("src/i18n/{}.json", name);
        parse_locale_str(json.to_string(), path.clone(), path).unwrap()
    }

    #[test]
    fn test_check_non_source_keys() {
        let source = locale("en-US", r#"{"i18n.a": "A", "i18n.b": "B"}"#);
        let de = locale(
            "de",
            "{\n  \"i18n.a\": \"A\",\n  \"i18n.old\": \"Alt\",\n  \"i18n.b\": \"B\"\n}",
        );

        let issues = check_non_source_keys(&source, &de);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].context.key, "i18n.old");
        assert_eq!(issues[0].context.line(), 3);
        assert_eq!(issues[0].locale, "de");
    }

    #[test]
    fn test_check_non_source_keys_subset_is_clean() {
        let source = locale("en-US", r#"{"i18n.a": "A", "i18n.b": "B"}"#);
        let fr = locale("fr", r#"{"i18n.a": "A"}"#);
        assert!(check_non_source_keys(&source, &fr).is_empty());
    }
}
