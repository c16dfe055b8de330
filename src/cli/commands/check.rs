use anyhow::Result;
use rayon::prelude::*;

use super::super::{
    actions::{Action, AddKey, RenameKey, RewriteValue, SortKeys},
    args::CheckCommand,
};
use super::{CheckOutcome, CheckSummary, CommandResult, FixOutcome, helper::finish};

use crate::{
    core::CheckContext,
    issues::Issue,
    rules::{
        CheckRule,
        invalid_keys::check_invalid_keys_issues,
        missing_keys::check_missing_keys_issues,
        nested_keys::check_nested_keys_issues,
        non_source_keys::check_non_source_keys_issues,
        nonexistent_keys::check_nonexistent_keys_issues,
        ordered_keys::check_ordered_keys_issues,
        punctuation::{check_alt_texts_issues, check_aria_labels_issues},
        repeat_keys::check_repeat_keys_issues,
        repeat_values::check_repeat_values_issues,
        unused_keys::check_unused_keys_issues,
    },
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let mut ctx = CheckContext::new(&cmd.common)?;
    let rules = selected_rules(&cmd.checks, &ctx);
    let mut outcomes = run_checks(&ctx, &rules);

    let mut fixes = Vec::new();
    if cmd.fix {
        fixes = apply_fixes(&ctx, &outcomes)?;
        if fixes.iter().any(|f| f.stats.changes_applied > 0) {
            ctx = ctx.reload()?;
            outcomes = run_checks(&ctx, &rules);
        }
    }

    let parse_errors = if rules.iter().any(CheckRule::reads_locale_files) {
        ctx.parse_errors()
            .iter()
            .cloned()
            .map(Issue::ParseError)
            .collect()
    } else {
        Vec::new()
    };

    let source_files_checked = rules
        .iter()
        .filter(|rule| rule.scans_source_files())
        .map(|&rule| ctx.source_files(rule).len())
        .max()
        .unwrap_or(0);
    let locale_files_checked = if rules.iter().any(CheckRule::reads_locale_files) {
        ctx.all_dictionaries().len()
    } else {
        1
    };

    Ok(finish(
        CheckSummary {
            outcomes,
            parse_errors,
            fixes,
            fix: cmd.fix,
        },
        source_files_checked,
        locale_files_checked,
    ))
}

/// Checks named on the command line, or every check active in the config.
fn selected_rules(requested: &[CheckRule], ctx: &CheckContext) -> Vec<CheckRule> {
    let mut rules = if requested.is_empty() {
        CheckRule::all()
            .into_iter()
            .filter(|&rule| ctx.config.checks.is_active(rule))
            .collect()
    } else {
        requested.to_vec()
    };
    rules.sort();
    rules.dedup();
    rules
}

/// Run every check in parallel; outcomes keep the order of `rules`.
pub fn run_checks(ctx: &CheckContext, rules: &[CheckRule]) -> Vec<CheckOutcome> {
    rules
        .par_iter()
        .map(|&rule| CheckOutcome {
            rule,
            issues: run_check(ctx, rule),
        })
        .collect()
}

pub fn run_check(ctx: &CheckContext, rule: CheckRule) -> Vec<Issue> {
    match rule {
        CheckRule::InvalidKeys => {
            let (format_issues, name_issues) = check_invalid_keys_issues(ctx);
            format_issues
                .into_iter()
                .map(Issue::InvalidKeyFormat)
                .chain(name_issues.into_iter().map(Issue::InvalidKeyName))
                .collect()
        }
        CheckRule::NonexistentKeys => check_nonexistent_keys_issues(ctx)
            .into_iter()
            .map(Issue::NonexistentKey)
            .collect(),
        CheckRule::UnusedKeys => check_unused_keys_issues(ctx)
            .into_iter()
            .map(Issue::UnusedKey)
            .collect(),
        CheckRule::NonSourceKeys => check_non_source_keys_issues(ctx)
            .into_iter()
            .map(Issue::NonSourceKey)
            .collect(),
        CheckRule::RepeatKeys => {
            let (issues, errors) = check_repeat_keys_issues(ctx);
            issues
                .into_iter()
                .map(Issue::RepeatKey)
                .chain(errors.into_iter().map(Issue::ParseError))
                .collect()
        }
        CheckRule::RepeatValues => check_repeat_values_issues(ctx)
            .into_iter()
            .map(Issue::RepeatValue)
            .collect(),
        CheckRule::OrderedKeys => check_ordered_keys_issues(ctx)
            .into_iter()
            .map(Issue::UnorderedKeys)
            .collect(),
        CheckRule::MissingKeys => check_missing_keys_issues(ctx)
            .into_iter()
            .map(Issue::MissingKeys)
            .collect(),
        CheckRule::NestedKeys => check_nested_keys_issues(ctx)
            .into_iter()
            .map(Issue::NestedJson)
            .collect(),
        CheckRule::AltTexts => check_alt_texts_issues(ctx)
            .into_iter()
            .map(Issue::AltText)
            .collect(),
        CheckRule::AriaLabels => check_aria_labels_issues(ctx)
            .into_iter()
            .map(Issue::AriaLabel)
            .collect(),
    }
}

/// Apply fixes for the fixable checks that reported issues.
///
/// Value rewrites run first since they address keys by their current name.
/// Nonexistent keys are added after renames, skipping keys a rename just
/// created. Sorting runs last, on a reloaded context when keys were renamed,
/// so renamed keys land in order.
fn apply_fixes(ctx: &CheckContext, outcomes: &[CheckOutcome]) -> Result<Vec<FixOutcome>> {
    let issues_of = |rule: CheckRule| {
        outcomes
            .iter()
            .find(|outcome| outcome.rule == rule)
            .map(|outcome| outcome.issues.as_slice())
    };
    let mut fixes = Vec::new();

    if let Some(issues) = issues_of(CheckRule::AltTexts) {
        let issues: Vec<_> = issues
            .iter()
            .filter_map(|issue| match issue {
                Issue::AltText(issue) => Some(issue.clone()),
                _ => None,
            })
            .collect();
        fixes.push(FixOutcome {
            rule: CheckRule::AltTexts,
            stats: RewriteValue::run(&issues, ctx)?,
        });
    }

    if let Some(issues) = issues_of(CheckRule::AriaLabels) {
        let issues: Vec<_> = issues
            .iter()
            .filter_map(|issue| match issue {
                Issue::AriaLabel(issue) => Some(issue.clone()),
                _ => None,
            })
            .collect();
        fixes.push(FixOutcome {
            rule: CheckRule::AriaLabels,
            stats: RewriteValue::run(&issues, ctx)?,
        });
    }

    let mut renamed = false;
    if let Some(issues) = issues_of(CheckRule::InvalidKeys) {
        let issues: Vec<_> = issues
            .iter()
            .filter_map(|issue| match issue {
                Issue::InvalidKeyName(issue) => Some(issue.clone()),
                _ => None,
            })
            .collect();
        let stats = RenameKey::run(&issues, ctx)?;
        renamed = stats.changes_applied > 0;
        fixes.push(FixOutcome {
            rule: CheckRule::InvalidKeys,
            stats,
        });
    }

    let reloaded;
    let current = if renamed {
        reloaded = ctx.reload()?;
        &reloaded
    } else {
        ctx
    };

    if let Some(issues) = issues_of(CheckRule::NonexistentKeys) {
        let issues: Vec<_> = issues
            .iter()
            .filter_map(|issue| match issue {
                Issue::NonexistentKey(issue) if !current.source.contains_key(&issue.context.key) => {
                    Some(issue.clone())
                }
                _ => None,
            })
            .collect();
        fixes.push(FixOutcome {
            rule: CheckRule::NonexistentKeys,
            stats: AddKey::run_interactive(&issues, current)?,
        });
    }

    if issues_of(CheckRule::OrderedKeys).is_some() {
        let issues = check_ordered_keys_issues(current);
        fixes.push(FixOutcome {
            rule: CheckRule::OrderedKeys,
            stats: SortKeys::run(&issues, current)?,
        });
    }

    Ok(fixes)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    fn project(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        dir
    }

    fn context(dir: &tempfile::TempDir) -> CheckContext {
        CheckContext::from_config(Config::default(), dir.path().to_path_buf(), false).unwrap()
    }

    #[test]
    fn test_selected_rules_respects_active_flag() {
        let dir = project(&[("src/i18n/en-US.json", "{}")]);
        let mut ctx = context(&dir);
        ctx.config.checks.unused_keys.active = Some(false);

        let rules = selected_rules(&[], &ctx);
        assert!(!rules.contains(&CheckRule::UnusedKeys));
        assert_eq!(rules.len(), CheckRule::all().len() - 1);

        let rules = selected_rules(&[CheckRule::UnusedKeys, CheckRule::UnusedKeys], &ctx);
        assert_eq!(rules, vec![CheckRule::UnusedKeys]);
    }

    #[test]
    fn test_run_checks_keeps_rule_order() {
        let dir = project(&[
            ("src/i18n/en-US.json", r#"{"i18n.page.title": "Title"}"#),
            ("src/page.ts", "t('i18n.page.title')"),
        ]);
        let ctx = context(&dir);
        let rules = vec![
            CheckRule::InvalidKeys,
            CheckRule::UnusedKeys,
            CheckRule::OrderedKeys,
        ];

        let outcomes = run_checks(&ctx, &rules);
        let order: Vec<CheckRule> = outcomes.iter().map(|o| o.rule).collect();
        assert_eq!(order, rules);
        assert!(outcomes.iter().all(CheckOutcome::passed));
    }

    #[test]
    fn test_apply_fixes_renames_then_sorts() {
        let dir = project(&[
            (
                "src/i18n/en-US.json",
                "{\n  \"i18n.a.title\": \"Title\",\n  \"i18n.b.label\": \"Label\"\n}\n",
            ),
            ("src/page.ts", "t('i18n.a.title');"),
            ("src/b.ts", "t('i18n.b.label');"),
        ]);
        let ctx = context(&dir);
        let rules = [CheckRule::InvalidKeys, CheckRule::OrderedKeys];
        let outcomes = run_checks(&ctx, &rules);
        assert!(outcomes[1].passed());

        let fixes = apply_fixes(&ctx, &outcomes).unwrap();
        assert_eq!(fixes[0].rule, CheckRule::InvalidKeys);
        assert_eq!(fixes[0].stats.files_modified, 2);
        assert_eq!(fixes[1].rule, CheckRule::OrderedKeys);
        assert_eq!(fixes[1].stats.files_modified, 1);

        assert_eq!(
            fs::read_to_string(dir.path().join("src/i18n/en-US.json")).unwrap(),
            "{\n  \"i18n.b.label\": \"Label\",\n  \"i18n.page.title\": \"Title\"\n}\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("src/page.ts")).unwrap(),
            "t('i18n.page.title');"
        );

        let ctx = ctx.reload().unwrap();
        let outcomes = run_checks(&ctx, &rules);
        assert!(outcomes.iter().all(CheckOutcome::passed));
    }
}
