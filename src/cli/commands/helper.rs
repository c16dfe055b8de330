use super::{CheckSummary, CommandResult};
use crate::issues::{Issue, Severity};

pub fn finish(
    summary: CheckSummary,
    source_files_checked: usize,
    locale_files_checked: usize,
) -> CommandResult {
    let all_issues = || {
        summary
            .outcomes
            .iter()
            .flat_map(|outcome| outcome.issues.iter())
            .chain(summary.parse_errors.iter())
    };

    let parse_error_count = all_issues()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();
    let error_count = all_issues()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = all_issues()
        .filter(|i| i.severity() == Severity::Warning)
        .count();

    CommandResult {
        summary,
        error_count,
        warning_count,
        parse_error_count,
        source_files_checked,
        locale_files_checked,
    }
}
