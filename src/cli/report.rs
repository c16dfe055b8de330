//! Report formatting and printing utilities.
//!
//! Each check prints a one-line result. Failing checks follow it with their
//! issues in cargo-style format.

use std::collections::BTreeSet;
use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CheckOutcome, CommandResult, FixOutcome};
use crate::issues::{Issue, Report, ReportLocation, Severity};
use crate::rules::CheckRule;
use crate::utils::plural;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of usages to display per issue.
const MAX_USAGES_DISPLAY: usize = 3;

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, &mut io::stdout().lock());
    print_parse_warning(result.parse_error_count, verbose);
}

/// Print the whole check report to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    let summary = &result.summary;

    for fix in &summary.fixes {
        print_fix(fix, writer);
    }
    if !summary.fixes.is_empty() {
        let _ = writeln!(writer);
    }

    for outcome in &summary.outcomes {
        print_outcome(outcome, summary.fix, writer);
    }

    if !summary.parse_errors.is_empty() {
        report_to(&summary.parse_errors, writer);
    }

    let all_issues: Vec<&Issue> = summary
        .outcomes
        .iter()
        .flat_map(|outcome| outcome.issues.iter())
        .chain(summary.parse_errors.iter())
        .collect();
    if all_issues.is_empty() {
        print_success_to(
            result.source_files_checked,
            result.locale_files_checked,
            writer,
        );
    } else {
        print_summary(&all_issues, writer);
    }
}

/// Print issues in cargo-style format, sorted by location.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted: Vec<&Issue> = issues.iter().collect();
    sorted.sort_by(|a, b| compare_issues(a, b));

    let max_line_width = calculate_max_line_width(&sorted);
    for issue in sorted {
        print_issue(issue, writer, max_line_width);
    }
}

/// Print a success message when no issues are found.
pub fn print_success_to<W: Write>(source_files: usize, locale_files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "\n{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} source {}, {} locale {} - no issues found",
            source_files,
            plural(source_files, "file", "files"),
            locale_files,
            plural(locale_files, "file", "files")
        )
        .green()
    );
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_outcome<W: Write>(outcome: &CheckOutcome, fixing: bool, writer: &mut W) {
    let rule = outcome.rule;
    if outcome.passed() {
        let _ = writeln!(
            writer,
            "{} {}: {}",
            SUCCESS_MARK.green(),
            rule.name().bold(),
            rule.success_message()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}: {}",
            FAILURE_MARK.red(),
            rule.name().bold(),
            headline(outcome)
        );
    }

    if outcome.issues.is_empty() {
        return;
    }
    let _ = writeln!(writer);
    report_to(&outcome.issues, writer);

    if !outcome.passed() && rule.is_fixable() && !fixing {
        let how = match rule {
            CheckRule::NonexistentKeys => "add these keys interactively",
            _ => "fix these issues automatically",
        };
        let _ = writeln!(
            writer,
            "{} run `i18n-check check {} --fix` to {}\n",
            "help:".bold().cyan(),
            rule.name(),
            how
        );
    }
}

fn is_are(count: usize) -> &'static str {
    plural(count, "is", "are")
}

/// One-sentence description of a failing check.
fn headline(outcome: &CheckOutcome) -> String {
    let count_of = |pred: fn(&Issue) -> bool| outcome.issues.iter().filter(|i| pred(i)).count();

    match outcome.rule {
        CheckRule::InvalidKeys => {
            let format = count_of(|i| matches!(i, Issue::InvalidKeyFormat(_)));
            let name = count_of(|i| matches!(i, Issue::InvalidKeyName(_)));
            let mut parts = Vec::new();
            if format > 0 {
                parts.push(format!(
                    "There {} {} i18n {} not formatted correctly.",
                    is_are(format),
                    format,
                    plural(format, "key that is", "keys that are")
                ));
            }
            if name > 0 {
                parts.push(format!(
                    "There {} {} i18n {} not named correctly.",
                    is_are(name),
                    name,
                    plural(name, "key that is", "keys that are")
                ));
            }
            parts.join(" ")
        }
        CheckRule::NonexistentKeys => {
            let n = count_of(|i| matches!(i, Issue::NonexistentKey(_)));
            format!(
                "There {} {} i18n {} not in the i18n source file.",
                is_are(n),
                n,
                plural(n, "key that is", "keys that are")
            )
        }
        CheckRule::UnusedKeys => {
            let n = count_of(|i| matches!(i, Issue::UnusedKey(_)));
            format!(
                "There {} {} i18n {} unused.",
                is_are(n),
                n,
                plural(n, "key that is", "keys that are")
            )
        }
        CheckRule::NonSourceKeys => {
            let files: BTreeSet<&str> = outcome
                .issues
                .iter()
                .filter_map(|i| match i {
                    Issue::NonSourceKey(issue) => Some(issue.context.file_path()),
                    _ => None,
                })
                .collect();
            format!(
                "There {} i18n target JSON {} keys that are not in the i18n source file.",
                plural(files.len(), "is an", "are"),
                plural(files.len(), "file that has", "files that have")
            )
        }
        CheckRule::RepeatKeys => "Duplicate keys found. All i18n keys must be unique.".to_string(),
        CheckRule::RepeatValues => {
            let n = count_of(|i| matches!(i, Issue::RepeatValue(_)));
            format!(
                "There {} {} repeat i18n {} present in the i18n source file.",
                is_are(n),
                n,
                plural(n, "value", "values")
            )
        }
        CheckRule::OrderedKeys => {
            let n = count_of(|i| matches!(i, Issue::UnorderedKeys(_)));
            format!(
                "{} i18n JSON {} keys that are not ordered alphabetically.",
                n,
                plural(n, "file has", "files have")
            )
        }
        CheckRule::MissingKeys => {
            let n = count_of(|i| matches!(i, Issue::MissingKeys(_)));
            format!(
                "There {} {} locale {} with missing keys. Keys are considered missing if they \
                 don't exist or have empty string values.",
                is_are(n),
                n,
                plural(n, "file", "files")
            )
        }
        CheckRule::NestedKeys => {
            let n = count_of(|i| matches!(i, Issue::NestedJson(_)));
            format!(
                "{} i18n JSON {} nested. Keys must be flat, e.g. \"i18n.page.title\".",
                n,
                plural(n, "file is", "files are")
            )
        }
        CheckRule::AltTexts => {
            let n = count_of(|i| matches!(i, Issue::AltText(_)));
            format!(
                "There {} {} alt text {} not end with punctuation.",
                is_are(n),
                n,
                plural(n, "value that does", "values that do")
            )
        }
        CheckRule::AriaLabels => {
            let n = count_of(|i| matches!(i, Issue::AriaLabel(_)));
            format!(
                "There {} {} aria label {} with punctuation.",
                is_are(n),
                n,
                plural(n, "value that ends", "values that end")
            )
        }
    }
}

fn print_fix<W: Write>(fix: &FixOutcome, writer: &mut W) {
    let stats = &fix.stats;
    let _ = write!(
        writer,
        "{} {}: {} {} in {} {}",
        "Fixed".green().bold(),
        fix.rule.name(),
        stats.changes_applied,
        plural(stats.changes_applied, "change", "changes"),
        stats.files_modified,
        plural(stats.files_modified, "file", "files")
    );
    if stats.skipped > 0 {
        let _ = write!(writer, " ({} skipped)", stats.skipped.to_string().yellow());
    }
    let _ = writeln!(writer);
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col) = extract_location_info(&loc);

    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let usages = issue.usages();
    if !usages.is_empty() {
        print_usages(usages, writer, max_line_width);
    }

    let _ = writeln!(writer);
}

fn print_usages<W: Write>(usages: &[String], writer: &mut W, max_line_width: usize) {
    let total = usages.len();
    let display_count = total.min(MAX_USAGES_DISPLAY);

    for (i, usage) in usages.iter().take(display_count).enumerate() {
        let is_last = i == display_count - 1;
        let remaining = total.saturating_sub(display_count);
        let suffix = if is_last && remaining > 0 {
            format!(" (and {} more)", remaining)
        } else {
            String::new()
        };

        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}{}",
            "",
            "=".blue(),
            "used:".bold(),
            usage,
            suffix,
            width = max_line_width
        );
    }
}

fn print_summary<W: Write>(issues: &[&Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    let _ = writeln!(
        writer,
        "\n{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        total_problems,
        plural(total_problems, "problem", "problems"),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}

fn extract_location_info<'a>(loc: &'a ReportLocation<'a>) -> (&'a str, usize, usize) {
    match loc {
        ReportLocation::Message(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
        ReportLocation::File { path } => (path, 0, 0),
    }
}

fn calculate_max_line_width(issues: &[&Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Message(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    let a_loc = a.location();
    let b_loc = b.location();
    let (a_path, a_line, a_col) = extract_location_info(&a_loc);
    let (b_path, b_line, b_col) = extract_location_info(&b_loc);

    a_path
        .cmp(b_path)
        .then_with(|| a_line.cmp(&b_line))
        .then_with(|| a_col.cmp(&b_col))
        .then_with(|| a.message().cmp(&b.message()))
}
