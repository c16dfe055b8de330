use crate::{
    cli::actions::ActionStats,
    issues::{Issue, Severity},
    rules::CheckRule,
};

/// Issues found by one check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub rule: CheckRule,
    pub issues: Vec<Issue>,
}

impl CheckOutcome {
    /// A check passes when it reports no errors; warnings alone do not fail it.
    pub fn passed(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|issue| issue.severity() == Severity::Error)
    }
}

/// Fixes applied for one check in `--fix` mode.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    pub rule: CheckRule,
    pub stats: ActionStats,
}

#[derive(Debug)]
pub struct CheckSummary {
    /// One outcome per selected check, in selection order.
    pub outcomes: Vec<CheckOutcome>,
    /// Locale files that could not be loaded.
    pub parse_errors: Vec<Issue>,
    pub fixes: Vec<FixOutcome>,
    pub fix: bool,
}

/// Result of running the check command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CheckSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
    /// Number of source files scanned.
    pub source_files_checked: usize,
    /// Number of locale JSON files checked, the i18n-src file included.
    pub locale_files_checked: usize,
}
