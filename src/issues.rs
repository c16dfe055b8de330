//! Issue types for i18n check results.
//!
//! This module defines all issue types that the checks can report.
//! Each issue is self-contained with all information needed by:
//! - Reporter: to display the issue to users
//! - Action: to fix the issue (rename keys, sort files, rewrite values)

use enum_dispatch::enum_dispatch;

use crate::core::MessageContext;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    InvalidKeyFormat,
    InvalidKeyName,
    NonexistentKey,
    UnusedKey,
    NonSourceKey,
    RepeatKey,
    RepeatValue,
    UnorderedKeys,
    MissingKeys,
    NestedJson,
    AltTextPunctuation,
    AriaLabelPunctuation,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::InvalidKeyFormat => write!(f, "invalid-key-format"),
            Rule::InvalidKeyName => write!(f, "invalid-key-name"),
            Rule::NonexistentKey => write!(f, "nonexistent-key"),
            Rule::UnusedKey => write!(f, "unused-key"),
            Rule::NonSourceKey => write!(f, "non-source-key"),
            Rule::RepeatKey => write!(f, "repeat-key"),
            Rule::RepeatValue => write!(f, "repeat-value"),
            Rule::UnorderedKeys => write!(f, "unordered-keys"),
            Rule::MissingKeys => write!(f, "missing-keys"),
            Rule::NestedJson => write!(f, "nested-json"),
            Rule::AltTextPunctuation => write!(f, "alt-text-punctuation"),
            Rule::AriaLabelPunctuation => write!(f, "aria-label-punctuation"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Keys
// ============================================================

/// Key that uses characters other than lowercase letters, digits, `.` and `_`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKeyFormatIssue {
    pub context: MessageContext,
}

impl InvalidKeyFormatIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidKeyFormat
    }
}

/// Key whose prefix does not match the location of the files using it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKeyNameIssue {
    pub context: MessageContext,
    /// The ideal key inferred from the files using it.
    pub suggested: String,
    /// Source files using the key.
    pub usages: Vec<String>,
}

impl InvalidKeyNameIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidKeyName
    }
}

/// Key used in source files but not defined in the source dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonexistentKeyIssue {
    /// Points at the first file using the key.
    pub context: MessageContext,
    /// Every source file using the key.
    pub usages: Vec<String>,
}

impl NonexistentKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::NonexistentKey
    }
}

/// Key defined in the source dictionary but never used in source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeyIssue {
    pub context: MessageContext,
}

impl UnusedKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnusedKey
    }
}

/// Key in a translated locale file that the source dictionary does not define.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonSourceKeyIssue {
    pub context: MessageContext,
    /// The locale where this key exists.
    pub locale: String,
}

impl NonSourceKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::NonSourceKey
    }
}

/// Key declared more than once in the same JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatKeyIssue {
    pub context: MessageContext,
    /// Every value given to the key, in file order.
    pub values: Vec<String>,
}

impl RepeatKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::RepeatKey
    }
}

/// Value shared by several keys of the source dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatValueIssue {
    /// Points at the first key with this value.
    pub context: MessageContext,
    /// The normalized value.
    pub value: String,
    /// Number of keys with this value, `_lower` keys included.
    pub count: usize,
    /// Keys to combine, `_lower` keys excluded.
    pub keys: Vec<String>,
    /// Proposed key for the combined value.
    pub suggested: String,
}

impl RepeatValueIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::RepeatValue
    }
}

// ============================================================
// Issue Types - Locale Files
// ============================================================

/// Locale file whose top-level keys are not in alphabetical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnorderedKeysIssue {
    pub file_path: String,
    /// First key that is out of place.
    pub first_unordered: String,
}

impl UnorderedKeysIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnorderedKeys
    }
}

/// Translated locale file lacking keys (or values) from the source dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeysIssue {
    pub file_path: String,
    pub locale: String,
    /// Keys absent from the locale or set to an empty string.
    pub missing: Vec<String>,
    /// Number of keys in the source dictionary.
    pub total: usize,
}

impl MissingKeysIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingKeys
    }

    /// Share of source keys missing, in percent.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.missing.len() as f64 * 100.0 / self.total as f64
        }
    }
}

/// Locale file with nested objects instead of flat keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedJsonIssue {
    pub file_path: String,
    /// Top-level keys whose values are objects.
    pub nested_keys: Vec<String>,
}

impl NestedJsonIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::NestedJson
    }
}

/// `_alt_text` value without terminal punctuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltTextIssue {
    pub context: MessageContext,
    pub suggested: String,
}

impl AltTextIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::AltTextPunctuation
    }
}

/// `_aria_label` value ending in punctuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AriaLabelIssue {
    pub context: MessageContext,
    pub suggested: String,
}

impl AriaLabelIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::AriaLabelPunctuation
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// File could not be read or parsed; it is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An i18n issue found by a check.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    InvalidKeyFormat(InvalidKeyFormatIssue),
    InvalidKeyName(InvalidKeyNameIssue),
    NonexistentKey(NonexistentKeyIssue),
    UnusedKey(UnusedKeyIssue),
    NonSourceKey(NonSourceKeyIssue),
    RepeatKey(RepeatKeyIssue),
    RepeatValue(RepeatValueIssue),
    UnorderedKeys(UnorderedKeysIssue),
    MissingKeys(MissingKeysIssue),
    NestedJson(NestedJsonIssue),
    AltText(AltTextIssue),
    AriaLabel(AriaLabelIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Locale or source file position with key context.
    Message(&'a MessageContext),
    /// File-level only (no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to the CLI.
///
/// This trait is implemented by all issue types to provide a consistent
/// interface for the report functions. Uses `enum_dispatch` for zero-cost
/// dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, value, file, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Source files using the key.
    fn usages(&self) -> &[String] {
        &[]
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for InvalidKeyFormatIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some("use only lowercase letters, digits, '.' and '_'".to_string())
    }
}

impl Report for InvalidKeyNameIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some(format!("rename to {}", self.suggested))
    }

    fn usages(&self) -> &[String] {
        &self.usages
    }
}

impl Report for NonexistentKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some("add the key to the i18n-src file or fix the reference".to_string())
    }

    fn usages(&self) -> &[String] {
        &self.usages
    }
}

impl Report for UnusedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("(\"{}\")", self.context.value))
    }
}

impl Report for NonSourceKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("in locale '{}' only", self.locale))
    }
}

impl Report for RepeatKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let values: Vec<String> = self.values.iter().map(|v| format!("\"{}\"", v)).collect();
        Some(format!(
            "declared {} times with values {}",
            self.values.len(),
            values.join(", ")
        ))
    }
}

impl Report for RepeatValueIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.value.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some(format!("combine into {}", self.suggested))
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} instances, keys: {}",
            self.count,
            self.keys.join(", ")
        ))
    }
}

impl Report for UnorderedKeysIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.file_path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("\"{}\" is out of order", self.first_unordered))
    }
}

impl Report for MissingKeysIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.locale.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} of {} keys missing ({:.1}%): {}",
            self.missing.len(),
            self.total,
            self.percentage(),
            preview_list(&self.missing, 5)
        ))
    }
}

impl Report for NestedJsonIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.file_path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("nested under {}", preview_list(&self.nested_keys, 5)))
    }

    fn hint(&self) -> Option<String> {
        Some("flatten to dotted keys so keys can be searched and replaced".to_string())
    }
}

impl Report for AltTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("(\"{}\")", self.context.value))
    }

    fn hint(&self) -> Option<String> {
        Some(format!("change to \"{}\"", self.suggested))
    }
}

impl Report for AriaLabelIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("(\"{}\")", self.context.value))
    }

    fn hint(&self) -> Option<String> {
        Some(format!("change to \"{}\"", self.suggested))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("file skipped".to_string())
    }
}

/// Join the first `limit` items, noting how many were left out.
fn preview_list(items: &[String], limit: usize) -> String {
    let shown = items
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > limit {
        format!("{} (and {} more)", shown, items.len() - limit)
    } else {
        shown
    }
}
