//! Detection rules, one module per check.
//!
//! Each rule reads what it needs from [`CheckContext`](crate::core::CheckContext)
//! and returns typed issues. The key-identity rules (`invalid_keys`,
//! `repeat_values`) also expose their pure core so it can be used without a
//! project on disk.

use std::fmt;

use clap::ValueEnum;

pub mod invalid_keys;
pub mod missing_keys;
pub mod nested_keys;
pub mod non_source_keys;
pub mod nonexistent_keys;
pub mod ordered_keys;
pub mod punctuation;
pub mod repeat_keys;
pub mod repeat_values;
pub mod unused_keys;

/// A check that can be selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum CheckRule {
    InvalidKeys,
    NonexistentKeys,
    UnusedKeys,
    NonSourceKeys,
    RepeatKeys,
    RepeatValues,
    OrderedKeys,
    MissingKeys,
    NestedKeys,
    AltTexts,
    AriaLabels,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::InvalidKeys,
            CheckRule::NonexistentKeys,
            CheckRule::UnusedKeys,
            CheckRule::NonSourceKeys,
            CheckRule::RepeatKeys,
            CheckRule::RepeatValues,
            CheckRule::OrderedKeys,
            CheckRule::MissingKeys,
            CheckRule::NestedKeys,
            CheckRule::AltTexts,
            CheckRule::AriaLabels,
        ]
    }

    /// Name used on the command line and in reports.
    pub fn name(&self) -> &'static str {
        match self {
            CheckRule::InvalidKeys => "invalid-keys",
            CheckRule::NonexistentKeys => "nonexistent-keys",
            CheckRule::UnusedKeys => "unused-keys",
            CheckRule::NonSourceKeys => "non-source-keys",
            CheckRule::RepeatKeys => "repeat-keys",
            CheckRule::RepeatValues => "repeat-values",
            CheckRule::OrderedKeys => "ordered-keys",
            CheckRule::MissingKeys => "missing-keys",
            CheckRule::NestedKeys => "nested-keys",
            CheckRule::AltTexts => "alt-texts",
            CheckRule::AriaLabels => "aria-labels",
        }
    }

    /// Name of the check's section under `checks` in the config file.
    pub fn config_name(&self) -> &'static str {
        match self {
            CheckRule::InvalidKeys => "invalidKeys",
            CheckRule::NonexistentKeys => "nonexistentKeys",
            CheckRule::UnusedKeys => "unusedKeys",
            CheckRule::NonSourceKeys => "nonSourceKeys",
            CheckRule::RepeatKeys => "repeatKeys",
            CheckRule::RepeatValues => "repeatValues",
            CheckRule::OrderedKeys => "orderedKeys",
            CheckRule::MissingKeys => "missingKeys",
            CheckRule::NestedKeys => "nestedKeys",
            CheckRule::AltTexts => "altTexts",
            CheckRule::AriaLabels => "ariaLabels",
        }
    }

    /// Whether `--fix` can correct this check's issues.
    pub fn is_fixable(&self) -> bool {
        matches!(
            self,
            CheckRule::InvalidKeys
                | CheckRule::NonexistentKeys
                | CheckRule::OrderedKeys
                | CheckRule::AltTexts
                | CheckRule::AriaLabels
        )
    }

    /// Whether the check scans the source directory for key usage.
    pub fn scans_source_files(&self) -> bool {
        matches!(
            self,
            CheckRule::InvalidKeys
                | CheckRule::NonexistentKeys
                | CheckRule::UnusedKeys
                | CheckRule::RepeatValues
        )
    }

    /// Whether the check reads the translated locale files.
    pub fn reads_locale_files(&self) -> bool {
        matches!(
            self,
            CheckRule::NonSourceKeys
                | CheckRule::RepeatKeys
                | CheckRule::OrderedKeys
                | CheckRule::MissingKeys
                | CheckRule::NestedKeys
        )
    }

    /// Message printed when the check finds nothing.
    pub fn success_message(&self) -> &'static str {
        match self {
            CheckRule::InvalidKeys => {
                "All i18n keys are formatted and named correctly in the i18n-src file."
            }
            CheckRule::NonexistentKeys => "All i18n keys used in source files exist in the i18n-src file.",
            CheckRule::UnusedKeys => "All i18n keys in the i18n-src file are used in source files.",
            CheckRule::NonSourceKeys => "All i18n locale files only contain keys from the i18n-src file.",
            CheckRule::RepeatKeys => "No duplicate keys found in the i18n JSON files.",
            CheckRule::RepeatValues => "No repeat i18n values found in the i18n-src file.",
            CheckRule::OrderedKeys => "All i18n JSON files have alphabetically ordered keys.",
            CheckRule::MissingKeys => "All i18n locale files contain every key from the i18n-src file.",
            CheckRule::NestedKeys => "All i18n JSON files are flat.",
            CheckRule::AltTexts => "All alt text values end with punctuation.",
            CheckRule::AriaLabels => "No aria label values end with punctuation.",
        }
    }
}

impl fmt::Display for CheckRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
