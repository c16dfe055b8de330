//! Common utility functions shared across the codebase.

use std::{path::Path, sync::LazyLock};

use regex::Regex;

static VALID_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9._]+$").unwrap());

/// Checks that an i18n key only uses lowercase ASCII letters, digits, `.` and `_`.
///
/// # Examples
///
/// ```
/// use i18n_check::utils::is_valid_key;
///
/// assert!(is_valid_key("valid.key_1"));
/// assert!(is_valid_key("i18n._global.save"));
/// assert!(!is_valid_key("Invalid-Key"));
/// assert!(!is_valid_key("i18n.has space"));
/// assert!(!is_valid_key(""));
/// ```
pub fn is_valid_key(key: &str) -> bool {
    VALID_KEY_RE.is_match(key)
}

/// Lowercases the text and removes ASCII punctuation, keeping `!`.
///
/// Used to decide whether two values are repeats of each other.
///
/// # Examples
///
/// ```
/// use i18n_check::utils::normalize_value;
///
/// assert_eq!(normalize_value("Save changes."), "save changes");
/// assert_eq!(normalize_value("Don't stop!"), "dont stop!");
/// assert_eq!(normalize_value("Ünïcode"), "ünïcode");
/// ```
pub fn normalize_value(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation() || *c == '!')
        .collect()
}

/// Renders `path` relative to `root` with `/` separators.
///
/// Paths outside `root` are rendered as given.
pub fn relative_display(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let rendered = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if rendered.is_empty() {
        ".".to_string()
    } else {
        rendered
    }
}

/// Picks the singular or plural form of a word for `count`.
pub fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
