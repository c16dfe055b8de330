use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::core::parsers::json::{build_line_index, find_key_position, offset_to_line};

/// Position information in locale files (JSON).
///
/// Represents a specific location in a locale JSON file, used for error reporting
/// when there are issues with keys or values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageLocation {
    /// Path to the locale file (e.g., "src/i18n/en-US.json").
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

impl MessageLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    /// Create with default column (1).
    pub fn with_line(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col: 1,
        }
    }

    /// Location of a byte offset within `content`.
    pub fn at_offset(file_path: impl Into<String>, content: &str, offset: usize) -> Self {
        let line_index = build_line_index(content);
        let line = offset_to_line(&line_index, offset);
        let line_start = line_index[line - 1];
        let col = content
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count())
            + 1;
        Self::new(file_path, line, col)
    }
}

/// Position with context information in locale files.
///
/// Contains the key and the displayed value at this location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub location: MessageLocation,
    /// The i18n key (e.g., "i18n.profile_page.title").
    pub key: String,
    /// The value rendered as text (strings verbatim, other scalars as JSON).
    pub value: String,
}

impl MessageContext {
    pub fn new(
        location: MessageLocation,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            location,
            key: key.into(),
            value: value.into(),
        }
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

/// A flat locale JSON file, loaded once per run.
///
/// `values` keeps the top-level entries in file order. Literal duplicate keys
/// collapse to their last value here; the repeat-keys rule re-parses `content`
/// to see them.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    /// Locale name taken from the file stem (e.g., "en-US").
    pub locale: String,
    /// Path used for reporting, relative to the project root.
    pub file_path: String,
    /// Path used for reading and writing.
    pub path: PathBuf,
    /// Raw file contents.
    pub content: String,
    /// Top-level entries in file order.
    pub values: Map<String, Value>,
    line_index: Vec<usize>,
}

/// The canonical locale file that defines every valid key.
pub type SourceDictionary = LocaleFile;

impl LocaleFile {
    pub fn new(
        locale: impl Into<String>,
        file_path: impl Into<String>,
        path: impl Into<PathBuf>,
        content: String,
        values: Map<String, Value>,
    ) -> Self {
        let line_index = crate::core::parsers::json::build_line_index(&content);
        Self {
            locale: locale.into(),
            file_path: file_path.into(),
            path: path.into(),
            content,
            values,
            line_index,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a report context for `key`, pointing at the line that declares it.
    pub fn context(&self, key: &str) -> MessageContext {
        let (line, col) = find_key_position(&self.content, key, &self.line_index);
        let value = self.values.get(key).map(display_value).unwrap_or_default();
        MessageContext::new(MessageLocation::new(&self.file_path, line, col), key, value)
    }
}

/// Render a JSON value for reports: strings verbatim, anything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
