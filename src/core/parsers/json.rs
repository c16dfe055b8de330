use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{
    Deserialize, Deserializer,
    de::{self, MapAccess, SeqAccess, Visitor},
};
use serde_json::{Number, Value};
use walkdir::WalkDir;

use crate::{core::LocaleFile, utils::relative_display};

/// A warning from scanning locale files.
#[derive(Debug, Clone)]
pub struct LocaleScanWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScanLocalesResult {
    pub files: Vec<LocaleFile>,
    pub warnings: Vec<LocaleScanWarning>,
}

/// Read and parse a flat locale file.
///
/// `root` is only used to derive the reported path.
pub fn parse_locale_file(path: &Path, root: &Path) -> Result<LocaleFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    parse_locale_str(content, relative_display(path, root), path)
}

/// Parse locale file contents that were already read.
pub fn parse_locale_str(
    content: String,
    file_path: impl Into<String>,
    path: impl Into<PathBuf>,
) -> Result<LocaleFile> {
    let file_path = file_path.into();
    let path = path.into();

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", file_path))?;
    let Value::Object(values) = json else {
        bail!("Root of JSON file must be an object: {}", file_path);
    };

    let locale = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(LocaleFile::new(locale, file_path, path, content, values))
}

/// Load every `.json` file below `dir`, sorted by path.
///
/// Files that cannot be read or parsed become warnings instead of errors so a
/// single broken locale does not stop the run.
pub fn scan_locale_files(dir: &Path, root: &Path) -> ScanLocalesResult {
    let mut result = ScanLocalesResult::default();

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    for path in paths {
        match parse_locale_file(&path, root) {
            Ok(file) => result.files.push(file),
            Err(e) => result.warnings.push(LocaleScanWarning {
                file_path: relative_display(&path, root),
                error: format!("{:#}", e),
            }),
        }
    }

    result
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0]; // Line 1 starts at offset 0
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1, // Exact match at line start
        Err(line) => line,    // Falls within this line
    }
}

/// Find the line and column where a flat key is declared.
///
/// Only matches followed by `:` count, so a value with the same text as a key
/// is never reported as the declaration. Falls back to `(1, 1)`.
pub fn find_key_position(content: &str, key: &str, line_index: &[usize]) -> (usize, usize) {
    find_key_offset(content, key, 0)
        .map(|offset| {
            let line = offset_to_line(line_index, offset);
            let line_start = line_index[line - 1];
            let col = content[line_start..offset].chars().count() + 1;
            (line, col)
        })
        .unwrap_or((1, 1))
}

/// Byte offset of the first `"key":` occurrence at or after `from`.
pub fn find_key_offset(content: &str, key: &str, from: usize) -> Option<usize> {
    let pattern = serde_json::to_string(key).ok()?;
    let mut pos = from;
    while let Some(rel_pos) = content.get(pos..)?.find(&pattern) {
        let abs_pos = pos + rel_pos;
        let after_pattern = abs_pos + pattern.len();
        let preceded_by_escape = abs_pos > 0 && content.as_bytes()[abs_pos - 1] == b'\\';
        if !preceded_by_escape && content[after_pattern..].trim_start().starts_with(':') {
            return Some(abs_pos);
        }
        pos = abs_pos + 1;
    }
    None
}

// ============================================================
// Pairs-preserving parse
// ============================================================

/// A JSON value whose objects keep every key/value pair, duplicates included.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderedValue {
    Object(Vec<(String, OrderedValue)>),
    Array(Vec<OrderedValue>),
    Scalar(Value),
}

impl OrderedValue {
    /// Convert to a regular JSON value; later duplicates win.
    pub fn to_value(&self) -> Value {
        match self {
            OrderedValue::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
            OrderedValue::Array(items) => {
                Value::Array(items.iter().map(OrderedValue::to_value).collect())
            }
            OrderedValue::Scalar(value) => value.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for OrderedValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(OrderedValueVisitor)
    }
}

struct OrderedValueVisitor;

impl<'de> Visitor<'de> for OrderedValueVisitor {
    type Value = OrderedValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> std::result::Result<OrderedValue, E>
    where
        E: de::Error,
    {
        Ok(OrderedValue::Scalar(Value::Bool(v)))
    }

    fn visit_i64<E>(self, v: i64) -> std::result::Result<OrderedValue, E>
    where
        E: de::Error,
    {
        Ok(OrderedValue::Scalar(Value::Number(v.into())))
    }

    fn visit_u64<E>(self, v: u64) -> std::result::Result<OrderedValue, E>
    where
        E: de::Error,
    {
        Ok(OrderedValue::Scalar(Value::Number(v.into())))
    }

    fn visit_f64<E>(self, v: f64) -> std::result::Result<OrderedValue, E>
    where
        E: de::Error,
    {
        Ok(OrderedValue::Scalar(
            Number::from_f64(v).map_or(Value::Null, Value::Number),
        ))
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<OrderedValue, E>
    where
        E: de::Error,
    {
        Ok(OrderedValue::Scalar(Value::String(v.to_string())))
    }

    fn visit_string<E>(self, v: String) -> std::result::Result<OrderedValue, E>
    where
        E: de::Error,
    {
        Ok(OrderedValue::Scalar(Value::String(v)))
    }

    fn visit_unit<E>(self) -> std::result::Result<OrderedValue, E>
    where
        E: de::Error,
    {
        Ok(OrderedValue::Scalar(Value::Null))
    }

    fn visit_none<E>(self) -> std::result::Result<OrderedValue, E>
    where
        E: de::Error,
    {
        Ok(OrderedValue::Scalar(Value::Null))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<OrderedValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(OrderedValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<OrderedValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, OrderedValue>()? {
            entries.push((key, value));
        }
        Ok(OrderedValue::Object(entries))
    }
}

/// Parse JSON text keeping duplicate object keys.
pub fn parse_ordered(content: &str) -> Result<OrderedValue> {
    serde_json::from_str(content).context("Failed to parse JSON")
}

/// A key declared more than once inside the same JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    /// Dotted path of the key, including its parent objects.
    pub key: String,
    /// Every value the key was given, in file order.
    pub values: Vec<String>,
}

/// Collect keys that repeat within any single object, at any depth.
pub fn find_duplicate_keys(value: &OrderedValue) -> Vec<DuplicateKey> {
    let mut duplicates = Vec::new();
    collect_duplicates(value, "", &mut duplicates);
    duplicates
}

fn collect_duplicates(value: &OrderedValue, prefix: &str, out: &mut Vec<DuplicateKey>) {
    match value {
        OrderedValue::Object(entries) => {
            let mut seen: BTreeMap<&str, Vec<&OrderedValue>> = BTreeMap::new();
            let mut order: Vec<&str> = Vec::new();
            for (key, val) in entries {
                let slot = seen.entry(key.as_str()).or_default();
                if slot.is_empty() {
                    order.push(key.as_str());
                }
                slot.push(val);
            }

            for key in order {
                let full_key = if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{}.{}", prefix, key)
                };
                let values = &seen[key];
                if values.len() > 1 {
                    out.push(DuplicateKey {
                        key: full_key.clone(),
                        values: values
                            .iter()
                            .map(|v| crate::core::display_value(&v.to_value()))
                            .collect(),
                    });
                }
                for val in values {
                    collect_duplicates(val, &full_key, out);
                }
            }
        }
        OrderedValue::Array(items) => {
            for item in items {
                collect_duplicates(item, prefix, out);
            }
        }
        OrderedValue::Scalar(_) => {}
    }
}
