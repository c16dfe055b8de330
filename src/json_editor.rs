//! Formatting-preserving edits of flat locale JSON files.
//!
//! Edits patch the original text entry by entry so indentation, spacing and
//! escapes survive. Every patch is parsed back and compared with the expected
//! data; when the entries cannot be located or the comparison fails, the file
//! is re-serialized with 2-space indentation and a trailing newline instead.

use std::{
    collections::BTreeMap,
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::core::parsers::json::{OrderedValue, parse_ordered};

/// A JSON editor for the top-level entries of a locale file.
pub struct JsonEditor {
    file_path: PathBuf,
    content: String,
    modified: bool,
}

impl JsonEditor {
    /// Open a JSON file for editing.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Self {
            file_path: path.to_path_buf(),
            content,
            modified: false,
        })
    }

    /// Sort top-level keys in code-point order. Returns whether anything moved.
    pub fn sort_keys(&mut self) -> Result<bool> {
        let sorted = sort_top_level_keys(&self.content)?;
        Ok(self.replace_content(sorted))
    }

    /// Rename top-level keys. Returns the number of keys renamed.
    pub fn rename_keys(&mut self, renames: &BTreeMap<String, String>) -> Result<usize> {
        let (content, count) = rename_top_level_keys(&self.content, renames)?;
        self.replace_content(content);
        Ok(count)
    }

    /// Replace the string values of top-level keys. Returns the number of
    /// values changed.
    pub fn set_string_values(&mut self, values: &BTreeMap<String, String>) -> Result<usize> {
        let (content, count) = set_top_level_strings(&self.content, values)?;
        self.replace_content(content);
        Ok(count)
    }

    /// Add a top-level string entry unless the key already exists.
    ///
    /// A sorted file stays sorted; otherwise the entry is appended.
    pub fn insert_string_value(&mut self, key: &str, value: &str) -> Result<bool> {
        let content = insert_top_level_string(&self.content, key, value)?;
        Ok(self.replace_content(content))
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Save the content back to the file if it changed.
    pub fn save(&self) -> Result<()> {
        if !self.modified {
            return Ok(());
        }
        fs::write(&self.file_path, &self.content)
            .with_context(|| format!("Failed to write file: {}", self.file_path.display()))?;
        Ok(())
    }

    /// Get the current content as a string (for testing).
    #[cfg(test)]
    pub fn content(&self) -> &str {
        &self.content
    }

    fn replace_content(&mut self, content: String) -> bool {
        if content == self.content {
            return false;
        }
        self.content = content;
        self.modified = true;
        true
    }
}

// ============================================================
// Operations on text
// ============================================================

/// Sort the top-level keys of a JSON object.
///
/// Already sorted content is returned unchanged, so sorting is idempotent.
/// The sort is stable: repeated keys keep their relative order.
pub fn sort_top_level_keys(content: &str) -> Result<String> {
    let pairs = top_level_pairs(content)?;
    let mut expected = pairs.clone();
    expected.sort_by(|a, b| a.0.cmp(&b.0));
    if expected == pairs {
        return Ok(content.to_string());
    }

    if let Some(entries) = scan_top_level(content).filter(|entries| !entries.is_empty()) {
        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|&a, &b| entries[a].key.cmp(&entries[b].key));

        let mut patched = String::with_capacity(content.len());
        patched.push_str(&content[..entries[0].span().start]);
        for (slot, &index) in order.iter().enumerate() {
            patched.push_str(&content[entries[index].span()]);
            if let Some(next) = entries.get(slot + 1) {
                patched.push_str(&content[entries[slot].span().end..next.span().start]);
            }
        }
        patched.push_str(&content[entries[entries.len() - 1].span().end..]);

        if matches_pairs(&patched, &expected) {
            return Ok(patched);
        }
    }

    tracing::debug!("falling back to re-serialization for key sorting");
    reserialize(&expected)
}

fn rename_top_level_keys(
    content: &str,
    renames: &BTreeMap<String, String>,
) -> Result<(String, usize)> {
    let pairs = top_level_pairs(content)?;
    let mut count = 0;
    let expected: Vec<(String, OrderedValue)> = pairs
        .into_iter()
        .map(|(key, value)| match renames.get(&key) {
            Some(new_key) => {
                count += 1;
                (new_key.clone(), value)
            }
            None => (key, value),
        })
        .collect();
    if count == 0 {
        return Ok((content.to_string(), 0));
    }

    let patched = scan_top_level(content).map(|entries| {
        let edits = entries.iter().filter_map(|entry| {
            let new_key = renames.get(&entry.key)?;
            Some((entry.key_span.clone(), quote(new_key)))
        });
        apply_edits(content, edits)
    });

    match patched {
        Some(patched) if matches_pairs(&patched, &expected) => Ok((patched, count)),
        _ => Ok((reserialize(&expected)?, count)),
    }
}

fn set_top_level_strings(
    content: &str,
    values: &BTreeMap<String, String>,
) -> Result<(String, usize)> {
    let pairs = top_level_pairs(content)?;
    let mut count = 0;
    let expected: Vec<(String, OrderedValue)> = pairs
        .into_iter()
        .map(|(key, value)| match (values.get(&key), &value) {
            (Some(new_value), OrderedValue::Scalar(Value::String(old))) if old != new_value => {
                count += 1;
                let replaced = OrderedValue::Scalar(Value::String(new_value.clone()));
                (key, replaced)
            }
            _ => (key, value),
        })
        .collect();
    if count == 0 {
        return Ok((content.to_string(), 0));
    }

    let patched = scan_top_level(content).map(|entries| {
        let edits = entries.iter().filter_map(|entry| {
            let new_value = values.get(&entry.key)?;
            content[entry.value_span.clone()]
                .starts_with('"')
                .then(|| (entry.value_span.clone(), quote(new_value)))
        });
        apply_edits(content, edits)
    });

    match patched {
        Some(patched) if matches_pairs(&patched, &expected) => Ok((patched, count)),
        _ => Ok((reserialize(&expected)?, count)),
    }
}

fn insert_top_level_string(content: &str, key: &str, value: &str) -> Result<String> {
    let pairs = top_level_pairs(content)?;
    if pairs.iter().any(|(k, _)| k == key) {
        return Ok(content.to_string());
    }

    let was_sorted = pairs.windows(2).all(|w| w[0].0 <= w[1].0);
    let position = if was_sorted {
        pairs.partition_point(|(k, _)| k.as_str() < key)
    } else {
        pairs.len()
    };
    let mut expected = pairs;
    expected.insert(
        position,
        (
            key.to_string(),
            OrderedValue::Scalar(Value::String(value.to_string())),
        ),
    );

    let patched = scan_top_level(content)
        .filter(|entries| !entries.is_empty())
        .and_then(|entries| {
            let first = entries[0].key_span.start;
            let indent = &content[content[..first].rfind('{')? + 1..first];
            let entry = format!("{}: {}", quote(key), quote(value));
            Some(match entries.get(position) {
                Some(next) => {
                    let at = next.key_span.start;
                    apply_edits(content, std::iter::once((at..at, format!("{entry},{indent}"))))
                }
                None => {
                    let at = entries[entries.len() - 1].value_span.end;
                    apply_edits(content, std::iter::once((at..at, format!(",{indent}{entry}"))))
                }
            })
        });

    match patched {
        Some(patched) if matches_pairs(&patched, &expected) => Ok(patched),
        _ => reserialize(&expected),
    }
}

// ============================================================
// Helpers
// ============================================================

fn top_level_pairs(content: &str) -> Result<Vec<(String, OrderedValue)>> {
    match parse_ordered(content)? {
        OrderedValue::Object(pairs) => Ok(pairs),
        _ => bail!("Root of JSON file must be an object"),
    }
}

fn matches_pairs(content: &str, expected: &[(String, OrderedValue)]) -> bool {
    top_level_pairs(content).is_ok_and(|pairs| pairs == expected)
}

fn reserialize(pairs: &[(String, OrderedValue)]) -> Result<String> {
    let map: Map<String, Value> = pairs
        .iter()
        .map(|(key, value)| (key.clone(), value.to_value()))
        .collect();
    let mut out =
        serde_json::to_string_pretty(&Value::Object(map)).context("Failed to serialize JSON")?;
    out.push('\n');
    Ok(out)
}

fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

/// Apply non-overlapping edits given in file order.
fn apply_edits(content: &str, edits: impl Iterator<Item = (Range<usize>, String)>) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    for (range, replacement) in edits {
        out.push_str(&content[last..range.start]);
        out.push_str(&replacement);
        last = range.end;
    }
    out.push_str(&content[last..]);
    out
}

/// Byte spans of one top-level `"key": value` entry.
#[derive(Debug)]
struct Entry {
    key: String,
    key_span: Range<usize>,
    value_span: Range<usize>,
}

impl Entry {
    fn span(&self) -> Range<usize> {
        self.key_span.start..self.value_span.end
    }
}

/// Locate every top-level entry of an object, or `None` if the text is not
/// laid out as expected.
fn scan_top_level(content: &str) -> Option<Vec<Entry>> {
    let bytes = content.as_bytes();
    let mut pos = skip_ws(bytes, 0);
    if bytes.get(pos) != Some(&b'{') {
        return None;
    }
    pos = skip_ws(bytes, pos + 1);

    let mut entries = Vec::new();
    if bytes.get(pos) == Some(&b'}') {
        return Some(entries);
    }

    loop {
        let key_start = pos;
        let key_end = scan_string(bytes, key_start)?;
        let key: String = serde_json::from_str(&content[key_start..key_end]).ok()?;

        pos = skip_ws(bytes, key_end);
        if bytes.get(pos) != Some(&b':') {
            return None;
        }
        let value_start = skip_ws(bytes, pos + 1);
        let value_end = scan_value(bytes, value_start)?;

        entries.push(Entry {
            key,
            key_span: key_start..key_end,
            value_span: value_start..value_end,
        });

        pos = skip_ws(bytes, value_end);
        match bytes.get(pos) {
            Some(b',') => pos = skip_ws(bytes, pos + 1),
            Some(b'}') => return Some(entries),
            _ => return None,
        }
    }
}

fn skip_ws(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
        pos += 1;
    }
    pos
}

/// End (exclusive) of the string starting at `pos`.
fn scan_string(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&b'"') {
        return None;
    }
    let mut i = pos + 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// End (exclusive) of the value starting at `pos`.
fn scan_value(bytes: &[u8], pos: usize) -> Option<usize> {
    match bytes.get(pos)? {
        b'"' => scan_string(bytes, pos),
        b'{' | b'[' => {
            let mut depth = 0usize;
            let mut i = pos;
            while let Some(&b) = bytes.get(i) {
                match b {
                    b'"' => {
                        i = scan_string(bytes, i)?;
                        continue;
                    }
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(i + 1);
                        }
                    }
                    _ => {}
                }
                i += 1;
            }
            None
        }
        _ => {
            let mut i = pos;
            while bytes
                .get(i)
                .is_some_and(|b| !matches!(b, b',' | b'}' | b']') && !b.is_ascii_whitespace())
            {
                i += 1;
            }
            (i > pos).then_some(i)
        }
    }
}
