//! File operations produced by actions.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{core::tokenizer::replace_quoted_token, json_editor::JsonEditor};

/// One edit of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Rename top-level keys of a locale file.
    RenameJsonKeys {
        file_path: PathBuf,
        renames: BTreeMap<String, String>,
    },
    /// Replace string values of top-level keys of a locale file.
    SetJsonValues {
        file_path: PathBuf,
        values: BTreeMap<String, String>,
    },
    /// Sort the top-level keys of a locale file.
    SortJsonKeys { file_path: PathBuf },
    /// Add a new top-level string entry to a locale file.
    AddJsonValue {
        file_path: PathBuf,
        key: String,
        value: String,
    },
    /// Replace quoted key references in a source file.
    ReplaceSourceKeys {
        file_path: PathBuf,
        renames: BTreeMap<String, String>,
    },
}

impl Operation {
    pub fn file_path(&self) -> &Path {
        match self {
            Operation::RenameJsonKeys { file_path, .. }
            | Operation::SetJsonValues { file_path, .. }
            | Operation::SortJsonKeys { file_path }
            | Operation::AddJsonValue { file_path, .. }
            | Operation::ReplaceSourceKeys { file_path, .. } => file_path,
        }
    }

    /// Apply the operation. Returns the number of changes written.
    pub fn execute(&self) -> Result<usize> {
        let applied = match self {
            Operation::RenameJsonKeys { file_path, renames } => {
                let mut editor = JsonEditor::open(file_path)?;
                let count = editor.rename_keys(renames)?;
                editor.save()?;
                count
            }
            Operation::SetJsonValues { file_path, values } => {
                let mut editor = JsonEditor::open(file_path)?;
                let count = editor.set_string_values(values)?;
                editor.save()?;
                count
            }
            Operation::SortJsonKeys { file_path } => {
                let mut editor = JsonEditor::open(file_path)?;
                let sorted = editor.sort_keys()?;
                editor.save()?;
                usize::from(sorted)
            }
            Operation::AddJsonValue {
                file_path,
                key,
                value,
            } => {
                let mut editor = JsonEditor::open(file_path)?;
                let added = editor.insert_string_value(key, value)?;
                editor.save()?;
                usize::from(added)
            }
            Operation::ReplaceSourceKeys { file_path, renames } => {
                replace_source_keys(file_path, renames)?
            }
        };

        if applied > 0 {
            tracing::debug!("applied {} change(s) to {}", applied, self.file_path().display());
        }
        Ok(applied)
    }
}

fn replace_source_keys(file_path: &Path, renames: &BTreeMap<String, String>) -> Result<usize> {
    let mut content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    let mut total = 0;
    for (old, new) in renames {
        let (replaced, count) = replace_quoted_token(&content, old, new);
        content = replaced;
        total += count;
    }

    if total > 0 {
        fs::write(file_path, &content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;
    }
    Ok(total)
}
