//! Key-to-file indexing.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;

use crate::{
    config::KeyMatching,
    core::{
        file_scanner::FileContentIndex,
        tokenizer::{KeyTokenizer, contains_quoted_token},
    },
};

/// Key to the files (relative to the source directory, extension stripped)
/// that reference it. Keys referenced nowhere are absent.
pub type KeyFileMap = BTreeMap<String, BTreeSet<String>>;

/// Map every key of `keys` to the files that reference it.
///
/// With [`KeyMatching::Token`] a file references a key when the key appears as
/// a whole quoted literal. [`KeyMatching::Substring`] accepts any occurrence of
/// the key text, which also matches keys that are prefixes of longer keys.
pub fn map_keys_to_files<'a, I>(keys: I, index: &FileContentIndex, matching: KeyMatching) -> KeyFileMap
where
    I: IntoIterator<Item = &'a str>,
{
    let keys: BTreeSet<&str> = keys.into_iter().collect();
    let files: Vec<(&str, &str)> = index.iter().collect();

    let per_file: Vec<(String, Vec<&str>)> = files
        .par_iter()
        .map(|(path, content)| {
            let hits: Vec<&str> = match matching {
                KeyMatching::Token => keys
                    .iter()
                    .copied()
                    .filter(|key| contains_quoted_token(content, key))
                    .collect(),
                KeyMatching::Substring => keys
                    .iter()
                    .copied()
                    .filter(|key| content.contains(key))
                    .collect(),
            };
            (strip_extension(path), hits)
        })
        .collect();

    let mut map = KeyFileMap::new();
    for (file, hits) in per_file {
        for key in hits {
            map.entry(key.to_string()).or_default().insert(file.clone());
        }
    }
    map
}

/// Map every namespaced token found in source files to the files using it.
///
/// Paths keep their extension so they can be reported as locations.
pub fn map_namespaced_tokens_to_files(
    index: &FileContentIndex,
    tokenizer: &KeyTokenizer,
) -> BTreeMap<String, BTreeSet<String>> {
    let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (path, content) in index.iter() {
        for key in tokenizer.keys(content) {
            map.entry(key.to_string())
                .or_default()
                .insert(path.to_string());
        }
    }
    map
}

/// Strip the final extension from the file name part of a `/`-separated path.
pub fn strip_extension(path: &str) -> String {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => path[..name_start + dot].to_string(),
        _ => path.to_string(),
    }
}
