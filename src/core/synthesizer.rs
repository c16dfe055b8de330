//! Ideal key names inferred from where a key is used.
//!
//! A key used in a single file should live under that file's path:
//! `src/profile/ProfilePage.vue` owns keys starting with
//! `i18n.profile_page.`. A key shared by several files moves to the deepest
//! path they have in common followed by a `_global` segment.

use std::sync::LazyLock;

use regex::Regex;

/// Segment marking a key shared by otherwise divergent locations.
pub const GLOBAL_SEGMENT: &str = "_global";

static DYNAMIC_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

/// Convert a file path (relative, extension stripped) to a dotted snake_case key.
///
/// Bracketed route segments such as `[id]` are removed, separators become
/// dots and camelCase words are split with underscores. An uppercase run is
/// kept as one word: `ABCxyz` becomes `abc_xyz`.
///
/// # Examples
///
/// ```
/// use i18n_check::core::synthesizer::path_to_key;
///
/// assert_eq!(path_to_key("user/ProfilePage"), "user.profile_page");
/// assert_eq!(path_to_key("nested.[id]/path/File"), "nested.path.file");
/// assert_eq!(path_to_key("API/v1/RequestData"), "api.v1.request_data");
/// ```
pub fn path_to_key(path: &str) -> String {
    let without_dynamic = DYNAMIC_SEGMENT_RE.replace_all(path, "");
    let dotted = without_dynamic.replace(['/', '\\'], ".");
    let snake = camel_to_snake(&dotted).replace('-', "_");

    let mut parts: Vec<&str> = Vec::new();
    for (i, part) in snake.split('.').enumerate() {
        let part = if i == 0 { part } else { part.trim_start_matches('_') };
        if !part.is_empty() {
            parts.push(part);
        }
    }
    parts.join(".")
}

fn camel_to_snake(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        if c.is_uppercase() {
            if prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
                out.push('_');
            }
        } else if c.is_lowercase()
            && i >= 2
            && chars[i - 1].is_uppercase()
            && chars[i - 2].is_uppercase()
        {
            // An uppercase run of two or more letters ends here.
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Drop parts that only repeat information already in the final part.
///
/// A part is dropped when the final part starts with `part_`, or when it is a
/// proper suffix of the final part.
pub fn filter_key_parts<'a>(parts: &[&'a str]) -> Vec<&'a str> {
    let Some(&last) = parts.last() else {
        return Vec::new();
    };

    parts
        .iter()
        .copied()
        .filter(|&part| {
            let prefix_of_last = last.starts_with(&format!("{}_", part));
            let suffix_of_last = part != last && last.ends_with(part);
            !prefix_of_last && !suffix_of_last
        })
        .collect()
}

/// Keep only the parts that occur once; every copy of a repeated part goes.
fn drop_repeated_parts<'a>(parts: &[&'a str]) -> Vec<&'a str> {
    parts
        .iter()
        .copied()
        .filter(|&part| parts.iter().filter(|&&p| p == part).count() == 1)
        .collect()
}

/// Infers ideal key prefixes under a fixed namespace such as `i18n.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdealKeySynthesizer {
    namespace: String,
}

impl IdealKeySynthesizer {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The prefix every key used by exactly `files` should start with.
    ///
    /// Always ends with `.`. Files are processed in sorted order, so the
    /// result does not depend on the iteration order of the input.
    pub fn ideal_prefix<'a, I>(&self, files: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut files: Vec<&str> = files.into_iter().collect();
        files.sort_unstable();
        files.dedup();

        let keys: Vec<String> = files.iter().map(|f| path_to_key(f)).collect();
        let part_lists: Vec<Vec<&str>> = keys
            .iter()
            .map(|k| k.split('.').filter(|p| !p.is_empty()).collect())
            .collect();

        let filtered = match part_lists.as_slice() {
            [] => Vec::new(),
            [single] => drop_repeated_parts(&filter_key_parts(single)),
            many => filter_key_parts(&common_parts(many)),
        };
        if filtered.is_empty() {
            self.namespace.clone()
        } else {
            format!("{}{}.", self.namespace, filtered.join("."))
        }
    }

    /// The ideal full key: the ideal prefix followed by the key's own leaf.
    pub fn ideal_key<'a, I>(&self, key: &str, files: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let leaf = key.rsplit('.').next().unwrap_or(key);
        format!("{}{}", self.ideal_prefix(files), leaf)
    }
}

/// Walk the part lists position by position. Agreeing positions are kept; the
/// first disagreement adds a single `_global` part. A missing part in a shorter
/// list counts as a disagreement.
fn common_parts<'a>(lists: &[Vec<&'a str>]) -> Vec<&'a str> {
    let depth = lists.iter().map(Vec::len).max().unwrap_or(0);
    let mut parts = Vec::new();
    let mut global_added = false;

    for position in 0..depth {
        let first = lists[0].get(position);
        let agree = first.is_some() && lists.iter().all(|list| list.get(position) == first);
        match first {
            Some(&part) if agree => parts.push(part),
            _ if !global_added => {
                parts.push(GLOBAL_SEGMENT);
                global_added = true;
            }
            _ => {}
        }
    }
    parts
}
