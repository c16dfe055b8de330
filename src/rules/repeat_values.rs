//! Repeat value detection rule.
//!
//! Values that several keys share should be combined into one key under a
//! `_global` segment at the lowest level the keys have in common. Values are
//! compared after lowercasing and removing punctuation, so `Save` and `save.`
//! are repeats. Keys ending in `_lower` exist to hold a lowercase variant of
//! another value and never count as a repeat on their own.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::{
    core::{CheckContext, SourceDictionary, indexer::KeyFileMap, synthesizer::IdealKeySynthesizer},
    issues::RepeatValueIssue,
    rules::CheckRule,
    utils::normalize_value,
};

/// Placeholder leaf of a suggested consolidated key.
pub const CONTENT_REFERENCE: &str = "CONTENT_REFERENCE";

const LOWER_SUFFIX: &str = "_lower";

/// A value shared by several keys, with the key proposed to replace them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatValueGroup {
    /// The normalized value.
    pub value: String,
    /// Number of keys with this value, `_lower` keys included.
    pub count: usize,
    /// Keys to combine, in dictionary order.
    pub keys: Vec<String>,
    pub suggested: String,
}

pub fn check_repeat_values_issues(ctx: &CheckContext) -> Vec<RepeatValueIssue> {
    let rule = CheckRule::RepeatValues;
    let counts = count_repeat_values(&ctx.source);
    if counts.is_empty() {
        return Vec::new();
    }

    let key_file_map = ctx.key_file_map(rule);
    let (_, groups) = suggest_consolidation(&ctx.source, &counts, &key_file_map, &ctx.synthesizer);

    groups
        .into_iter()
        .filter_map(|mut group| {
            group.keys.retain(|key| !ctx.is_ignored(rule, key));
            if group.keys.len() < 2 {
                return None;
            }
            Some(RepeatValueIssue {
                context: ctx.source.context(&group.keys[0]),
                value: group.value,
                count: group.count,
                keys: group.keys,
                suggested: group.suggested,
            })
        })
        .collect()
}

/// The normalized form of a value, for strings, numbers and booleans.
fn comparable_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(normalize_value(s)),
        Value::Number(n) => Some(normalize_value(&n.to_string())),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Normalized values used by more than one key, with their counts.
pub fn count_repeat_values(dictionary: &SourceDictionary) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in dictionary.values.values().filter_map(comparable_value) {
        *counts.entry(value).or_default() += 1;
    }
    counts.retain(|_, count| *count > 1);
    counts
}

/// Propose one consolidated key per repeated value.
///
/// Values repeated only because of `_lower` keys are dropped from the
/// returned counts. Counts of the remaining values are kept as given.
pub fn suggest_consolidation(
    dictionary: &SourceDictionary,
    counts: &BTreeMap<String, usize>,
    key_file_map: &KeyFileMap,
    synthesizer: &IdealKeySynthesizer,
) -> (BTreeMap<String, usize>, Vec<RepeatValueGroup>) {
    let mut kept = BTreeMap::new();
    let mut groups = Vec::new();

    for (value, &count) in counts {
        let keys: Vec<String> = dictionary
            .values
            .iter()
            .filter(|(key, v)| {
                !key.ends_with(LOWER_SUFFIX) && comparable_value(v).as_ref() == Some(value)
            })
            .map(|(key, _)| key.clone())
            .collect();

        if keys.len() < 2 {
            continue;
        }

        let suggested = suggested_key(&keys, key_file_map, synthesizer);
        kept.insert(value.clone(), count);
        groups.push(RepeatValueGroup {
            value: value.clone(),
            count,
            keys,
            suggested,
        });
    }

    (kept, groups)
}

/// The `_global` key for `keys`: under the ideal prefix of the files using
/// them, or under their longest common prefix when no file uses them.
fn suggested_key(
    keys: &[String],
    key_file_map: &KeyFileMap,
    synthesizer: &IdealKeySynthesizer,
) -> String {
    let files: BTreeSet<&str> = keys
        .iter()
        .filter_map(|key| key_file_map.get(key))
        .flatten()
        .map(String::as_str)
        .collect();

    if !files.is_empty() {
        let prefix = synthesizer.ideal_prefix(files);
        let global = format!("{}.", crate::core::synthesizer::GLOBAL_SEGMENT);
        return if prefix.ends_with(&global) {
            format!("{}{}", prefix, CONTENT_REFERENCE)
        } else {
            format!("{}{}{}", prefix, global, CONTENT_REFERENCE)
        };
    }

    let common = common_key_prefix(keys);
    if common.is_empty() {
        format!("{}_global.{}", synthesizer.namespace(), CONTENT_REFERENCE)
    } else {
        format!("{}._global.{}", common, CONTENT_REFERENCE)
    }
}

/// Longest common character prefix of `keys`, cut back to its last complete
/// segment, with `._global` segments removed.
fn common_key_prefix(keys: &[String]) -> String {
    let Some(first) = keys.first() else {
        return String::new();
    };

    let mut common_len = first.len();
    for key in &keys[1..] {
        common_len = first
            .char_indices()
            .zip(key.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, c), _)| i + c.len_utf8())
            .min(common_len);
    }

    let common = &first[..common_len];
    let cut = match common.rfind('.') {
        Some(dot) => &common[..dot],
        None => "",
    };
    cut.replace("._global", "")
}
