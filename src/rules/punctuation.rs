//! Punctuation rules for accessibility strings.
//!
//! Screen readers pause at terminal punctuation. Alt texts describe an image
//! in a full sentence and must end with punctuation; aria labels name a
//! control and must not.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    core::{CheckContext, SourceDictionary},
    issues::{AltTextIssue, AriaLabelIssue},
    rules::CheckRule,
};

pub const ALT_TEXT_SUFFIX: &str = "_alt_text";
pub const ARIA_LABEL_SUFFIX: &str = "_aria_label";

/// Characters that end a sentence or a clause, Arabic question mark included.
const TERMINAL_PUNCTUATION: [char; 7] = ['.', '!', '?', ',', ';', ':', '؟'];

fn ends_with_punctuation(text: &str) -> bool {
    text.trim_end().ends_with(TERMINAL_PUNCTUATION)
}

/// String values of keys ending in `suffix`, skipping empty ones.
fn values_with_suffix<'a>(
    dictionary: &'a SourceDictionary,
    suffix: &'a str,
) -> impl Iterator<Item = (&'a String, &'a str)> {
    dictionary
        .values
        .iter()
        .filter(move |(key, _)| key.ends_with(suffix))
        .filter_map(|(key, value)| match value {
            Value::String(text) if !text.is_empty() => Some((key, text.as_str())),
            _ => None,
        })
}

/// Alt texts lacking terminal punctuation, mapped to the corrected value.
pub fn find_alt_text_issues(dictionary: &SourceDictionary) -> BTreeMap<String, String> {
    values_with_suffix(dictionary, ALT_TEXT_SUFFIX)
        .filter(|(_, text)| !ends_with_punctuation(text))
        .map(|(key, text)| (key.clone(), format!("{}.", text.trim_end())))
        .collect()
}

/// Aria labels ending in punctuation, mapped to the corrected value.
pub fn find_aria_label_issues(dictionary: &SourceDictionary) -> BTreeMap<String, String> {
    values_with_suffix(dictionary, ARIA_LABEL_SUFFIX)
        .filter(|(_, text)| ends_with_punctuation(text))
        .map(|(key, text)| {
            let fixed = text.trim_end_matches(|c: char| {
                TERMINAL_PUNCTUATION.contains(&c) || c.is_whitespace()
            });
            (key.clone(), fixed.to_string())
        })
        .collect()
}

pub fn check_alt_texts_issues(ctx: &CheckContext) -> Vec<AltTextIssue> {
    find_alt_text_issues(&ctx.source)
        .into_iter()
        .filter(|(key, _)| !ctx.is_ignored(CheckRule::AltTexts, key))
        .map(|(key, suggested)| AltTextIssue {
            context: ctx.source.context(&key),
            suggested,
        })
        .collect()
}

pub fn check_aria_labels_issues(ctx: &CheckContext) -> Vec<AriaLabelIssue> {
    find_aria_label_issues(&ctx.source)
        .into_iter()
        .filter(|(key, _)| !ctx.is_ignored(CheckRule::AriaLabels, key))
        .map(|(key, suggested)| AriaLabelIssue {
            context: ctx.source.context(&key),
            suggested,
        })
        .collect()
}
