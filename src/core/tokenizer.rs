//! Quoted-literal tokenizer for source files.
//!
//! Keys are referenced from code as string literals (`'i18n.a.b'`, `"i18n.a.b"`
//! or `` `i18n.a.b` ``). A key token opens with a quote directly followed by
//! the key namespace and runs to the matching quote, with no whitespace or
//! quote characters in between. Anchoring on the namespace keeps apostrophes
//! in markup and enclosing template literals from pairing with the key's
//! own quotes.

use std::collections::BTreeSet;

use anyhow::{Context as _, Result};
use regex::Regex;

const QUOTES: [char; 3] = ['\'', '"', '`'];

/// Finds namespaced key literals in source text.
#[derive(Debug, Clone)]
pub struct KeyTokenizer {
    pattern: Regex,
}

impl KeyTokenizer {
    pub fn new(namespace: &str) -> Result<Self> {
        let namespace = regex::escape(namespace);
        let alternatives: Vec<String> = QUOTES
            .iter()
            .map(|quote| format!(r#"{quote}({namespace}[^'"`\s]+){quote}"#))
            .collect();
        let pattern = Regex::new(&alternatives.join("|"))
            .with_context(|| format!("Invalid key namespace pattern: {}", namespace))?;
        Ok(Self { pattern })
    }

    /// Namespaced keys referenced in `content`.
    pub fn keys<'a>(&self, content: &'a str) -> BTreeSet<&'a str> {
        self.pattern
            .captures_iter(content)
            .filter_map(|caps| caps.iter().skip(1).flatten().next())
            .map(|m| m.as_str())
            .collect()
    }
}

/// Whether `token` occurs in `content` as a whole quoted literal.
pub fn contains_quoted_token(content: &str, token: &str) -> bool {
    find_quoted_token(content, token).is_some()
}

/// Byte offset of the first quoted occurrence of `token` (pointing past the quote).
pub fn find_quoted_token(content: &str, token: &str) -> Option<usize> {
    QUOTES
        .iter()
        .filter_map(|quote| content.find(&format!("{quote}{token}{quote}")))
        .min()
        .map(|offset| offset + 1)
}

/// Replace every quoted occurrence of `old` with `new`, keeping the quote style.
///
/// Returns the new content and the number of replacements made.
pub fn replace_quoted_token(content: &str, old: &str, new: &str) -> (String, usize) {
    let mut result = content.to_string();
    let mut count = 0;
    for quote in QUOTES {
        let from = format!("{quote}{old}{quote}");
        let hits = result.matches(&from).count();
        if hits > 0 {
            result = result.replace(&from, &format!("{quote}{new}{quote}"));
            count += hits;
        }
    }
    (result, count)
}
