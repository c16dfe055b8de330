use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{core::file_scanner::is_glob_pattern, rules::CheckRule};

pub const CONFIG_FILE_NAME: &str = ".i18n-check.json";

/// How source files are searched for key references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMatching {
    /// The key must appear as a whole quoted literal.
    #[default]
    Token,
    /// Any occurrence of the key text counts.
    Substring,
}

/// Settings for a single check, or for all checks under `global`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directories_to_skip: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files_to_skip: Vec<String>,
    /// Regexes for keys the check leaves alone.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys_to_ignore: Vec<String>,
    /// Locales to restrict the check to (missing-keys).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locales: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecksConfig {
    #[serde(default = "default_global_settings")]
    pub global: CheckSettings,
    #[serde(default)]
    pub invalid_keys: CheckSettings,
    #[serde(default)]
    pub nonexistent_keys: CheckSettings,
    #[serde(default)]
    pub unused_keys: CheckSettings,
    #[serde(default)]
    pub non_source_keys: CheckSettings,
    #[serde(default)]
    pub repeat_keys: CheckSettings,
    #[serde(default)]
    pub repeat_values: CheckSettings,
    #[serde(default)]
    pub ordered_keys: CheckSettings,
    #[serde(default)]
    pub missing_keys: CheckSettings,
    #[serde(default)]
    pub nested_keys: CheckSettings,
    #[serde(default)]
    pub alt_texts: CheckSettings,
    #[serde(default)]
    pub aria_labels: CheckSettings,
}

fn default_global_settings() -> CheckSettings {
    CheckSettings {
        active: Some(true),
        directories_to_skip: default_directories_to_skip(),
        ..Default::default()
    }
}

fn default_directories_to_skip() -> Vec<String> {
    ["node_modules", ".nuxt", ".output", ".next", "dist"]
        .map(String::from)
        .to_vec()
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            global: default_global_settings(),
            invalid_keys: CheckSettings::default(),
            nonexistent_keys: CheckSettings::default(),
            unused_keys: CheckSettings::default(),
            non_source_keys: CheckSettings::default(),
            repeat_keys: CheckSettings::default(),
            repeat_values: CheckSettings::default(),
            ordered_keys: CheckSettings::default(),
            missing_keys: CheckSettings::default(),
            nested_keys: CheckSettings::default(),
            alt_texts: CheckSettings::default(),
            aria_labels: CheckSettings::default(),
        }
    }
}

impl ChecksConfig {
    pub fn settings(&self, rule: CheckRule) -> &CheckSettings {
        match rule {
            CheckRule::InvalidKeys => &self.invalid_keys,
            CheckRule::NonexistentKeys => &self.nonexistent_keys,
            CheckRule::UnusedKeys => &self.unused_keys,
            CheckRule::NonSourceKeys => &self.non_source_keys,
            CheckRule::RepeatKeys => &self.repeat_keys,
            CheckRule::RepeatValues => &self.repeat_values,
            CheckRule::OrderedKeys => &self.ordered_keys,
            CheckRule::MissingKeys => &self.missing_keys,
            CheckRule::NestedKeys => &self.nested_keys,
            CheckRule::AltTexts => &self.alt_texts,
            CheckRule::AriaLabels => &self.aria_labels,
        }
    }

    /// A check's own `active` wins over `global.active`; checks run by default.
    pub fn is_active(&self, rule: CheckRule) -> bool {
        self.settings(rule)
            .active
            .or(self.global.active)
            .unwrap_or(true)
    }

    pub fn directories_to_skip(&self, rule: CheckRule) -> Vec<String> {
        merge(
            &self.global.directories_to_skip,
            &self.settings(rule).directories_to_skip,
        )
    }

    pub fn files_to_skip(&self, rule: CheckRule) -> Vec<String> {
        merge(&self.global.files_to_skip, &self.settings(rule).files_to_skip)
    }

    pub fn keys_to_ignore(&self, rule: CheckRule) -> Vec<String> {
        merge(&self.global.keys_to_ignore, &self.settings(rule).keys_to_ignore)
    }

    pub fn locales(&self, rule: CheckRule) -> Vec<String> {
        merge(&self.global.locales, &self.settings(rule).locales)
    }
}

fn merge(global: &[String], local: &[String]) -> Vec<String> {
    let mut merged = global.to_vec();
    for item in local {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    merged
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory scanned for key references.
    #[serde(default = "default_src_dir")]
    pub src_dir: String,
    /// Directory holding the locale JSON files.
    #[serde(default = "default_i18n_dir")]
    pub i18n_dir: String,
    /// The source locale file that defines every key.
    #[serde(default = "default_i18n_src")]
    pub i18n_src: String,
    #[serde(default = "default_file_types")]
    pub file_types: Vec<String>,
    #[serde(default = "default_key_namespace")]
    pub key_namespace: String,
    #[serde(default)]
    pub key_matching: KeyMatching,
    #[serde(default)]
    pub checks: ChecksConfig,
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_i18n_dir() -> String {
    "src/i18n".to_string()
}

fn default_i18n_src() -> String {
    "src/i18n/en-US.json".to_string()
}

fn default_file_types() -> Vec<String> {
    [".ts", ".tsx", ".js", ".jsx", ".vue"]
        .map(String::from)
        .to_vec()
}

fn default_key_namespace() -> String {
    "i18n.".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            i18n_dir: default_i18n_dir(),
            i18n_src: default_i18n_src(),
            file_types: default_file_types(),
            key_namespace: default_key_namespace(),
            key_matching: KeyMatching::default(),
            checks: ChecksConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for an empty namespace or file type list, and for any
    /// invalid regex in `keysToIgnore` or glob pattern in the skip lists.
    pub fn validate(&self) -> Result<()> {
        if self.key_namespace.is_empty() {
            bail!("'keyNamespace' must not be empty");
        }
        if self.file_types.is_empty() {
            bail!("'fileTypes' must list at least one file extension");
        }

        let sections = std::iter::once(("global", &self.checks.global)).chain(
            CheckRule::all()
                .into_iter()
                .map(|rule| (rule.config_name(), self.checks.settings(rule))),
        );

        for (name, settings) in sections {
            for pattern in &settings.keys_to_ignore {
                Regex::new(pattern).with_context(|| {
                    format!("Invalid regex in 'checks.{}.keysToIgnore': \"{}\"", name, pattern)
                })?;
            }

            // Entries without wildcards are literal names, so `[id]` needs no escaping.
            let skip_lists = [
                ("directoriesToSkip", &settings.directories_to_skip),
                ("filesToSkip", &settings.files_to_skip),
            ];
            for (field, patterns) in skip_lists {
                for pattern in patterns.iter().filter(|p| is_glob_pattern(p)) {
                    Pattern::new(pattern).with_context(|| {
                        format!(
                            "Invalid glob pattern in 'checks.{}.{}': \"{}\"",
                            name, field, pattern
                        )
                    })?;
                }
            }
        }

        Ok(())
    }

    /// Compiled `keysToIgnore` patterns for a check (global ones included).
    pub fn ignore_patterns(&self, rule: CheckRule) -> Result<Vec<Regex>> {
        self.checks
            .keys_to_ignore(rule)
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("Invalid regex: \"{}\"", p)))
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, or `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    /// True if config was loaded from a file, false if using defaults.
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.src_dir, "src");
        assert_eq!(config.key_namespace, "i18n.");
        assert_eq!(config.key_matching, KeyMatching::Token);
        assert!(config.file_types.contains(&".vue".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{
              "srcDir": "frontend",
              "keyMatching": "substring",
              "checks": {
                  "unusedKeys": { "active": false, "filesToSkip": ["legacy.ts"] }
              }
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "frontend");
        assert_eq!(config.i18n_src, default_i18n_src());
        assert_eq!(config.key_matching, KeyMatching::Substring);
        assert_eq!(config.checks.unused_keys.files_to_skip, vec!["legacy.ts"]);
        assert_eq!(config.checks.global, default_global_settings());
    }

    #[test]
    fn test_is_active_precedence() {
        let mut checks = ChecksConfig::default();
        assert!(checks.is_active(CheckRule::RepeatValues));

        checks.global.active = Some(false);
        assert!(!checks.is_active(CheckRule::RepeatValues));

        checks.repeat_values.active = Some(true);
        assert!(checks.is_active(CheckRule::RepeatValues));
        assert!(!checks.is_active(CheckRule::UnusedKeys));

        checks.global.active = None;
        assert!(checks.is_active(CheckRule::UnusedKeys));
    }

    #[test]
    fn test_skip_lists_merge_global_and_check() {
        let mut checks = ChecksConfig::default();
        checks.unused_keys.directories_to_skip = vec!["legacy".to_string(), "dist".to_string()];

        let dirs = checks.directories_to_skip(CheckRule::UnusedKeys);
        assert_eq!(
            dirs,
            vec!["node_modules", ".nuxt", ".output", ".next", "dist", "legacy"]
        );
        assert_eq!(
            checks.directories_to_skip(CheckRule::InvalidKeys),
            default_directories_to_skip()
        );
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "i18nSrc": "locales/en.json" }"#,
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file());
        assert_eq!(result.config.i18n_src, "locales/en.json");
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file());
        assert_eq!(result.config, Config::default());
    }

    #[test]
    fn test_validate_invalid_regex() {
        let mut config = Config::default();
        config.checks.invalid_keys.keys_to_ignore = vec!["(unclosed".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("checks.invalidKeys.keysToIgnore"));
    }

    #[test]
    fn test_validate_invalid_glob() {
        let mut config = Config::default();
        config.checks.global.files_to_skip = vec!["src/**/[invalid".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("checks.global.filesToSkip"));
    }

    #[test]
    fn test_validate_literal_brackets_are_valid() {
        let mut config = Config::default();
        config.checks.global.directories_to_skip = vec!["pages/[id]".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_namespace() {
        let config = Config {
            key_namespace: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "checks": { "global": { "keysToIgnore": ["["] } } }"#,
        )
        .unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_default_config_json_round_trips() {
        let json = default_config_json().unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(json.contains("\"keyNamespace\": \"i18n.\""));
    }

    #[test]
    fn test_ignore_patterns_compile() {
        let mut config = Config::default();
        config.checks.global.keys_to_ignore = vec!["^i18n\\.legacy\\.".to_string()];
        config.checks.invalid_keys.keys_to_ignore = vec!["_test$".to_string()];

        let patterns = config.ignore_patterns(CheckRule::InvalidKeys).unwrap();
        assert_eq!(patterns.len(), 2);
        assert!(patterns[0].is_match("i18n.legacy.title"));
        assert!(patterns[1].is_match("i18n.a_test"));
        assert_eq!(config.ignore_patterns(CheckRule::UnusedKeys).unwrap().len(), 1);
    }
}
