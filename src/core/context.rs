use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use anyhow::{Context as _, Result, bail};
use colored::Colorize;
use regex::Regex;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        LocaleFile, SourceDictionary,
        file_scanner::{FileContentIndex, FileScanCache, ScanRequest},
        indexer::{KeyFileMap, map_keys_to_files},
        parsers::json::{parse_locale_file, scan_locale_files},
        synthesizer::IdealKeySynthesizer,
        tokenizer::KeyTokenizer,
    },
    issues::ParseErrorIssue,
    rules::CheckRule,
    utils::relative_display,
};

/// Locale files found in the i18n directory, plus the ones that failed to load.
#[derive(Debug, Default)]
pub struct LocaleFiles {
    pub files: Vec<LocaleFile>,
    pub parse_errors: Vec<ParseErrorIssue>,
}

/// Everything a check needs, shared read-only between checks running in parallel.
///
/// The source dictionary is loaded eagerly so that a missing or malformed
/// i18n-src file stops the run before any check starts. Source files and
/// locale files are loaded lazily on first use.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g., `--i18n-src locales/en.json`)
/// 2. `.i18n-check.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root; every configured path is relative to it.
    pub root_dir: PathBuf,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,

    /// The i18n-src file.
    pub source: SourceDictionary,

    pub synthesizer: IdealKeySynthesizer,

    pub tokenizer: KeyTokenizer,

    scan_cache: FileScanCache,

    locale_files: OnceLock<LocaleFiles>,

    ignore_patterns: BTreeMap<CheckRule, Vec<Regex>>,
}

impl CheckContext {
    /// Create a context from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Config file is invalid
    /// - The source directory does not exist
    /// - The i18n-src file cannot be read or is not a JSON object
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose {
            match &config_result.path {
                Some(path) => eprintln!(
                    "{} using config file {}",
                    "note:".bold().cyan(),
                    path.display()
                ),
                None => eprintln!(
                    "{} no config file found, using defaults",
                    "note:".bold().cyan()
                ),
            }
        }

        let mut config = config_result.config;
        if let Some(src_dir) = &common_args.src_dir {
            config.src_dir = src_dir.clone();
        }
        if let Some(i18n_dir) = &common_args.i18n_dir {
            config.i18n_dir = i18n_dir.clone();
        }
        if let Some(i18n_src) = &common_args.i18n_src {
            config.i18n_src = i18n_src.clone();
        }

        Self::from_config(config, root_dir, verbose)
    }

    /// Create a context from an already merged configuration.
    pub fn from_config(config: Config, root_dir: PathBuf, verbose: bool) -> Result<Self> {
        let src_dir = root_dir.join(&config.src_dir);
        if !src_dir.is_dir() {
            bail!("Source directory not found: {}", src_dir.display());
        }

        let source = load_source_dictionary(&config, &root_dir)?;
        let synthesizer = IdealKeySynthesizer::new(config.key_namespace.clone());
        let tokenizer = KeyTokenizer::new(&config.key_namespace)?;

        let mut ignore_patterns = BTreeMap::new();
        for rule in CheckRule::all() {
            ignore_patterns.insert(rule, config.ignore_patterns(rule)?);
        }

        tracing::debug!(
            "loaded {} keys from {}",
            source.len(),
            source.file_path
        );

        Ok(Self {
            config,
            root_dir,
            verbose,
            source,
            synthesizer,
            tokenizer,
            scan_cache: FileScanCache::new(),
            locale_files: OnceLock::new(),
            ignore_patterns,
        })
    }

    /// Build a fresh context from the same configuration, re-reading every file.
    pub fn reload(&self) -> Result<Self> {
        Self::from_config(self.config.clone(), self.root_dir.clone(), self.verbose)
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root_dir.join(&self.config.src_dir)
    }

    pub fn i18n_dir(&self) -> PathBuf {
        self.root_dir.join(&self.config.i18n_dir)
    }

    /// The scan a check performs over the source directory.
    ///
    /// The i18n directory is always skipped so locale JSON never counts as usage.
    pub fn scan_request(&self, rule: CheckRule) -> ScanRequest {
        self.build_scan_request(
            self.config.checks.directories_to_skip(rule),
            self.config.checks.files_to_skip(rule),
        )
    }

    /// The scan of the whole project, honoring only the `global` skip lists.
    pub fn project_scan_request(&self) -> ScanRequest {
        let global = &self.config.checks.global;
        self.build_scan_request(
            global.directories_to_skip.clone(),
            global.files_to_skip.clone(),
        )
    }

    fn build_scan_request(
        &self,
        mut directories_to_skip: Vec<String>,
        files_to_skip: Vec<String>,
    ) -> ScanRequest {
        directories_to_skip.push(self.config.i18n_dir.clone());
        ScanRequest {
            src_dir: self.src_dir(),
            project_root: self.root_dir.clone(),
            file_types: self.config.file_types.clone(),
            directories_to_skip,
            files_to_skip,
        }
    }

    /// Source files visible to `rule`, scanned once per distinct request.
    pub fn source_files(&self, rule: CheckRule) -> Arc<FileContentIndex> {
        self.scan_cache.get_or_scan(&self.scan_request(rule))
    }

    /// Every source file of the project; fixes that rewrite keys edit these.
    pub fn project_source_files(&self) -> Arc<FileContentIndex> {
        self.scan_cache.get_or_scan(&self.project_scan_request())
    }

    /// Render a path from a source scan relative to the project root.
    pub fn display_source_path(&self, relative: &str) -> String {
        relative_display(&self.src_dir().join(relative), &self.root_dir)
    }

    /// Every key of the source dictionary mapped to the files using it.
    pub fn key_file_map(&self, rule: CheckRule) -> KeyFileMap {
        let index = self.source_files(rule);
        map_keys_to_files(
            self.source.keys().map(String::as_str),
            &index,
            self.config.key_matching,
        )
    }

    pub fn ignore_patterns(&self, rule: CheckRule) -> &[Regex] {
        self.ignore_patterns
            .get(&rule)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `key` matches one of the `keysToIgnore` patterns of `rule`.
    pub fn is_ignored(&self, rule: CheckRule, key: &str) -> bool {
        self.ignore_patterns(rule).iter().any(|re| re.is_match(key))
    }

    /// Every locale JSON file below the i18n directory, the source included.
    pub fn locale_files(&self) -> &LocaleFiles {
        self.locale_files.get_or_init(|| {
            let scan = scan_locale_files(&self.i18n_dir(), &self.root_dir);
            if self.verbose {
                for warning in &scan.warnings {
                    eprintln!(
                        "{} skipping {}: {}",
                        "note:".bold().cyan(),
                        warning.file_path,
                        warning.error
                    );
                }
            }
            LocaleFiles {
                files: scan.files,
                parse_errors: scan
                    .warnings
                    .into_iter()
                    .map(|w| ParseErrorIssue {
                        file_path: w.file_path,
                        error: w.error,
                    })
                    .collect(),
            }
        })
    }

    /// Locale files other than the source dictionary.
    pub fn translated_locale_files(&self) -> Vec<&LocaleFile> {
        let source = canonical(&self.source.path);
        self.locale_files()
            .files
            .iter()
            .filter(|file| canonical(&file.path) != source)
            .collect()
    }

    /// The source dictionary first, then each translated locale file.
    ///
    /// The source is included even when it lives outside the i18n directory.
    pub fn all_dictionaries(&self) -> Vec<&LocaleFile> {
        std::iter::once(&self.source)
            .chain(self.translated_locale_files())
            .collect()
    }

    pub fn parse_errors(&self) -> &[ParseErrorIssue] {
        &self.locale_files().parse_errors
    }

    /// Drop cached source file scans.
    pub fn invalidate(&self) {
        self.scan_cache.invalidate();
    }
}

fn load_source_dictionary(config: &Config, root_dir: &Path) -> Result<SourceDictionary> {
    let path = root_dir.join(&config.i18n_src);
    if !path.is_file() {
        bail!("i18n-src file not found: {}", path.display());
    }
    parse_locale_file(&path, root_dir)
        .with_context(|| format!("Failed to load i18n-src file: {}", config.i18n_src))
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
