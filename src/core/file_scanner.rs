//! Source file discovery and the per-run scan cache.
//!
//! A scan is a pure function of its [`ScanRequest`]: the same request always
//! walks the same directory with the same filters. [`FileScanCache`] memoizes
//! finished scans so several checks that share filters read the tree once.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::utils::relative_display;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths or names.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Everything that determines the result of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanRequest {
    /// Directory to walk.
    pub src_dir: PathBuf,
    /// Base for literal skip paths written relative to the project.
    pub project_root: PathBuf,
    /// Accepted file name endings (e.g. ".ts", ".vue").
    pub file_types: Vec<String>,
    pub directories_to_skip: Vec<String>,
    pub files_to_skip: Vec<String>,
}

/// Immutable snapshot of scanned files: path relative to the source directory
/// (with `/` separators) to file contents.
#[derive(Debug, Clone, Default)]
pub struct FileContentIndex {
    files: BTreeMap<String, String>,
    /// Entries that could not be walked or read.
    pub skipped_count: usize,
}

impl FileContentIndex {
    pub fn new(files: BTreeMap<String, String>) -> Self {
        Self {
            files,
            skipped_count: 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Compiled skip rules for one request.
struct SkipMatcher<'a> {
    request: &'a ScanRequest,
    dir_globs: Vec<Pattern>,
    dir_literals: Vec<&'a str>,
    file_globs: Vec<Pattern>,
    file_literals: Vec<&'a str>,
}

impl<'a> SkipMatcher<'a> {
    fn new(request: &'a ScanRequest) -> Self {
        let (dir_globs, dir_literals) = split_patterns(&request.directories_to_skip);
        let (file_globs, file_literals) = split_patterns(&request.files_to_skip);
        Self {
            request,
            dir_globs,
            dir_literals,
            file_globs,
            file_literals,
        }
    }

    fn skips_dir(&self, path: &Path) -> bool {
        self.matches(path, &self.dir_globs, &self.dir_literals)
    }

    /// Directory globs such as `**/dist/**` also apply to the files below.
    fn skips_file(&self, path: &Path) -> bool {
        self.matches(path, &self.file_globs, &self.file_literals)
            || self.matches(path, &self.dir_globs, &[])
    }

    fn matches(&self, path: &Path, globs: &[Pattern], literals: &[&str]) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        let literal_hit = literals.iter().any(|literal| {
            let literal = literal.trim_start_matches("./").trim_end_matches('/');
            (!literal.contains('/') && name == literal)
                || path.starts_with(self.request.project_root.join(literal))
                || path.starts_with(self.request.src_dir.join(literal))
        });
        if literal_hit {
            return true;
        }

        let from_src = relative_display(path, &self.request.src_dir);
        let from_root = relative_display(path, &self.request.project_root);
        globs.iter().any(|p| {
            p.matches(&from_src)
                || p.matches(&from_root)
                || p.matches(&name)
                || p.matches(&path.to_string_lossy())
        })
    }

    fn has_wanted_type(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        self.request
            .file_types
            .iter()
            .any(|ext| name.ends_with(&format!(".{}", ext.trim_start_matches('.'))))
    }
}

fn split_patterns(patterns: &[String]) -> (Vec<Pattern>, Vec<&str>) {
    let mut globs = Vec::new();
    let mut literals = Vec::new();
    for p in patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => globs.push(pattern),
                Err(e) => tracing::warn!("invalid skip pattern '{}': {}", p, e),
            }
        } else {
            literals.push(p.as_str());
        }
    }
    (globs, literals)
}

/// Walk `request.src_dir` and read every matching file.
pub fn scan_files(request: &ScanRequest) -> FileContentIndex {
    let matcher = SkipMatcher::new(request);
    let mut skipped_count = 0;
    let mut paths: Vec<PathBuf> = Vec::new();

    let walker = WalkDir::new(&request.src_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_type().is_dir() || !matcher.skips_dir(entry.path())
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::warn!("cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && matcher.has_wanted_type(path) && !matcher.skips_file(path)
        {
            paths.push(path.to_path_buf());
        }
    }

    let read: Vec<(String, Option<String>)> = paths
        .par_iter()
        .map(|path| {
            let relative = relative_display(path, &request.src_dir);
            match fs::read_to_string(path) {
                Ok(content) => (relative, Some(content)),
                Err(e) => {
                    tracing::warn!("cannot read {}: {}", path.display(), e);
                    (relative, None)
                }
            }
        })
        .collect();

    let mut files = BTreeMap::new();
    for (relative, content) in read {
        match content {
            Some(content) => {
                files.insert(relative, content);
            }
            None => skipped_count += 1,
        }
    }

    tracing::debug!(
        "scanned {} files in {} ({} skipped)",
        files.len(),
        request.src_dir.display(),
        skipped_count
    );

    FileContentIndex {
        files,
        skipped_count,
    }
}

/// Memoizes scans by request. Owned by the caller, cleared with [`invalidate`].
///
/// [`invalidate`]: FileScanCache::invalidate
#[derive(Debug, Default)]
pub struct FileScanCache {
    entries: Mutex<HashMap<ScanRequest, Arc<FileContentIndex>>>,
}

impl FileScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached scan for `request`, scanning on first use.
    pub fn get_or_scan(&self, request: &ScanRequest) -> Arc<FileContentIndex> {
        if let Some(hit) = self.lock().get(request) {
            return Arc::clone(hit);
        }
        // Scan without holding the lock; a concurrent identical scan is harmless.
        let index = Arc::new(scan_files(request));
        Arc::clone(self.lock().entry(request.clone()).or_insert(index))
    }

    /// Drop every cached scan, e.g. after fixes rewrote source files.
    pub fn invalidate(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ScanRequest, Arc<FileContentIndex>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn request(root: &Path) -> ScanRequest {
        ScanRequest {
            src_dir: root.join("src"),
            project_root: root.to_path_buf(),
            file_types: vec![".ts".to_string(), ".vue".to_string()],
            directories_to_skip: Vec::new(),
            files_to_skip: Vec::new(),
        }
    }

    fn write(root: &Path, path: &str, content: &str) {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_filters_by_file_type() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/app.ts", "a");
        write(dir.path(), "src/Page.vue", "b");
        write(dir.path(), "src/style.css", "c");

        let index = scan_files(&request(dir.path()));

        let paths: Vec<&str> = index.paths().collect();
        assert_eq!(paths, vec!["Page.vue", "app.ts"]);
        assert_eq!(index.get("app.ts"), Some("a"));
    }

    #[test]
    fn test_scan_nested_directories_use_forward_slashes() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/components/Button.ts", "");
        write(dir.path(), "src/utils/helper.ts", "");

        let index = scan_files(&request(dir.path()));

        let paths: Vec<&str> = index.paths().collect();
        assert_eq!(paths, vec!["components/Button.ts", "utils/helper.ts"]);
    }

    #[test]
    fn test_scan_skips_directory_by_name() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/node_modules/lib.ts", "");
        write(dir.path(), "src/deep/node_modules/lib.ts", "");
        write(dir.path(), "src/app.ts", "");

        let mut req = request(dir.path());
        req.directories_to_skip = vec!["node_modules".to_string()];
        let index = scan_files(&req);

        let paths: Vec<&str> = index.paths().collect();
        assert_eq!(paths, vec!["app.ts"]);
    }

    #[test]
    fn test_scan_skips_directory_by_project_path() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/i18n/keys.ts", "");
        write(dir.path(), "src/app.ts", "");

        let mut req = request(dir.path());
        req.directories_to_skip = vec!["src/i18n".to_string()];
        let index = scan_files(&req);

        assert_eq!(index.len(), 1);
        assert!(index.get("app.ts").is_some());
    }

    #[test]
    fn test_scan_skips_files_by_name_and_glob() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/app.ts", "");
        write(dir.path(), "src/generated.ts", "");
        write(dir.path(), "src/app.test.ts", "");

        let mut req = request(dir.path());
        req.files_to_skip = vec!["generated.ts".to_string(), "**/*.test.ts".to_string()];
        let index = scan_files(&req);

        let paths: Vec<&str> = index.paths().collect();
        assert_eq!(paths, vec!["app.ts"]);
    }

    #[test]
    fn test_file_types_without_leading_dot() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/app.ts", "");

        let mut req = request(dir.path());
        req.file_types = vec!["ts".to_string()];
        assert_eq!(scan_files(&req).len(), 1);
    }

    #[test]
    fn test_scan_missing_directory_counts_skip() {
        let dir = tempdir().unwrap();
        let index = scan_files(&request(dir.path()));
        assert!(index.is_empty());
        assert_eq!(index.skipped_count, 1);
    }

    #[test]
    fn test_cache_reuses_and_invalidates() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/app.ts", "first");

        let cache = FileScanCache::new();
        let req = request(dir.path());

        let first = cache.get_or_scan(&req);
        File::create(dir.path().join("src/other.ts")).unwrap();
        let second = cache.get_or_scan(&req);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
        assert_eq!(cache.len(), 1);

        cache.invalidate();
        assert!(cache.is_empty());
        let third = cache.get_or_scan(&req);
        assert_eq!(third.len(), 2);
    }
}
