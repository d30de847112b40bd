use crate::model::{AudioFormat, FileRecord, Root, ScanError};
use crate::progress::ProgressReporter;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, trace, warn};
use walkdir::{DirEntry, WalkDir};

const RESOURCE_FORK_PREFIX: &str = "._";
const LOCALIZED_SUFFIX: &str = ".localized";
const PROGRESS_INTERVAL: usize = 100;

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub files: Vec<FileRecord>,
    pub errors: Vec<ScanError>,
}

impl ScanOutcome {
    pub fn extend(&mut self, other: ScanOutcome) {
        self.files.extend(other.files);
        self.errors.extend(other.errors);
    }
}

/// Recursive audio file discovery.
///
/// Walks are sorted by file name so repeated runs over an unchanged tree yield
/// the same order.
pub struct Scanner {
    ignore_patterns: Vec<Pattern>,
    excluded_dirs: Vec<PathBuf>,
}

impl Scanner {
    pub fn new(ignore_globs: &[String]) -> Self {
        let ignore_patterns = ignore_globs
            .iter()
            .filter_map(|glob| match Pattern::new(glob) {
                Ok(p) => Some(p),
                Err(e) => {
                    error!("Invalid glob pattern '{}': {}", glob, e);
                    None
                }
            })
            .collect();

        Self {
            ignore_patterns,
            excluded_dirs: Vec::new(),
        }
    }

    /// Directories never descended into, e.g. the master root while walking a
    /// secondary root that contains it.
    pub fn with_excluded_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.excluded_dirs = dirs;
        self
    }

    /// Scan roots in order. `found_before` offsets the progress count.
    pub fn scan_roots(
        &self,
        roots: &[Root],
        found_before: usize,
        reporter: &dyn ProgressReporter,
    ) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        for root in roots {
            let found = found_before + outcome.files.len();
            outcome.extend(self.scan_root(root, found, reporter));
        }
        outcome
    }

    pub fn scan_root(
        &self,
        root: &Root,
        found_before: usize,
        reporter: &dyn ProgressReporter,
    ) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        if !root.path.exists() {
            warn!("{} root does not exist: {}", root.role, root.path.display());
            outcome.errors.push(ScanError::not_found(&root.path));
            return outcome;
        }

        if !root.path.is_dir() {
            warn!("{} root is not a directory: {}", root.role, root.path.display());
            outcome
                .errors
                .push(ScanError::access(&root.path, "not a directory"));
            return outcome;
        }

        let walker = WalkDir::new(&root.path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_pruned_dir(entry));

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.path.clone());
                    let reason = err
                        .io_error()
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| err.to_string());
                    warn!("Error reading {}: {}", path.display(), reason);
                    outcome.errors.push(ScanError::access(path, reason));
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let Some(format) = self.candidate_format(path) else {
                continue;
            };

            match fs::metadata(path) {
                Ok(metadata) if metadata.is_file() && metadata.len() > 0 => {
                    trace!("Found {}", path.display());
                    outcome.files.push(FileRecord {
                        path: path.to_path_buf(),
                        format,
                        size: metadata.len(),
                        role: root.role,
                    });

                    let found = found_before + outcome.files.len();
                    if found % PROGRESS_INTERVAL == 0 {
                        reporter.on_scan_progress(found, &path.to_string_lossy());
                    }
                }
                Ok(_) => {
                    trace!("Skipping empty or non-regular file {}", path.display());
                }
                Err(err) => {
                    warn!("Error getting metadata for {}: {}", path.display(), err);
                    outcome.errors.push(ScanError::access(path, err));
                }
            }
        }

        outcome
    }

    fn is_pruned_dir(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || name.to_lowercase().ends_with(LOCALIZED_SUFFIX) {
            return true;
        }

        let path = entry.path();
        self.excluded_dirs.iter().any(|dir| dir == path) || self.is_ignored(path)
    }

    /// Audio format of a file worth stat-ing, or `None` if the name alone rules it out.
    fn candidate_format(&self, path: &Path) -> Option<AudioFormat> {
        let name = path.file_name()?.to_string_lossy();
        if name.starts_with(RESOURCE_FORK_PREFIX) || self.is_ignored(path) {
            return None;
        }
        AudioFormat::from_path(path)
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path))
    }
}
