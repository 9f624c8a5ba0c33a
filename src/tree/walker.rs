//! TreeWalker - concurrent fan-out/fan-in scan of a source tree

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ScanError;
use crate::imports::{ImportFinding, extract_imports};

use super::config::WalkerConfig;
use super::utils::should_ignore_name;

/// Imports found in one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    /// Path relative to the scan root
    pub file_path: PathBuf,
    pub findings: Vec<ImportFinding>,
}

/// Walks a directory tree and extracts imports from every source file.
///
/// Each directory forks one task per file and one per subdirectory and joins
/// them all before merging. The merged order is structural: a directory's own
/// files (by name) come first, followed by each subdirectory's results (by
/// name). Completion order of the tasks never leaks into the output.
pub struct TreeWalker {
    config: WalkerConfig,
    source_pattern: Pattern,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Result<Self, ScanError> {
        let source_pattern =
            Pattern::new(&config.source_pattern).map_err(|source| ScanError::Pattern {
                pattern: config.source_pattern.clone(),
                source,
            })?;
        Ok(Self {
            config,
            source_pattern,
        })
    }

    /// Scan the whole tree under `root`.
    ///
    /// Files without findings are dropped. The first I/O error aborts the walk.
    pub fn walk(&self, root: &Path) -> Result<Vec<FileResult>, ScanError> {
        if self.config.parallel_workers == 0 {
            return self.walk_dir(root, Path::new(""));
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.parallel_workers)
            .build()
        {
            Ok(pool) => pool.install(|| self.walk_dir(root, Path::new(""))),
            Err(e) => {
                warn!(error = %e, "cannot build worker pool, using the global pool");
                self.walk_dir(root, Path::new(""))
            }
        }
    }

    fn walk_dir(&self, dir: &Path, label: &Path) -> Result<Vec<FileResult>, ScanError> {
        let (files, subdirs) = self.read_entries(dir)?;
        debug!(
            dir = %dir.display(),
            files = files.len(),
            subdirs = subdirs.len(),
            "visiting directory"
        );

        let (own, nested) = rayon::join(
            || {
                files
                    .par_iter()
                    .map(|name| self.scan_file(dir, label, name))
                    .collect::<Result<Vec<_>, _>>()
            },
            || {
                subdirs
                    .par_iter()
                    .map(|name| self.walk_dir(&dir.join(name), &label.join(name)))
                    .collect::<Result<Vec<_>, _>>()
            },
        );

        let mut results: Vec<FileResult> = own?.into_iter().flatten().collect();
        for subtree in nested? {
            results.extend(subtree);
        }
        Ok(results)
    }

    /// List a directory, returning (source files, subdirectories), each sorted by name.
    /// Symlinks and other special entries are skipped.
    fn read_entries(&self, dir: &Path) -> Result<(Vec<OsString>, Vec<OsString>), ScanError> {
        let read_dir_error = |source| ScanError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        let mut subdirs = Vec::new();

        for entry in fs::read_dir(dir).map_err(read_dir_error)? {
            let entry = entry.map_err(read_dir_error)?;
            let name = entry.file_name();

            if should_ignore_name(&name, &self.config.ignore_patterns) {
                continue;
            }

            let file_type = entry.file_type().map_err(|source| ScanError::Inspect {
                path: entry.path(),
                source,
            })?;

            if file_type.is_dir() {
                subdirs.push(name);
            } else if file_type.is_file() && self.is_source_file(&name) {
                files.push(name);
            }
        }

        files.sort();
        subdirs.sort();
        Ok((files, subdirs))
    }

    fn is_source_file(&self, name: &OsStr) -> bool {
        self.source_pattern.matches(&name.to_string_lossy())
    }

    fn scan_file(
        &self,
        dir: &Path,
        label: &Path,
        name: &OsStr,
    ) -> Result<Option<FileResult>, ScanError> {
        let path = dir.join(name);

        if let Some(limit) = self.config.max_file_size {
            let metadata = fs::metadata(&path).map_err(|source| ScanError::Inspect {
                path: path.clone(),
                source,
            })?;
            if metadata.len() > limit {
                debug!(path = %path.display(), size = metadata.len(), "skipping large file");
                return Ok(None);
            }
        }

        let content = fs::read_to_string(&path).map_err(|source| ScanError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let findings = extract_imports(&content);
        debug!(path = %path.display(), findings = findings.len(), "scanned file");

        if findings.is_empty() {
            return Ok(None);
        }

        Ok(Some(FileResult {
            file_path: label.join(name),
            findings,
        }))
    }
}
