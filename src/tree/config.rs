//! Configuration types for the tree walker

/// File name pattern selecting the files that get scanned.
pub const DEFAULT_SOURCE_PATTERN: &str = "*.ts";

/// Configuration for tree walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Glob matched against each file name; non-matching files are skipped
    pub source_pattern: String,
    /// Entry names (files or directories) to skip entirely
    pub ignore_patterns: Vec<String>,
    /// Number of worker threads for the walk.
    /// 0 = auto-detect (rayon's global pool)
    /// N = use a dedicated pool of N threads
    pub parallel_workers: usize,
    /// Skip source files larger than this many bytes
    pub max_file_size: Option<u64>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            source_pattern: DEFAULT_SOURCE_PATTERN.to_string(),
            ignore_patterns: Vec::new(),
            parallel_workers: 0,
            max_file_size: None,
        }
    }
}
