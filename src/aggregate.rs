//! Merge per-file findings into one listing of external modules

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builtins::is_builtin_module;
use crate::error::ScanError;
use crate::string_utils::locale_cmp;
use crate::tree::{FileResult, TreeWalker, WalkerConfig};

/// One external module together with the first place it was imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedEntry {
    #[serde(rename = "name")]
    pub module_name: String,
    #[serde(rename = "line")]
    pub raw_line: String,
    #[serde(rename = "found_in")]
    pub first_found_in: PathBuf,
}

/// Deduplicate, sort and filter the findings of a walk.
///
/// Results are consumed in the order given; the first citation of a module
/// name wins and later ones are discarded. The output is sorted with
/// [`locale_cmp`] and never contains Node.js built-ins.
pub fn aggregate(results: &[FileResult]) -> Vec<AggregatedEntry> {
    let mut seen: HashMap<&str, AggregatedEntry> = HashMap::new();

    for result in results {
        for finding in &result.findings {
            if let Entry::Vacant(slot) = seen.entry(finding.module_name.as_str()) {
                slot.insert(AggregatedEntry {
                    module_name: finding.module_name.clone(),
                    raw_line: finding.raw_line.clone(),
                    first_found_in: result.file_path.clone(),
                });
            }
        }
    }

    let mut entries: Vec<AggregatedEntry> = seen
        .into_values()
        .filter(|entry| !is_builtin_module(&entry.module_name))
        .collect();
    entries.sort_by(|a, b| locale_cmp(&a.module_name, &b.module_name));
    entries
}

/// Walk `root` and aggregate everything it imports.
pub fn scan_external_modules(
    root: &Path,
    config: WalkerConfig,
) -> Result<Vec<AggregatedEntry>, ScanError> {
    let walker = TreeWalker::new(config)?;
    let results = walker.walk(root)?;
    Ok(aggregate(&results))
}
