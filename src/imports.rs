//! Import extraction from TypeScript source text
//!
//! Extraction is a best-effort lexical scan: every line is matched on its
//! own against a whole-line `import ... from "<spec>"` shape. Imports split
//! over several lines, imports followed by more code, and re-exports are
//! not recognized.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// A single absolute import found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFinding {
    /// The matched source line, without its line terminator
    pub raw_line: String,
    /// Package name derived from the import specifier
    pub module_name: String,
}

// Double- and single-quoted specifiers land in separate groups because the
// regex crate has no backreferences.
static TS_IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*import\s.*?\sfrom\s*(?:"([^"]*)"|'([^']*)')\s*;?\s*$"#)
        .expect("TS_IMPORT_LINE regex is invalid")
});

/// Extract all absolute imports from the text of one file, in textual order.
///
/// Local imports (specifiers starting with `.` or `/`) are never returned.
pub fn extract_imports(content: &str) -> Vec<ImportFinding> {
    content
        .lines()
        .filter_map(|line| {
            let caps = TS_IMPORT_LINE.captures(line)?;
            let specifier = caps.get(1).or_else(|| caps.get(2))?.as_str();
            let name = module_name(specifier)?;
            Some(ImportFinding {
                raw_line: line.to_string(),
                module_name: name.to_string(),
            })
        })
        .collect()
}

/// Reduce an import specifier to the package it names.
///
/// - `@scope/pkg/sub/path` -> `@scope/pkg`
/// - `lodash/fp` -> `lodash`
/// - `./local`, `../up`, `/abs` -> `None`
///
/// ```
/// use extmods::imports::module_name;
///
/// assert_eq!(module_name("@types/node/fs"), Some("@types/node"));
/// assert_eq!(module_name("lodash/fp"), Some("lodash"));
/// assert_eq!(module_name("./util"), None);
/// ```
pub fn module_name(specifier: &str) -> Option<&str> {
    if let Some(rest) = specifier.strip_prefix('@') {
        let mut parts = rest.splitn(3, '/');
        let scope = parts.next()?;
        let package = parts.next()?;
        if scope.is_empty() || package.is_empty() {
            return None;
        }
        return Some(&specifier[..scope.len() + package.len() + 2]);
    }

    if specifier.is_empty() || specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }

    specifier.split('/').next()
}
