//! Shared utility functions for tree walking

use std::ffi::OsStr;

use glob::Pattern;

/// Check if an entry should be ignored based on its name and ignore patterns.
pub fn should_ignore_name(name: &OsStr, ignore_patterns: &[String]) -> bool {
    let name = name.to_string_lossy();
    ignore_patterns
        .iter()
        .any(|pattern| name == pattern.as_str() || glob_match(pattern, &name))
}

/// Match a glob pattern against a name.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}
