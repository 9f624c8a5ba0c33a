//! extmods - find the external modules a TypeScript source tree imports

pub mod aggregate;
pub mod builtins;
pub mod error;
pub mod imports;
pub mod output;
pub mod string_utils;
pub mod subset;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{AggregatedEntry, aggregate, scan_external_modules};
pub use builtins::is_builtin_module;
pub use error::{ScanError, SubsetError};
pub use imports::{ImportFinding, extract_imports, module_name};
pub use output::{OutputConfig, ReportFormatter, module_names_json, print_json};
pub use subset::{SubsetConfig, generate_subset, select_dependencies};
pub use tree::{FileResult, TreeWalker, WalkerConfig};
