//! Directory tree walking logic
//!
//! `TreeWalker` visits every entry under a scan root, reads the files that
//! match the source pattern and collects their imports as `FileResult`s
//! labelled relative to the root.

mod config;
mod utils;
mod walker;

// Re-export public types
pub use config::{DEFAULT_SOURCE_PATTERN, WalkerConfig};
pub use walker::{FileResult, TreeWalker};
