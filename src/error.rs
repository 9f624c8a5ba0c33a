//! Error types for scanning and subset generation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while walking a source tree.
///
/// There is no partial mode: the first error aborts the whole walk.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read directory '{}': {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot inspect '{}': {source}", .path.display())]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read file '{}': {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid source pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Errors raised by the dependency subset generator.
#[derive(Debug, Error)]
pub enum SubsetError {
    #[error(
        "wanted to use '{}' as the directory for the new package.json but a file with the same name exists; set DIRECTORY_NAME to use another name",
        .0.display()
    )]
    TargetNotDirectory(PathBuf),

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("the manifest root is not an object")]
    RootNotObject,

    #[error("the manifest does not contain the key '{0}'")]
    MissingKey(&'static str),

    #[error("the field '{key}' does not contain an array but {found}")]
    NotAnArray { key: &'static str, found: String },

    #[error("the field '{key}' does not contain an object but {found}")]
    NotAnObject { key: &'static str, found: String },

    #[error("the requested dependencies contain a value which is not a string but {0}")]
    NonStringEntry(String),

    #[error(
        "the dependency '{0}' was requested for the backend run but is not part of the dependencies of the manifest"
    )]
    UnknownDependency(String),

    #[error("failed to start installer '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("installer '{command}' exited with code {code}")]
    InstallerFailed { command: String, code: i32 },
}

impl SubsetError {
    /// Process exit code for this error.
    ///
    /// A failed installer hands its own exit code through unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            SubsetError::InstallerFailed { code, .. } => *code,
            _ => 1,
        }
    }
}
