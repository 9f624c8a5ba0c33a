//! Dependency subset generator
//!
//! Builds a directory holding a `package.json` with only the dependencies a
//! backend needs at run time, next to a copy of the project's lock file, and
//! runs the package installer there. The resulting `node_modules` contains
//! just that subset.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{Map, Value, json};
use tracing::info;

use crate::error::SubsetError;

/// Directory created under the project when `DIRECTORY_NAME` is not set.
pub const DEFAULT_DIRECTORY_NAME: &str = "backend-only-dependencies";

/// Manifest key listing the dependency names to keep.
pub const KEEP_KEY: &str = "backendRunOnlyDependencies";

/// Manifest key mapping dependency names to version ranges.
pub const DEPENDENCIES_KEY: &str = "dependencies";

const MANIFEST_FILE: &str = "package.json";
const LOCK_FILE: &str = "package-lock.json";

/// Configuration for subset generation.
#[derive(Debug, Clone)]
pub struct SubsetConfig {
    /// Project root holding `package.json` and `package-lock.json`
    pub project_dir: PathBuf,
    /// Name of the output directory inside the project root
    pub directory_name: String,
    /// Installer program followed by its arguments
    pub installer: Vec<String>,
}

impl SubsetConfig {
    pub fn target_dir(&self) -> PathBuf {
        self.project_dir.join(&self.directory_name)
    }
}

impl Default for SubsetConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            directory_name: DEFAULT_DIRECTORY_NAME.to_string(),
            installer: vec!["npm".to_string(), "i".to_string()],
        }
    }
}

/// Validate a manifest and pick the requested entries out of its dependency map.
///
/// Nothing is written here; every input error surfaces before any side effect.
pub fn select_dependencies(manifest: &Value) -> Result<Map<String, Value>, SubsetError> {
    let root = manifest.as_object().ok_or(SubsetError::RootNotObject)?;

    let keep = root
        .get(KEEP_KEY)
        .ok_or(SubsetError::MissingKey(KEEP_KEY))?;
    let keep = keep.as_array().ok_or_else(|| SubsetError::NotAnArray {
        key: KEEP_KEY,
        found: keep.to_string(),
    })?;

    let dependencies = root
        .get(DEPENDENCIES_KEY)
        .ok_or(SubsetError::MissingKey(DEPENDENCIES_KEY))?;
    let dependencies = dependencies
        .as_object()
        .ok_or_else(|| SubsetError::NotAnObject {
            key: DEPENDENCIES_KEY,
            found: dependencies.to_string(),
        })?;

    let mut selected = Map::new();
    for dep in keep {
        let name = dep
            .as_str()
            .ok_or_else(|| SubsetError::NonStringEntry(dep.to_string()))?;
        let range = dependencies
            .get(name)
            .ok_or_else(|| SubsetError::UnknownDependency(name.to_string()))?;
        selected.insert(name.to_string(), range.clone());
    }

    Ok(selected)
}

/// Generate the subset directory and run the installer in it.
///
/// Steps, in order: check the target path, read and validate the manifest,
/// create the target directory, copy the lock file, write the reduced
/// manifest, run the installer.
pub fn generate_subset(config: &SubsetConfig) -> Result<(), SubsetError> {
    let target = config.target_dir();
    let target_exists = check_target_dir(&target)?;

    let manifest_path = config.project_dir.join(MANIFEST_FILE);
    let manifest = read_json(&manifest_path)?;
    let selected = select_dependencies(&manifest)?;

    if !target_exists {
        fs::create_dir(&target).map_err(|source| SubsetError::Io {
            path: target.clone(),
            source,
        })?;
    }

    let lock_source = config.project_dir.join(LOCK_FILE);
    let lock_target = target.join(LOCK_FILE);
    fs::copy(&lock_source, &lock_target).map_err(|source| SubsetError::Io {
        path: lock_source.clone(),
        source,
    })?;
    info!(path = %lock_target.display(), "copied lock file to the subset directory");

    let count = selected.len();
    let subset_manifest = json!({ DEPENDENCIES_KEY: selected });
    write_json(&target.join(MANIFEST_FILE), &subset_manifest)?;
    info!(
        dependencies = count,
        "created a new package.json with the selected dependencies"
    );

    run_installer(&config.installer, &target)
}

/// Returns whether the target directory already exists.
fn check_target_dir(target: &Path) -> Result<bool, SubsetError> {
    match fs::metadata(target) {
        Ok(metadata) if metadata.is_dir() => Ok(true),
        Ok(_) => Err(SubsetError::TargetNotDirectory(target.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(SubsetError::Io {
            path: target.to_path_buf(),
            source,
        }),
    }
}

fn read_json(path: &Path) -> Result<Value, SubsetError> {
    let content = fs::read_to_string(path).map_err(|source| SubsetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SubsetError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json(path: &Path, value: &Value) -> Result<(), SubsetError> {
    let content = serde_json::to_string_pretty(value).map_err(|source| SubsetError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, content).map_err(|source| SubsetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn run_installer(installer: &[String], dir: &Path) -> Result<(), SubsetError> {
    let command = installer.join(" ");
    let (program, args) = installer.split_first().ok_or_else(|| SubsetError::Spawn {
        command: command.clone(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "empty installer command"),
    })?;

    info!(command = %command, dir = %dir.display(), "running installer");
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .map_err(|source| SubsetError::Spawn {
            command: command.clone(),
            source,
        })?;

    if status.success() {
        return Ok(());
    }
    // Killed by a signal: no code to hand through
    let code = status.code().unwrap_or(1);
    Err(SubsetError::InstallerFailed { command, code })
}
