//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sprout-adapters` crate provides implementations.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::SproutResult;

/// Port for creating generated files.
///
/// Implemented by:
/// - `sprout_adapters::filesystem::LocalFileWriter` (production)
/// - `sprout_adapters::filesystem::MemoryFileWriter` (testing)
pub trait FileWriter: Send + Sync {
    /// Create `path` and return a stream for its content.
    ///
    /// Missing parent directories are created. Fails with
    /// `ApplicationError::FileExists` if the file is already there.
    fn create(&self, path: &Path) -> SproutResult<Box<dyn Write + Send>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for running hook commands.
///
/// Implemented by:
/// - `sprout_adapters::process::ShellRunner` (`bash -c`, inherited stdio)
/// - `sprout_adapters::process::RecordingRunner` (testing)
pub trait ProcessRunner: Send + Sync {
    /// Run one shell command in `cwd`; a non-zero exit is an error.
    fn run(&self, cwd: &Path, command: &str) -> SproutResult<()>;
}

/// Port for discovering template files on disk.
///
/// Implemented by:
/// - `sprout_adapters::scanner::DirectoryScanner`
pub trait TemplateScanner: Send + Sync {
    /// Regular files under `root`, recursively.
    fn list_files(&self, root: &Path) -> SproutResult<Vec<PathBuf>>;

    fn read_to_string(&self, path: &Path) -> SproutResult<String>;
}

/// Port for a set of named, mutually visible templates.
///
/// Implemented by:
/// - `sprout_adapters::template_set::TeraTemplateSet`
pub trait TemplateSet: Send + Sync {
    /// Render template `name` with `data` into `out`.
    ///
    /// Fails with `ApplicationError::TemplateNotFound` if no template of
    /// that name exists.
    fn render(&self, out: &mut dyn Write, name: &str, data: &Value) -> SproutResult<()>;

    /// Parse `body` and add it under `name`, visible to later renders.
    fn add_source(&mut self, name: &str, body: &str) -> SproutResult<()>;

    fn contains(&self, name: &str) -> bool;
}
