//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The config file could not be read or written.
    #[error("cannot access config file {path}: {reason}")]
    ConfigIo {
        path: PathBuf,
        kind: io::ErrorKind,
        reason: String,
    },

    /// No template with this name is visible in the template set.
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    /// A template failed to parse when added to the set.
    #[error("template {name} is invalid: {reason}")]
    TemplateInvalid { name: String, reason: String },

    /// Template rendering failed.
    #[error("rendering {name} failed: {reason}")]
    RenderingFailed { name: String, reason: String },

    /// A template directory could not be scanned.
    #[error("cannot read templates from {path}: {reason}")]
    TemplateSourceIo { path: PathBuf, reason: String },

    /// A rendered output path is unusable.
    #[error("file entry {entry:?} rendered an invalid path {path:?}: {reason}")]
    InvalidOutputPath {
        entry: String,
        path: String,
        reason: String,
    },

    /// Filesystem operation failed.
    #[error("filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A generated file would replace an existing one.
    #[error("refusing to overwrite existing file {path}")]
    FileExists { path: PathBuf },

    /// A hook command could not be started or exited unsuccessfully.
    #[error("hook command `{command}` in {cwd} failed: {reason}")]
    HookFailed {
        cwd: PathBuf,
        command: String,
        reason: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigIo { path, kind, .. } if *kind == io::ErrorKind::NotFound => vec![
                format!("No config file at {}", path.display()),
                "Run: sprout init to create one".into(),
                "Or point at an existing file with --config or SPROUT_CONFIG".into(),
            ],
            Self::ConfigIo { path, .. } => vec![
                format!("Check the permissions of {}", path.display()),
            ],
            Self::TemplateNotFound { name } => vec![
                format!("No built-in or external template is named {name:?}"),
                "Template names are file base names, including the .t extension".into(),
                "Check ExternalTemplates in your config".into(),
            ],
            Self::TemplateInvalid { name, .. } | Self::RenderingFailed { name, .. } => vec![
                format!("Check the syntax of {name}"),
                "Templates use Tera syntax: {{ Project.Name }}".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::FileExists { path } => vec![
                format!("{} already exists", path.display()),
                "Remove it or choose a different project name".into(),
            ],
            Self::HookFailed { command, .. } => vec![
                format!("Run `{command}` by hand to see its full output"),
                "Files written before the failure are left in place".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigIo { .. } | Self::TemplateSourceIo { .. } => ErrorCategory::Configuration,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::TemplateInvalid { .. } | Self::InvalidOutputPath { .. } => {
                ErrorCategory::Validation
            }
            Self::FileExists { .. } => ErrorCategory::Validation,
            Self::RenderingFailed { .. } | Self::HookFailed { .. } => ErrorCategory::Execution,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }

    /// True when the config file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ConfigIo { kind, .. } if *kind == io::ErrorKind::NotFound)
    }

    pub(crate) fn config_io(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            kind: err.kind(),
            reason: err.to_string(),
        }
    }
}
