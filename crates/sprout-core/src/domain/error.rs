// ============================================================================
// domain/error.rs - CONFIGURATION AND TEMPLATE DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use super::validation::FieldPath;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried through `SproutError`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// A structural problem at a precise location in the config document.
    #[error("{path}: {reason}")]
    Invalid { path: FieldPath, reason: String },

    #[error("malformed config document: {reason}")]
    MalformedDocument { reason: String },

    #[error("duplicate output path: {path}")]
    DuplicatePath { path: String },

    #[error("output path must be relative: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Inheritance Errors
    // ========================================================================
    #[error("{path}: inheritance cycle via {from:?} -> {to:?}")]
    InheritanceCycle {
        path: FieldPath,
        from: String,
        to: String,
    },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("unknown {kind}: {name}")]
    UnknownEntity { kind: &'static str, name: String },

    // ========================================================================
    // Template Source Errors
    // ========================================================================
    #[error("duplicate template {name:?} in source {origin}")]
    DuplicateTemplate { origin: String, name: String },

    #[error("template function {name:?} is already registered")]
    DuplicateFunction { name: String },
}

impl DomainError {
    /// Shorthand for a located validation failure.
    pub fn invalid(path: FieldPath, reason: impl Into<String>) -> Self {
        Self::Invalid {
            path,
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Invalid { path, .. } => vec![
                format!("Fix the value at {path} in your config file"),
                "Run: sprout list to see the defined environments and projects".into(),
            ],
            Self::MalformedDocument { .. } => vec![
                "The config file must be a JSON object with PascalCase keys".into(),
                "Run: sprout init --force to write a fresh config".into(),
            ],
            Self::InheritanceCycle { from, to, .. } => vec![
                format!("Remove {to:?} from the Inherits list of {from:?}"),
                "An entity may not inherit from itself, directly or indirectly".into(),
            ],
            Self::UnknownEntity { kind, name } => vec![
                format!("No {kind} named {name:?} is defined"),
                "Run: sprout list to see what is available".into(),
            ],
            Self::DuplicateTemplate { origin, name } => vec![
                format!("Two files in {origin} share the base name {name:?}"),
                "Template names come from base names, rename one of the files".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("Two file entries render to {path}"),
                "Give each file entry a distinct Path".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Invalid { .. }
            | Self::MalformedDocument { .. }
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::DuplicateTemplate { .. } => ErrorCategory::Validation,
            Self::InheritanceCycle { .. } => ErrorCategory::Compatibility,
            Self::UnknownEntity { .. } => ErrorCategory::NotFound,
            Self::DuplicateFunction { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
