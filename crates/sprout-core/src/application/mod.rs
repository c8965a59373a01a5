//! Application layer for Sprout.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, TemplateService,
//!   ConfigStore, RenderEnvironment)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Inheritance, merge rules and template precedence
//! live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ConfigStore, GenerateRequest, GenerateService, GenerationPlan, PlannedFile, PlannedHook,
    RenderEnvironment, TEMPLATE_EXTENSION, TemplateService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{FileWriter, ProcessRunner, TemplateScanner, TemplateSet};

pub use error::ApplicationError;
