//! Infrastructure adapters for Sprout.
//!
//! This crate implements the ports defined in `sprout-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod functions;
pub mod process;
pub mod scanner;
pub mod template_set;

// Re-export commonly used adapters
pub use builtin_templates::{builtin_source, default_config};
pub use filesystem::{LocalFileWriter, MemoryFileWriter};
pub use functions::standard_registry;
pub use process::{RecordingRunner, ShellRunner};
pub use scanner::DirectoryScanner;
pub use template_set::TeraTemplateSet;
