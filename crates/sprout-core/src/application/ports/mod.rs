//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `sprout-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FileWriter`: Create generated files
//!   - `ProcessRunner`: Run hook commands
//!   - `TemplateScanner`: Discover template files in external directories
//!   - `TemplateSet`: Render named templates
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{FileWriter, ProcessRunner, TemplateScanner, TemplateSet};
