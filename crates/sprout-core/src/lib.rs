//! Sprout Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Sprout
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           sprout-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerateService, TemplateService,      │
//! │  ConfigStore, RenderEnvironment)        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (FileWriter, ProcessRunner,             │
//! │  TemplateScanner, TemplateSet)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    sprout-adapters (Infrastructure)     │
//! │ (TeraTemplateSet, LocalFileWriter, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (InheritanceGraph, ConfigRoot,          │
//! │  LayeredSources, FunctionRegistry)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprout_core::application::{ConfigStore, GenerateRequest, GenerateService};
//!
//! let config = ConfigStore::new("sprout.json").load()?;
//! let request = GenerateRequest::new("default", "cmd", "demo");
//!
//! // Adapters are injected by the caller.
//! let service = GenerateService::new(writer, runner);
//! let plan = service.plan(&config, &request, &mut templates)?;
//! service.execute(&plan)?;
//! # Ok::<(), sprout_core::error::SproutError>(())
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ConfigStore, GenerateRequest, GenerateService, GenerationPlan, RenderEnvironment,
        TemplateService,
        ports::{FileWriter, ProcessRunner, TemplateScanner, TemplateSet},
    };
    pub use crate::domain::{
        ConfigRoot, Environment, FileKind, FileSpec, FunctionRegistry, InheritanceGraph,
        LayeredSources, License, Project, TemplateSource,
    };
    pub use crate::error::{SproutError, SproutResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
