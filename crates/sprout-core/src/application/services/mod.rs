//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "load the config" or "generate a project".

pub mod config_store;
pub mod generate_service;
pub mod render_environment;
pub mod template_service;

#[cfg(test)]
pub(crate) mod fakes;

pub use config_store::ConfigStore;
pub use generate_service::{
    GenerateRequest, GenerateService, GenerationPlan, PlannedFile, PlannedHook,
};
pub use render_environment::RenderEnvironment;
pub use template_service::{TEMPLATE_EXTENSION, TemplateService};
