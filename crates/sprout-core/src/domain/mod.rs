// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Sprout.
//!
//! This module contains the config model, inheritance resolution, template
//! precedence and the template function registry. All I/O apart from
//! checking that external template roots exist is handled via ports
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No rendering**: the template engine lives behind `TemplateSet`
//! - **Data crates only**: serde, serde_json and indexmap
//! - **Value semantics**: resolution builds new values, never mutates the
//!   stored entities
//!
// Public API - what the world sees
pub mod context;
pub mod entities;
pub mod error;
pub mod functions;
pub mod graph;
pub mod license;
pub mod template_source;
pub mod validation;
pub mod value_objects;

// Re-exports for convenience
pub use context::{FileContext, FileDescriptor, ProjectContext, RenderData, package_name};
pub use entities::{
    Collection, ConfigRoot, Defaults, Environment, Environments, FileSpec, Hook, Hooks,
    Inheriting, Project, Projects, UserInfo, VersionControl,
};
pub use error::{DomainError, ErrorCategory};
pub use functions::{Extension, FunctionArgs, FunctionRegistry, TemplateFn};
pub use graph::{InheritanceGraph, Traversal};
pub use template_source::{LayeredSources, TemplateSource};
pub use validation::{FieldPath, Validate};
pub use value_objects::{FileKind, License, VcsType};

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "Default": {"Environment": "work", "Project": "cmd"},
        "Environments": {
            "base": {
                "User": {"Name": "Ann", "Email": "ann@example.org"},
                "License": "newbsd"
            },
            "work": {
                "Inherits": ["base"],
                "BaseImportPath": "example.org/ann",
                "VersionControl": {"Type": "git"}
            }
        },
        "Projects": {
            "base": {
                "Files": {
                    "readme": {"Path": "{{ Project.Name }}/README.md", "Type": "readme", "Templates": ["README.t"]}
                },
                "Hooks": {"Post": [{"Cwd": "{{ Project.Name }}", "Commands": ["git init"]}]}
            },
            "cmd": {
                "Inherits": ["base"],
                "Files": {
                    "main": {"Path": "{{ Project.Name }}/main.go", "Type": "go", "Templates": ["go.cmd.t"]}
                }
            }
        }
    }"#;

    #[test]
    fn document_resolves_end_to_end() {
        let config = ConfigRoot::from_json(DOCUMENT).unwrap();
        config.validate().unwrap();

        let env = config.environment("work").unwrap();
        assert_eq!(env.license, License::NewBsd);
        assert_eq!(env.version_control.unwrap().r#type, VcsType::Git);

        let project = config.project("cmd").unwrap();
        assert_eq!(project.files.keys().collect::<Vec<_>>(), ["readme", "main"]);
        assert_eq!(project.hooks.unwrap().post.len(), 1);
    }

    #[test]
    fn resolved_file_templates_are_wrapped_by_license() {
        let config = ConfigRoot::from_json(DOCUMENT).unwrap();
        let env = config.environment("work").unwrap();
        let project = config.project("cmd").unwrap();

        let main = &project.files["main"];
        let names = env
            .license
            .wrap(FileKind::from_tag(&main.r#type), main.templates());
        assert_eq!(names, ["license.newbsd.gohead.t", "go.cmd.t"]);
    }

    #[test]
    fn inheritance_graph_mirrors_the_document() {
        let config = ConfigRoot::from_json(DOCUMENT).unwrap();
        let graph = config.projects.unwrap().inheritance_graph();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.parents(&"cmd".to_owned()), ["base".to_owned()]);
    }
}
