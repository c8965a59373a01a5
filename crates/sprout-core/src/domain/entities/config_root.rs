//! The whole config document.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::collection::{Collection, Inheriting};
use super::environment::Environment;
use super::project::Project;
use crate::domain::error::DomainError;
use crate::domain::validation::{FieldPath, Validate};

pub type Environments = Collection<Environment>;
pub type Projects = Collection<Project>;

/// Fallbacks used when the command line does not name an environment or
/// project type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Defaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl Defaults {
    pub fn is_empty(&self) -> bool {
        self.environment.is_none() && self.project.is_none()
    }
}

/// Root of the JSON config document.
///
/// Collections are optional at the type level so that a missing section can
/// be told apart from an empty one during validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigRoot {
    #[serde(default, skip_serializing_if = "Defaults::is_empty")]
    pub default: Defaults,

    #[serde(default)]
    pub environments: Option<Environments>,

    /// Extra template directories, highest precedence first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_templates: Vec<PathBuf>,

    #[serde(default)]
    pub projects: Option<Projects>,
}

impl ConfigRoot {
    /// Parse a JSON document. Does not validate.
    pub fn from_json(source: &str) -> Result<Self, DomainError> {
        serde_json::from_str(source).map_err(|e| DomainError::MalformedDocument {
            reason: e.to_string(),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::MalformedDocument {
            reason: e.to_string(),
        })
    }

    /// Resolve a named environment through its ancestors.
    ///
    /// The result must carry `User` once inheritance is applied.
    pub fn environment(&self, name: &str) -> Result<Environment, DomainError> {
        let environments = self.environments.as_ref().ok_or(DomainError::UnknownEntity {
            kind: "environment",
            name: name.to_owned(),
        })?;

        let merged = environments.resolve(name)?;
        merged.validate_resolved(&FieldPath::root().field(Environment::FIELD).key(name))?;
        Ok(merged)
    }

    /// Resolve a named project type through its ancestors.
    pub fn project(&self, name: &str) -> Result<Project, DomainError> {
        let projects = self.projects.as_ref().ok_or(DomainError::UnknownEntity {
            kind: "project",
            name: name.to_owned(),
        })?;
        projects.resolve(name)
    }
}

impl ConfigRoot {
    /// Validate the whole document.
    ///
    /// Order: environments, external template roots, projects.
    pub fn validate(&self) -> Result<(), DomainError> {
        Validate::validate(self, &FieldPath::root())
    }
}

impl Validate for ConfigRoot {
    fn validate(&self, path: &FieldPath) -> Result<(), DomainError> {
        let env_path = path.field(Environment::FIELD);
        match &self.environments {
            None => return Err(DomainError::invalid(env_path, "missing")),
            Some(envs) if envs.is_empty() => {
                return Err(DomainError::invalid(env_path, "no environments defined"));
            }
            Some(envs) => envs.validate(&env_path)?,
        }

        let templates_path = path.field("ExternalTemplates");
        for (i, root) in self.external_templates.iter().enumerate() {
            let item = templates_path.index(i);
            if !root.is_absolute() {
                return Err(DomainError::invalid(
                    item,
                    format!("{} is not an absolute path", root.display()),
                ));
            }
            match root.metadata() {
                Err(e) => {
                    return Err(DomainError::invalid(
                        item,
                        format!("{}: {e}", root.display()),
                    ));
                }
                Ok(meta) if !meta.is_dir() => {
                    return Err(DomainError::invalid(
                        item,
                        format!("{} is not a directory", root.display()),
                    ));
                }
                Ok(_) => {}
            }
        }

        let projects_path = path.field(Project::FIELD);
        match &self.projects {
            None => Err(DomainError::invalid(projects_path, "missing")),
            Some(projects) => projects.validate(&projects_path),
        }
    }
}
