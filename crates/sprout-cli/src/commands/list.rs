//! Implementation of the `sprout list` command.
//!
//! Shows the environments and project types of the config, the defaults
//! marked with `*`, and for each project type the file entries it resolves
//! to after inheritance.

use serde_json::{Value, json};

use sprout_core::{
    domain::{ConfigRoot, Project},
    error::SproutError,
};

use super::load_config;
use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    config,
    error::CliResult,
    output::OutputManager,
};

/// One listed environment or project type.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    inherits: Vec<String>,
    is_default: bool,
    /// Resolved `(entry, path)` pairs; empty for environments.
    files: Vec<(String, String)>,
}

impl Entry {
    fn marker(&self) -> &'static str {
        if self.is_default { "*" } else { " " }
    }

    fn to_json(&self) -> Value {
        let mut value = json!({
            "name": self.name,
            "inherits": self.inherits,
            "default": self.is_default,
        });
        if !self.files.is_empty() {
            value["files"] = self
                .files
                .iter()
                .map(|(entry, path)| json!({ "entry": entry, "path": path }))
                .collect();
        }
        value
    }
}

pub fn execute(args: ListArgs, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let config = load_config(&config::store(global.config.as_deref()))?;
    let environments = environments(&config);
    let projects = projects(&config)?;

    // A global `--output-format json` wins over the table default.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Environments")?;
            for env in &environments {
                output.print(&table_row(env))?;
            }
            output.print("")?;
            output.header("Projects")?;
            for project in &projects {
                output.print(&table_row(project))?;
                for (entry, path) in &project.files {
                    output.detail(&format!("  {entry:<12} {path}"))?;
                }
            }
        }
        ListFormat::List => {
            for env in &environments {
                output.print(&format!("environment {}", env.name))?;
            }
            for project in &projects {
                output.print(&format!("project {}", project.name))?;
            }
        }
        ListFormat::Json => {
            output.json(&json!({
                "environments": environments.iter().map(Entry::to_json).collect::<Vec<_>>(),
                "projects": projects.iter().map(Entry::to_json).collect::<Vec<_>>(),
            }))?;
        }
    }

    Ok(())
}

fn table_row(entry: &Entry) -> String {
    if entry.inherits.is_empty() {
        format!("{} {}", entry.marker(), entry.name)
    } else {
        format!(
            "{} {:<16} inherits {}",
            entry.marker(),
            entry.name,
            entry.inherits.join(", ")
        )
    }
}

fn environments(config: &ConfigRoot) -> Vec<Entry> {
    let default = config.default.environment.as_deref();
    config
        .environments
        .iter()
        .flat_map(|c| c.iter())
        .map(|(name, env)| Entry {
            name: name.clone(),
            inherits: env.inherits.clone(),
            is_default: default == Some(name.as_str()),
            files: Vec::new(),
        })
        .collect()
}

fn projects(config: &ConfigRoot) -> CliResult<Vec<Entry>> {
    let default = config.default.project.as_deref();
    let Some(projects) = &config.projects else {
        return Ok(Vec::new());
    };

    projects
        .iter()
        .map(|(name, project)| {
            let resolved: Project = config.project(name).map_err(SproutError::from)?;
            Ok(Entry {
                name: name.clone(),
                inherits: project.inherits.clone(),
                is_default: default == Some(name.as_str()),
                files: resolved
                    .files
                    .iter()
                    .map(|(entry, spec)| (entry.clone(), spec.path.clone()))
                    .collect(),
            })
        })
        .collect()
}
