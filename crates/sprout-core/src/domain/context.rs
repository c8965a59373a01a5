//! Data handed to templates.
//!
//! Templates see one object with PascalCase keys:
//!
//! | Key       | Value                                           |
//! |-----------|-------------------------------------------------|
//! | `Project` | `Name`, `Package`, `Import`, `Prefix`           |
//! | `Env`     | the resolved environment (`User`, `License`, …) |
//! | `File`    | `Name`, `Type` (file templates only)            |
//! | `Package` | shorthand for `Project.Package`                 |
//! | `Prefix`  | shorthand for `Project.Prefix`                  |

use serde::Serialize;

use super::entities::Environment;
use super::value_objects::{FileKind, License};

/// Facts about the project being generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectContext {
    pub name: String,
    pub package: String,
    pub import: String,
    pub prefix: String,
}

impl ProjectContext {
    /// Build the context for project `name`.
    ///
    /// `package` stands in for `name` as the raw package name: `Package`
    /// strips its `go-`/`.go` affixes, `Import` appends it unchanged to the
    /// base import path.
    pub fn new(name: &str, package: Option<&str>, env: &Environment) -> Self {
        let raw = package.filter(|p| !p.is_empty()).unwrap_or(name);

        let import = match env.base_import_path.trim_end_matches('/') {
            "" => raw.to_owned(),
            base => format!("{base}/{raw}"),
        };

        Self {
            name: name.to_owned(),
            package: package_name(raw),
            import,
            prefix: format!("./{name}"),
        }
    }
}

/// Package name derived from a project name: `go-foo` and `foo.go` both
/// become `foo`.
pub fn package_name(project: &str) -> String {
    let trimmed = project.strip_prefix("go-").unwrap_or(project);
    let trimmed = trimmed.strip_suffix(".go").unwrap_or(trimmed);
    trimmed.to_owned()
}

/// Uniform view of one generated file.
pub trait FileDescriptor {
    /// Base name of the output file.
    fn filename(&self) -> &str;
    fn kind(&self) -> FileKind;
    fn package(&self) -> &str;
    fn license(&self) -> &License;
    fn project(&self) -> &ProjectContext;

    /// One line for listings, e.g. `main.go (go, main)`.
    fn description(&self) -> String {
        format!("{} ({}, {})", self.filename(), self.kind(), self.package())
    }
}

/// Facts about one output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileContext {
    pub name: String,
    pub r#type: String,

    #[serde(skip)]
    pub entry: String,
    #[serde(skip)]
    kind: FileKind,
    #[serde(skip)]
    license: License,
    #[serde(skip)]
    project: ProjectContext,
}

impl FileContext {
    pub fn new(
        entry: impl Into<String>,
        filename: impl Into<String>,
        file_type: impl Into<String>,
        project: &ProjectContext,
        env: &Environment,
    ) -> Self {
        let file_type = file_type.into();
        Self {
            name: filename.into(),
            kind: FileKind::from_tag(&file_type),
            r#type: file_type,
            entry: entry.into(),
            license: env.license.clone(),
            project: project.clone(),
        }
    }
}

impl FileDescriptor for FileContext {
    fn filename(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FileKind {
        self.kind
    }

    fn package(&self) -> &str {
        &self.project.package
    }

    fn license(&self) -> &License {
        &self.license
    }

    fn project(&self) -> &ProjectContext {
        &self.project
    }
}

/// Top-level template data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderData<'a> {
    pub project: &'a ProjectContext,
    pub env: &'a Environment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<&'a FileContext>,
    pub package: &'a str,
    pub prefix: &'a str,
}

impl<'a> RenderData<'a> {
    /// Data for project-level text: paths, hook directories, hook commands.
    pub fn for_project(project: &'a ProjectContext, env: &'a Environment) -> Self {
        Self {
            project,
            env,
            file: None,
            package: &project.package,
            prefix: &project.prefix,
        }
    }

    /// Data for the templates of one file.
    pub fn for_file(file: &'a FileContext, env: &'a Environment) -> Self {
        Self {
            file: Some(file),
            ..Self::for_project(&file.project, env)
        }
    }
}
