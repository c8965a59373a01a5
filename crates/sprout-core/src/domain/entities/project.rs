//! Project: the files to generate and the hooks around generation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::collection::Inheriting;
use super::environment::overlay;
use crate::domain::error::DomainError;
use crate::domain::validation::{FieldPath, Validate};

/// Named project type, e.g. `cmd` or `pkg`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Project {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inherits: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Hooks>,

    /// Logical file name -> how to produce it.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub files: IndexMap<String, FileSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Hooks {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pre: Vec<Hook>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub post: Vec<Hook>,
}

/// Shell commands run in one working directory.
///
/// Both the directory and the commands are templates rendered against the
/// project context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Hook {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cwd: String,
    pub commands: Vec<String>,
}

impl Hook {
    pub fn new(cwd: impl Into<String>, commands: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            cwd: cwd.into(),
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }
}

/// One output file.
///
/// `templates` is `None` when a layer does not mention the list at all,
/// which is different from an explicitly empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub r#type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<String>>,
}

impl FileSpec {
    pub fn new(
        path: impl Into<String>,
        file_type: impl Into<String>,
        templates: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            path: path.into(),
            r#type: file_type.into(),
            templates: Some(templates.into_iter().map(Into::into).collect()),
        }
    }

    pub fn templates(&self) -> &[String] {
        self.templates.as_deref().unwrap_or(&[])
    }

    /// A non-empty `Type` replaces the type and its templates together;
    /// otherwise a present `Templates` list replaces the list alone.
    fn merge(&mut self, other: &Self) {
        overlay(&mut self.path, &other.path);

        if !other.r#type.is_empty() {
            self.r#type.clone_from(&other.r#type);
            self.templates.clone_from(&other.templates);
        } else if other.templates.is_some() {
            self.templates.clone_from(&other.templates);
        }
    }
}

impl Hooks {
    /// Ancestor hooks run before the hooks a descendant adds.
    fn merge(&mut self, other: &Self) {
        self.pre.extend(other.pre.iter().cloned());
        self.post.extend(other.post.iter().cloned());
    }
}

impl Validate for Hook {
    fn validate(&self, path: &FieldPath) -> Result<(), DomainError> {
        for (i, command) in self.commands.iter().enumerate() {
            if command.trim().is_empty() {
                return Err(DomainError::invalid(
                    path.field("Commands").index(i),
                    "command must not be empty",
                ));
            }
        }
        Ok(())
    }
}

impl Validate for FileSpec {
    fn validate(&self, path: &FieldPath) -> Result<(), DomainError> {
        for (i, name) in self.templates().iter().enumerate() {
            if name.trim().is_empty() {
                return Err(DomainError::invalid(
                    path.field("Templates").index(i),
                    "template name must not be empty",
                ));
            }
        }
        Ok(())
    }
}

impl Validate for Project {
    fn validate(&self, path: &FieldPath) -> Result<(), DomainError> {
        if let Some(hooks) = &self.hooks {
            let hooks_path = path.field("Hooks");
            for (stage, list) in [("Pre", &hooks.pre), ("Post", &hooks.post)] {
                for (i, hook) in list.iter().enumerate() {
                    hook.validate(&hooks_path.field(stage).index(i))?;
                }
            }
        }

        let files_path = path.field("Files");
        for (name, file) in &self.files {
            file.validate(&files_path.key(name))?;
        }
        Ok(())
    }
}

impl Inheriting for Project {
    const KIND: &'static str = "project";
    const FIELD: &'static str = "Projects";

    fn inherits(&self) -> &[String] {
        &self.inherits
    }

    fn merge(&mut self, other: &Self) {
        if let Some(hooks) = &other.hooks {
            self.hooks.get_or_insert_with(Hooks::default).merge(hooks);
        }

        for (name, file) in &other.files {
            self.files.entry(name.clone()).or_default().merge(file);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(json: &str) -> Project {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn type_replaces_type_and_templates_together() {
        let mut merged = project(r#"{"Files": {"main": {"Path": "m.go", "Type": "go", "Templates": ["a.t", "b.t"]}}}"#);
        merged.merge(&project(r#"{"Files": {"main": {"Type": "test"}}}"#));

        let main = &merged.files["main"];
        assert_eq!(main.path, "m.go");
        assert_eq!(main.r#type, "test");
        assert_eq!(main.templates, None);
    }

    #[test]
    fn templates_alone_replace_only_templates() {
        let mut merged = project(r#"{"Files": {"main": {"Path": "m.go", "Type": "go", "Templates": ["a.t"]}}}"#);
        merged.merge(&project(r#"{"Files": {"main": {"Templates": []}}}"#));

        let main = &merged.files["main"];
        assert_eq!(main.r#type, "go");
        assert_eq!(main.templates, Some(vec![]));
    }

    #[test]
    fn absent_templates_keep_ancestor_list() {
        let mut merged = project(r#"{"Files": {"main": {"Path": "m.go", "Type": "go", "Templates": ["a.t"]}}}"#);
        merged.merge(&project(r#"{"Files": {"main": {"Path": "cmd/m.go"}}}"#));

        let main = &merged.files["main"];
        assert_eq!(main.path, "cmd/m.go");
        assert_eq!(main.templates(), ["a.t".to_owned()]);
    }

    #[test]
    fn new_file_keys_are_appended() {
        let mut merged = project(r#"{"Files": {"a": {"Path": "a"}}}"#);
        merged.merge(&project(r#"{"Files": {"b": {"Path": "b"}}}"#));
        assert_eq!(merged.files.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn hooks_accumulate_in_ancestor_order() {
        let mut merged = Project::default();
        merged.merge(&project(r#"{"Hooks": {"Pre": [{"Commands": ["cmd1"]}]}}"#));
        merged.merge(&project(r#"{"Hooks": {"Pre": [{"Commands": ["cmd2"]}], "Post": [{"Commands": ["p"]}]}}"#));

        let hooks = merged.hooks.unwrap();
        let pre: Vec<_> = hooks.pre.iter().map(|h| h.commands[0].as_str()).collect();
        assert_eq!(pre, ["cmd1", "cmd2"]);
        assert_eq!(hooks.post.len(), 1);
    }

    #[test]
    fn blank_hook_command_is_located() {
        let path = FieldPath::root().field("Projects").key("cmd");
        let err = project(r#"{"Hooks": {"Post": [{"Commands": ["ok", " "]}]}}"#)
            .validate(&path)
            .unwrap_err();
        assert!(
            err.to_string()
                .starts_with(r#"$.Projects["cmd"].Hooks.Post[0].Commands[1]: "#)
        );
    }

    #[test]
    fn blank_template_name_is_located() {
        let path = FieldPath::root().key("p");
        let err = project(r#"{"Files": {"main": {"Templates": [""]}}}"#)
            .validate(&path)
            .unwrap_err();
        assert!(err.to_string().starts_with(r#"$["p"].Files["main"].Templates[0]: "#));
    }
}
