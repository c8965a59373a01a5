//! Generate Service - main application orchestrator.
//!
//! Generation runs in two phases:
//!
//! 1. **Plan**: resolve the environment and project, render every output
//!    path and every file's content into memory, render every hook.
//! 2. **Execute**: run pre-hooks, write the files, run post-hooks.
//!
//! Any rendering failure happens in the first phase, so it leaves no files
//! behind and runs no hooks.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{FileWriter, ProcessRunner, TemplateSet},
        services::render_environment::RenderEnvironment,
    },
    domain::{
        ConfigRoot, DomainError, FileContext, FileDescriptor, Hook, ProjectContext, RenderData,
    },
    error::SproutResult,
};

/// What to generate and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub environment: String,
    pub project_type: String,
    pub name: String,
    pub package: Option<String>,
    pub output_root: PathBuf,
}

impl GenerateRequest {
    pub fn new(
        environment: impl Into<String>,
        project_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            environment: environment.into(),
            project_type: project_type.into(),
            name: name.into(),
            package: None,
            output_root: PathBuf::from("."),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }
}

/// One fully rendered file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Logical name of the file entry in the project.
    pub entry: String,
    pub path: PathBuf,
    pub description: String,
    pub content: Vec<u8>,
}

/// One rendered hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedHook {
    pub cwd: PathBuf,
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub project: ProjectContext,
    pub files: Vec<PlannedFile>,
    pub pre_hooks: Vec<PlannedHook>,
    pub post_hooks: Vec<PlannedHook>,
}

/// Main generation service.
pub struct GenerateService {
    writer: Box<dyn FileWriter>,
    runner: Box<dyn ProcessRunner>,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    pub fn new(writer: Box<dyn FileWriter>, runner: Box<dyn ProcessRunner>) -> Self {
        Self { writer, runner }
    }

    /// Plan and execute in one go.
    pub fn generate(
        &self,
        config: &ConfigRoot,
        request: &GenerateRequest,
        templates: &mut dyn TemplateSet,
    ) -> SproutResult<GenerationPlan> {
        let plan = self.plan(config, request, templates)?;
        self.execute(&plan)?;
        Ok(plan)
    }

    /// Render everything into memory. Touches neither disk nor processes.
    #[instrument(
        skip_all,
        fields(
            environment = %request.environment,
            project = %request.project_type,
            name = %request.name
        )
    )]
    pub fn plan(
        &self,
        config: &ConfigRoot,
        request: &GenerateRequest,
        templates: &mut dyn TemplateSet,
    ) -> SproutResult<GenerationPlan> {
        let env = config.environment(&request.environment)?;
        let project = config.project(&request.project_type)?;

        let context = ProjectContext::new(&request.name, request.package.as_deref(), &env);
        let project_env = RenderEnvironment::new(&RenderData::for_project(&context, &env))?;

        let mut files = Vec::with_capacity(project.files.len());
        let mut seen = HashSet::new();

        for (entry, spec) in &project.files {
            let rendered = project_env.render_text_as_string(templates, "pre_", &spec.path)?;
            let relative = output_path(entry, &rendered)?;
            if !seen.insert(relative.clone()) {
                return Err(DomainError::DuplicatePath { path: rendered }.into());
            }

            let filename = relative
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let file = FileContext::new(entry, filename, &spec.r#type, &context, &env);
            let names = file.license().wrap(file.kind(), spec.templates());

            let file_env = RenderEnvironment::new(&RenderData::for_file(&file, &env))?;
            let mut content = Vec::new();
            file_env.render(&mut content, &*templates, names.as_slice())?;

            debug!(
                entry = %entry,
                path = %relative.display(),
                templates = ?names,
                bytes = content.len(),
                "file rendered"
            );

            files.push(PlannedFile {
                entry: entry.clone(),
                path: request.output_root.join(&relative),
                description: file.description(),
                content,
            });
        }

        let hooks = project.hooks.unwrap_or_default();
        let pre_hooks = render_hooks(&hooks.pre, &project_env, templates, &request.output_root)?;
        let post_hooks = render_hooks(&hooks.post, &project_env, templates, &request.output_root)?;

        info!(
            files = files.len(),
            pre_hooks = pre_hooks.len(),
            post_hooks = post_hooks.len(),
            "Generation planned"
        );

        Ok(GenerationPlan {
            project: context,
            files,
            pre_hooks,
            post_hooks,
        })
    }

    /// Run pre-hooks, write every planned file, run post-hooks.
    ///
    /// Existing files are detected before anything runs. A hook failure
    /// aborts the rest; files already written stay on disk.
    #[instrument(skip_all, fields(project = %plan.project.name))]
    pub fn execute(&self, plan: &GenerationPlan) -> SproutResult<()> {
        if let Some(file) = plan.files.iter().find(|f| self.writer.exists(&f.path)) {
            return Err(ApplicationError::FileExists {
                path: file.path.clone(),
            }
            .into());
        }

        self.run_hooks("pre", &plan.pre_hooks)?;

        for file in &plan.files {
            let mut out = self.writer.create(&file.path)?;
            out.write_all(&file.content)
                .and_then(|()| out.flush())
                .map_err(|e| ApplicationError::FilesystemError {
                    path: file.path.clone(),
                    reason: e.to_string(),
                })?;
            info!(path = %file.path.display(), "Created file");
        }

        self.run_hooks("post", &plan.post_hooks)?;

        info!("Generation completed successfully");
        Ok(())
    }

    fn run_hooks(&self, stage: &str, hooks: &[PlannedHook]) -> SproutResult<()> {
        for hook in hooks {
            for command in &hook.commands {
                info!(stage, cwd = %hook.cwd.display(), %command, "Running hook");
                self.runner.run(&hook.cwd, command)?;
            }
        }
        Ok(())
    }
}

// -------------------------------------------------------------------------
// Internal Helpers
// -------------------------------------------------------------------------

/// Validate a rendered output path; it must name a file below the root.
fn output_path(entry: &str, rendered: &str) -> SproutResult<PathBuf> {
    let invalid = |reason: &str| ApplicationError::InvalidOutputPath {
        entry: entry.to_owned(),
        path: rendered.to_owned(),
        reason: reason.to_owned(),
    };

    let trimmed = rendered.trim();
    if trimmed.is_empty() {
        return Err(invalid("path is empty").into());
    }

    let path = PathBuf::from(trimmed);
    if path.is_absolute() || path.has_root() {
        return Err(DomainError::AbsolutePathNotAllowed {
            path: trimmed.to_owned(),
        }
        .into());
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(invalid("path must not contain `..`").into());
    }
    if trimmed.ends_with('/') || path.file_name().is_none() {
        return Err(invalid("path does not name a file").into());
    }
    Ok(path)
}

fn render_hooks(
    hooks: &[Hook],
    env: &RenderEnvironment,
    templates: &mut dyn TemplateSet,
    root: &Path,
) -> SproutResult<Vec<PlannedHook>> {
    let mut planned = Vec::with_capacity(hooks.len());
    for hook in hooks {
        let cwd = env.render_text_as_string(templates, "cwd_", &hook.cwd)?;
        let mut commands = Vec::with_capacity(hook.commands.len());
        for command in &hook.commands {
            commands.push(env.render_text_as_string(templates, "cmd_", command)?);
        }
        let cwd = match cwd.trim() {
            "" => root.to_path_buf(),
            dir => root.join(dir),
        };
        planned.push(PlannedHook { cwd, commands });
    }
    Ok(planned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::fakes::{FakeRunner, FakeTemplates, FakeWriter, Journal};
    use crate::error::SproutError;

    const CONFIG: &str = r#"{
        "Environments": {
            "default": {
                "User": {"Name": "Ann", "Email": "ann@example.org"},
                "BaseImportPath": "example.org/ann",
                "License": "newbsd"
            }
        },
        "Projects": {
            "base": {
                "Hooks": {"Pre": [{"Commands": ["echo pre {{ Project.Name }}"]}]}
            },
            "cmd": {
                "Inherits": ["base"],
                "Files": {
                    "main": {"Path": "{{ Project.Name }}/main.go", "Type": "go", "Templates": ["go.cmd.t"]},
                    "readme": {"Path": "{{ Project.Name }}/README.md", "Type": "readme", "Templates": ["README.t"]}
                },
                "Hooks": {"Post": [{"Cwd": "{{ Project.Name }}", "Commands": ["git init"]}]}
            }
        }
    }"#;

    fn config() -> ConfigRoot {
        let config = ConfigRoot::from_json(CONFIG).unwrap();
        config.validate().unwrap();
        config
    }

    fn templates() -> FakeTemplates {
        FakeTemplates::with(&[
            ("license.newbsd.gohead.t", "// (c) {{ Env.User.Name }}\n"),
            ("license.newbsd.readme.t", "\nBSD\n"),
            ("go.cmd.t", "package {{ Package }} // {{ File.Name }}\n"),
            ("README.t", "# {{ Project.Name }}\n"),
        ])
    }

    fn service(journal: &Journal) -> (GenerateService, FakeWriter) {
        let writer = FakeWriter {
            journal: journal.clone(),
            ..FakeWriter::default()
        };
        let runner = FakeRunner {
            journal: journal.clone(),
            ..FakeRunner::default()
        };
        (
            GenerateService::new(Box::new(writer.clone()), Box::new(runner)),
            writer,
        )
    }

    #[test]
    fn plan_renders_paths_and_licensed_content() {
        let (service, _) = service(&Journal::default());
        let request = GenerateRequest::new("default", "cmd", "demo").with_output_root("/out");

        let plan = service.plan(&config(), &request, &mut templates()).unwrap();

        assert_eq!(plan.files.len(), 2);
        let main = &plan.files[0];
        assert_eq!(main.path, PathBuf::from("/out/demo/main.go"));
        assert_eq!(
            String::from_utf8_lossy(&main.content),
            "// (c) Ann\npackage demo // main.go\n"
        );
        assert_eq!(main.description, "main.go (go, demo)");

        let readme = &plan.files[1];
        assert_eq!(String::from_utf8_lossy(&readme.content), "# demo\n\nBSD\n");

        assert_eq!(plan.pre_hooks[0].commands, ["echo pre demo"]);
        assert_eq!(plan.pre_hooks[0].cwd, PathBuf::from("/out"));
        assert_eq!(plan.post_hooks[0].cwd, PathBuf::from("/out/demo"));
    }

    #[test]
    fn execute_orders_pre_hooks_files_post_hooks() {
        let journal = Journal::default();
        let (service, writer) = service(&journal);
        let request = GenerateRequest::new("default", "cmd", "demo").with_output_root("out");

        service.generate(&config(), &request, &mut templates()).unwrap();

        assert_eq!(
            journal.entries(),
            [
                "run echo pre demo in out",
                "write out/demo/main.go",
                "write out/demo/README.md",
                "run git init in out/demo",
            ]
        );
        assert_eq!(writer.files.lock().unwrap().len(), 2);
    }

    #[test]
    fn render_failure_writes_nothing_and_runs_nothing() {
        let journal = Journal::default();
        let (service, writer) = service(&journal);
        let mut templates = FakeTemplates::with(&[("go.cmd.t", "ok")]);
        let request = GenerateRequest::new("default", "cmd", "demo");

        let err = service.generate(&config(), &request, &mut templates).unwrap_err();

        assert!(matches!(
            err,
            SproutError::Application(ApplicationError::TemplateNotFound { .. })
        ));
        assert!(journal.entries().is_empty());
        assert!(writer.files.lock().unwrap().is_empty());
    }

    #[test]
    fn existing_file_is_detected_before_hooks() {
        let journal = Journal::default();
        let writer = FakeWriter {
            existing: vec![PathBuf::from("./demo/README.md")],
            journal: journal.clone(),
            ..FakeWriter::default()
        };
        let runner = FakeRunner {
            journal: journal.clone(),
            ..FakeRunner::default()
        };
        let service = GenerateService::new(Box::new(writer), Box::new(runner));
        let request = GenerateRequest::new("default", "cmd", "demo");

        let err = service.generate(&config(), &request, &mut templates()).unwrap_err();
        assert!(matches!(
            err,
            SproutError::Application(ApplicationError::FileExists { .. })
        ));
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn failing_pre_hook_aborts_before_files() {
        let journal = Journal::default();
        let writer = FakeWriter {
            journal: journal.clone(),
            ..FakeWriter::default()
        };
        let runner = FakeRunner {
            fail_on: Some("echo pre demo".into()),
            journal: journal.clone(),
        };
        let service = GenerateService::new(Box::new(writer), Box::new(runner));
        let request = GenerateRequest::new("default", "cmd", "demo");

        assert!(service.generate(&config(), &request, &mut templates()).is_err());
        assert_eq!(journal.entries(), ["run echo pre demo in ."]);
    }

    #[test]
    fn unknown_environment_and_project_are_reported() {
        let (service, _) = service(&Journal::default());

        let err = service
            .plan(&config(), &GenerateRequest::new("nope", "cmd", "x"), &mut templates())
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown environment: nope");

        let err = service
            .plan(&config(), &GenerateRequest::new("default", "lib", "x"), &mut templates())
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown project: lib");
    }

    #[test]
    fn explicit_package_overrides_derived_one() {
        let (service, _) = service(&Journal::default());
        let request = GenerateRequest::new("default", "cmd", "go-demo").with_package("main");

        let plan = service.plan(&config(), &request, &mut templates()).unwrap();
        assert_eq!(plan.project.package, "main");
        assert_eq!(plan.project.import, "example.org/ann/main");
        assert!(String::from_utf8_lossy(&plan.files[0].content).contains("package main"));
    }

    #[test]
    fn output_paths_must_stay_below_the_root() {
        assert!(output_path("a", "demo/main.go").is_ok());
        assert!(output_path("a", "  ").is_err());
        assert!(output_path("a", "/etc/passwd").is_err());
        assert!(output_path("a", "../escape.go").is_err());
        assert!(output_path("a", "demo/").is_err());
    }

    #[test]
    fn duplicate_rendered_paths_are_rejected() {
        let config = ConfigRoot::from_json(
            r#"{
                "Environments": {"e": {"User": {"Name": "A"}}},
                "Projects": {"p": {"Files": {
                    "a": {"Path": "{{ Project.Name }}/x", "Templates": []},
                    "b": {"Path": "{{ Project.Name }}/x", "Templates": []}
                }}}
            }"#,
        )
        .unwrap();
        let (service, _) = service(&Journal::default());

        let err = service
            .plan(&config, &GenerateRequest::new("e", "p", "demo"), &mut FakeTemplates::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SproutError::Domain(DomainError::DuplicatePath { .. })
        ));
    }
}
