//! Implementation of the `sprout new` command.
//!
//! Responsibility: turn CLI arguments into a `GenerateRequest`, wire the
//! adapters into the core services and display results. Resolution and
//! rendering live in `sprout-core`.

use std::path::PathBuf;

use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use sprout_adapters::{
    DirectoryScanner, LocalFileWriter, ShellRunner, TeraTemplateSet, builtin_source,
    standard_registry,
};
use sprout_core::{
    application::{GenerateRequest, GenerateService, GenerationPlan, PlannedHook, TemplateService},
    domain::ConfigRoot,
    error::SproutError,
};

use super::{init, load_config, prompt};
use crate::{
    cli::{GlobalArgs, NewArgs},
    config,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `sprout new` command.
///
/// 1. Validate the project name
/// 2. Load the config, offering to create one when it is missing
/// 3. Pick the environment and project type (flags, then `Default`)
/// 4. Build the layered template set with the standard functions
/// 5. Plan; print the plan on `--dry-run`, otherwise execute it
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    validate_project_name(&args.name)?;

    let store = config::store(global.config.as_deref());
    let config = match load_config(&store) {
        Err(CliError::ConfigMissing { .. }) if !args.no_input && prompt::available() => {
            init::bootstrap(&store, output)?
        }
        other => other?,
    };

    let request = build_request(&args, &config)?;
    debug!(
        environment = %request.environment,
        project = %request.project_type,
        output = %request.output_root.display(),
        "request resolved"
    );

    let layers = TemplateService::new(Box::new(DirectoryScanner::new()))
        .layered(builtin_source()?, &config.external_templates)?;
    let env = config
        .environment(&request.environment)
        .map_err(SproutError::from)?;
    let registry = standard_registry(env.user.as_ref())?;
    let mut templates = TeraTemplateSet::new(&layers, &registry)?;

    let service = GenerateService::new(
        Box::new(LocalFileWriter::new()),
        Box::new(ShellRunner::new()),
    );
    let plan = service.plan(&config, &request, &mut templates)?;

    if args.dry_run {
        return show_plan(&plan, output);
    }

    info!(files = plan.files.len(), "writing project");
    service.execute(&plan)?;

    if output.is_json() {
        output.json(&plan_json(&plan, false))?;
        return Ok(());
    }
    output.success(&format!(
        "Created {} `{}` ({} files)",
        request.project_type,
        plan.project.name,
        plan.files.len()
    ))?;
    for file in &plan.files {
        output.print(&format!("  {}", file.path.display()))?;
    }
    Ok(())
}

fn build_request(args: &NewArgs, config: &ConfigRoot) -> CliResult<GenerateRequest> {
    let environment = args
        .environment
        .clone()
        .or_else(|| config.default.environment.clone())
        .ok_or(CliError::NoDefault {
            what: "environment",
            field: "Environment",
        })?;
    let project_type = args
        .project_type
        .clone()
        .or_else(|| config.default.project.clone())
        .ok_or(CliError::NoDefault {
            what: "project type",
            field: "Project",
        })?;

    let mut request = GenerateRequest::new(environment, project_type, &args.name)
        .with_output_root(args.output.clone().unwrap_or_else(|| PathBuf::from(".")));
    if let Some(package) = &args.package {
        request = request.with_package(package);
    }
    Ok(request)
}

/// The name becomes `Project.Name` and usually a directory, so it must be a
/// single plain path segment.
fn validate_project_name(name: &str) -> CliResult<()> {
    let invalid = |reason: &str| CliError::InvalidProjectName {
        name: name.into(),
        reason: reason.into(),
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("name cannot start with '.'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name cannot contain path separators"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("name cannot contain whitespace"));
    }
    Ok(())
}

// ── Dry run ───────────────────────────────────────────────────────────────────

fn show_plan(plan: &GenerationPlan, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&plan_json(plan, true))?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would create `{}` (package {})",
        plan.project.name, plan.project.package
    ))?;
    output.header("Files")?;
    for file in &plan.files {
        output.print(&format!("  {}", file.path.display()))?;
        output.detail(&format!("  {} ({} bytes)", file.description, file.content.len()))?;
    }
    show_hooks("Pre-hooks", &plan.pre_hooks, output)?;
    show_hooks("Post-hooks", &plan.post_hooks, output)?;
    Ok(())
}

fn show_hooks(title: &str, hooks: &[PlannedHook], output: &OutputManager) -> CliResult<()> {
    if hooks.is_empty() {
        return Ok(());
    }
    output.header(title)?;
    for hook in hooks {
        for command in &hook.commands {
            output.print(&format!("  [{}] {command}", hook.cwd.display()))?;
        }
    }
    Ok(())
}

fn plan_json(plan: &GenerationPlan, dry_run: bool) -> Value {
    let hooks = |hooks: &[PlannedHook]| -> Vec<Value> {
        hooks
            .iter()
            .map(|h| json!({ "cwd": h.cwd.display().to_string(), "commands": h.commands }))
            .collect()
    };

    json!({
        "dry_run": dry_run,
        "project": plan.project,
        "files": plan.files.iter().map(|f| json!({
            "entry": f.entry,
            "path": f.path.display().to_string(),
            "description": f.description,
            "bytes": f.content.len(),
        })).collect::<Vec<_>>(),
        "pre_hooks": hooks(&plan.pre_hooks),
        "post_hooks": hooks(&plan.post_hooks),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
