//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use sprout_core::domain::License;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sprout",
    bin_name = "sprout",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate Go projects from inheritable environments and project types",
    long_about = "Sprout renders a project type's files and hooks from a JSON config \
                  of environments (who you are) and projects (what to create).",
    after_help = "EXAMPLES:\n\
        \x20 sprout init --name 'Ann Example' --email ann@example.org\n\
        \x20 sprout new go-widget --type pkgtest\n\
        \x20 sprout new tool --type cmd --env work --dry-run\n\
        \x20 sprout list",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new project.
    #[command(
        visible_alias = "n",
        about = "Generate a new project",
        after_help = "EXAMPLES:\n\
            \x20 sprout new demo                   # Default project type and environment\n\
            \x20 sprout new go-widget -t pkgtest   # package name becomes `widget`\n\
            \x20 sprout new demo -t cmd --pkg main --output ~/src"
    )]
    New(NewArgs),

    /// List environments and project types.
    #[command(
        visible_alias = "ls",
        about = "List environments and project types",
        after_help = "EXAMPLES:\n\
            \x20 sprout list\n\
            \x20 sprout list --format json"
    )]
    List(ListArgs),

    /// Write a first configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 sprout init                       # prompts for name and email\n\
            \x20 sprout init --name Ann --email ann@example.org --license newbsd"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sprout completions bash > ~/.local/share/bash-completion/completions/sprout\n\
            \x20 sprout completions zsh  > ~/.zfunc/_sprout\n\
            \x20 sprout completions fish > ~/.config/fish/completions/sprout.fish"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `sprout new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Name of the project to generate; becomes `Project.Name`.
    #[arg(value_name = "TARGET", help = "Project name")]
    pub name: String,

    /// Project type from the config.
    #[arg(
        short = 't',
        long = "type",
        value_name = "PROJECT",
        help = "Project type (default: Default.Project from the config)"
    )]
    pub project_type: Option<String>,

    /// Environment from the config.
    #[arg(
        short = 'e',
        long = "env",
        value_name = "ENV",
        help = "Environment (default: Default.Environment from the config)"
    )]
    pub environment: Option<String>,

    /// Package name override.
    #[arg(
        long = "pkg",
        value_name = "NAME",
        help = "Package name (default: derived from TARGET)"
    )]
    pub package: Option<String>,

    /// Directory the rendered paths are relative to.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Render everything but write nothing and run no hooks.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Never prompt to create a missing config.
    #[arg(short = 'y', long = "no-input", help = "Never prompt for input")]
    pub no_input: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `sprout list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One `kind name` pair per line.
    List,
    /// JSON object.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `sprout init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Author name; prompted for when missing.
    #[arg(long = "name", value_name = "NAME", help = "Your name")]
    pub name: Option<String>,

    /// Author email; prompted for when missing.
    #[arg(long = "email", value_name = "EMAIL", help = "Your email address")]
    pub email: Option<String>,

    /// Base import path, e.g. `github.com/ann`.
    #[arg(
        long = "import-path",
        value_name = "PATH",
        help = "Base import path for generated packages"
    )]
    pub import_path: Option<String>,

    /// License for generated files.
    #[arg(
        long = "license",
        value_enum,
        default_value = "none",
        help = "License for generated files"
    )]
    pub license: LicenseArg,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,

    /// Fail instead of prompting for missing values.
    #[arg(short = 'y', long = "no-input", help = "Never prompt for input")]
    pub no_input: bool,
}

/// Licenses selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LicenseArg {
    None,
    Newbsd,
}

impl From<LicenseArg> for License {
    fn from(arg: LicenseArg) -> Self {
        match arg {
            LicenseArg::None => License::None,
            LicenseArg::Newbsd => License::NewBsd,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sprout completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
