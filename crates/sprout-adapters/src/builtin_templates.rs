//! Templates and project types that ship with sprout.
//!
//! The template bodies live in `crates/sprout-adapters/templates/` and are
//! embedded at compile time, so the binary works without any files on disk.
//! External template roots listed in the config shadow these by name.
//!
//! # Project types in the default config
//!
//! | Name      | Inherits | Adds                                  |
//! |-----------|----------|---------------------------------------|
//! | `base`    |          | `README.md`, `LICENSE`, `.gitignore`  |
//! | `cmd`     | `base`   | `main.go`                             |
//! | `pkg`     | `base`   | `<package>.go`                        |
//! | `cmdtest` | `cmd`    | `main_test.go`                        |
//! | `pkgtest` | `pkg`    | `<package>_test.go`                   |
//!
//! `LICENSE` has no templates of its own; its whole body comes from the
//! environment's license, so it is empty when the license is `none`.

use tracing::{debug, instrument};

use sprout_core::{
    domain::{
        ConfigRoot, Defaults, Environment, Environments, FileSpec, License, Project, Projects,
        TemplateSource, UserInfo,
    },
    error::SproutResult,
};

/// Origin label of the embedded source.
pub const BUILTIN_ORIGIN: &str = "builtin";

/// Name of the environment written by [`default_config`].
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// Project type used when none is given on the command line.
pub const DEFAULT_PROJECT: &str = "cmdtest";

const TEMPLATES: &[(&str, &str)] = &[
    ("go.cmd.t", include_str!("../templates/go.cmd.t")),
    ("go.pkg.t", include_str!("../templates/go.pkg.t")),
    ("test.t", include_str!("../templates/test.t")),
    ("test.cmd.t", include_str!("../templates/test.cmd.t")),
    ("README.t", include_str!("../templates/README.t")),
    ("Makefile.t", include_str!("../templates/Makefile.t")),
    ("other.gitignore.t", include_str!("../templates/other.gitignore.t")),
    ("other.hgignore.t", include_str!("../templates/other.hgignore.t")),
    ("license.newbsd.t", include_str!("../templates/license.newbsd.t")),
    (
        "license.newbsd.gohead.t",
        include_str!("../templates/license.newbsd.gohead.t"),
    ),
    (
        "license.newbsd.readme.t",
        include_str!("../templates/license.newbsd.readme.t"),
    ),
];

/// The embedded template source.
#[instrument]
pub fn builtin_source() -> SproutResult<TemplateSource> {
    let mut source = TemplateSource::new(BUILTIN_ORIGIN);
    for (name, body) in TEMPLATES {
        source.insert(*name, *body)?;
    }
    debug!(count = source.len(), "built-in templates loaded");
    Ok(source)
}

/// A complete config for a first run: one environment named
/// [`DEFAULT_ENVIRONMENT`] and the built-in project types.
pub fn default_config(user: UserInfo, base_import_path: &str, license: License) -> ConfigRoot {
    let mut environments = Environments::new();
    environments.insert(
        DEFAULT_ENVIRONMENT,
        Environment {
            base_import_path: base_import_path.trim().to_owned(),
            user: Some(user),
            license,
            ..Environment::default()
        },
    );

    ConfigRoot {
        default: Defaults {
            environment: Some(DEFAULT_ENVIRONMENT.to_owned()),
            project: Some(DEFAULT_PROJECT.to_owned()),
        },
        environments: Some(environments),
        external_templates: Vec::new(),
        projects: Some(default_projects()),
    }
}

fn project(inherits: &[&str], files: &[(&str, FileSpec)]) -> Project {
    Project {
        inherits: inherits.iter().map(|s| (*s).to_owned()).collect(),
        hooks: None,
        files: files
            .iter()
            .map(|(entry, spec)| ((*entry).to_owned(), spec.clone()))
            .collect(),
    }
}

fn default_projects() -> Projects {
    let mut projects = Projects::new();
    projects.insert(
        "base",
        project(
            &[],
            &[
                (
                    "readme",
                    FileSpec::new("{{ Project.Name }}/README.md", "readme", ["README.t"]),
                ),
                (
                    "license",
                    FileSpec::new("{{ Project.Name }}/LICENSE", "license", [] as [&str; 0]),
                ),
                (
                    "gitignore",
                    FileSpec::new("{{ Project.Name }}/.gitignore", "other", ["other.gitignore.t"]),
                ),
            ],
        ),
    );
    projects.insert(
        "cmd",
        project(
            &["base"],
            &[(
                "main",
                FileSpec::new("{{ Project.Name }}/main.go", "go", ["go.cmd.t"]),
            )],
        ),
    );
    projects.insert(
        "pkg",
        project(
            &["base"],
            &[(
                "pkg",
                FileSpec::new("{{ Project.Name }}/{{ Package }}.go", "go", ["go.pkg.t"]),
            )],
        ),
    );
    projects.insert(
        "cmdtest",
        project(
            &["cmd"],
            &[(
                "test",
                FileSpec::new("{{ Project.Name }}/main_test.go", "test", ["test.cmd.t"]),
            )],
        ),
    );
    projects.insert(
        "pkgtest",
        project(
            &["pkg"],
            &[(
                "test",
                FileSpec::new("{{ Project.Name }}/{{ Package }}_test.go", "test", ["test.t"]),
            )],
        ),
    );
    projects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConfigRoot {
        default_config(
            UserInfo::new("Ann", "ann@example.org"),
            "github.com/ann",
            License::NewBsd,
        )
    }

    #[test]
    fn every_template_is_embedded_once() {
        let source = builtin_source().unwrap();
        assert_eq!(source.len(), TEMPLATES.len());
        assert!(source.get("license.newbsd.gohead.t").unwrap().contains("BSD-style"));
    }

    #[test]
    fn default_config_validates() {
        config().validate().unwrap();
    }

    #[test]
    fn default_config_resolves_each_project() {
        let config = config();
        let cmdtest = config.project("cmdtest").unwrap();
        let entries: Vec<_> = cmdtest.files.keys().map(String::as_str).collect();
        assert_eq!(entries, ["readme", "license", "gitignore", "main", "test"]);

        let pkg = config.project("pkg").unwrap();
        assert!(!pkg.files.contains_key("main"));
    }

    #[test]
    fn default_config_survives_a_json_round_trip() {
        let config = config();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(ConfigRoot::from_json(&json).unwrap(), config);
    }

    #[test]
    fn every_referenced_template_is_built_in() {
        let source = builtin_source().unwrap();
        let config = config();
        for name in ["cmdtest", "pkgtest"] {
            for spec in config.project(name).unwrap().files.values() {
                for template in spec.templates() {
                    assert!(source.get(template).is_some(), "{template} missing");
                }
            }
        }
    }
}
