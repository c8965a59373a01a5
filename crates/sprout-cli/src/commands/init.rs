//! `sprout init`: write a first configuration file.
//!
//! Also hosts [`bootstrap`], which `sprout new` calls when no config exists.

use tracing::info;

use sprout_adapters::{
    builtin_templates::{DEFAULT_ENVIRONMENT, DEFAULT_PROJECT},
    default_config,
};
use sprout_core::{
    application::ConfigStore,
    domain::{ConfigRoot, License, UserInfo},
};

use super::prompt;
use crate::{
    cli::{GlobalArgs, InitArgs},
    config,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// The few facts a first config needs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Identity {
    name: String,
    email: String,
    import_path: String,
}

impl Identity {
    /// Take each field from `given` or, when allowed, ask for it.
    fn collect(
        name: Option<&str>,
        email: Option<&str>,
        import_path: Option<&str>,
        interactive: bool,
    ) -> CliResult<Self> {
        let field = |given: Option<&str>, flag: &str, question: &str, optional: bool| match given {
            Some(value) => Ok(value.trim().to_owned()),
            None if interactive => prompt::text(question, optional),
            None if optional => Ok(String::new()),
            None => Err(CliError::InvalidInput {
                message: format!("{flag} is required when not running interactively"),
            }),
        };

        let identity = Self {
            name: field(name, "--name", "Your name", false)?,
            email: field(email, "--email", "Your email", false)?,
            import_path: field(import_path, "--import-path", "Base import path (optional)", true)?,
        };

        if identity.name.is_empty() {
            return Err(CliError::InvalidInput {
                message: "name must not be empty".into(),
            });
        }
        Ok(identity)
    }

    fn into_config(self, license: License) -> ConfigRoot {
        default_config(
            UserInfo::new(self.name, self.email),
            &self.import_path,
            license,
        )
    }
}

/// Create a default Sprout configuration file.
pub fn execute(args: InitArgs, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let store = config::store(global.config.as_deref());

    if store.path().exists() && !args.force {
        return Err(CliError::ConfigExists {
            path: store.path().to_path_buf(),
        });
    }

    let identity = Identity::collect(
        args.name.as_deref(),
        args.email.as_deref(),
        args.import_path.as_deref(),
        !args.no_input && prompt::available(),
    )?;

    let config = identity.into_config(args.license.into());
    store.save(&config)?;
    info!(path = %store.path().display(), "config written");

    report(&store, output)
}

/// Offer to create the missing config behind `store`, then return it.
///
/// Without a terminal to prompt on, this fails with
/// [`CliError::ConfigMissing`].
pub fn bootstrap(store: &ConfigStore, output: &OutputManager) -> CliResult<ConfigRoot> {
    let missing = || CliError::ConfigMissing {
        path: store.path().to_path_buf(),
    };
    if !prompt::available() {
        return Err(missing());
    }

    output.warning(&format!(
        "No configuration found at {}",
        store.path().display()
    ))?;
    if !prompt::confirm("Create one now?")? {
        return Err(CliError::Cancelled);
    }

    let config = Identity::collect(None, None, None, true)?.into_config(License::None);
    store.save(&config)?;
    report(store, output)?;
    Ok(config)
}

fn report(store: &ConfigStore, output: &OutputManager) -> CliResult<()> {
    output.success(&format!(
        "Configuration created at {}",
        store.path().display()
    ))?;
    output.detail(&format!(
        "Environment `{DEFAULT_ENVIRONMENT}`; default project type `{DEFAULT_PROJECT}`"
    ))?;
    output.detail("Edit the file to add environments, project types and ExternalTemplates")?;
    Ok(())
}
