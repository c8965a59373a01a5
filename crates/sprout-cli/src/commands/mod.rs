//! Command handlers, one module per subcommand.

pub mod completions;
pub mod init;
pub mod list;
pub mod new;

mod prompt;

use sprout_core::{application::ConfigStore, domain::ConfigRoot};

use crate::error::{CliError, CliResult};

/// Load and validate the config, reporting a missing file as
/// [`CliError::ConfigMissing`].
pub(crate) fn load_config(store: &ConfigStore) -> CliResult<ConfigRoot> {
    store.load().map_err(|e| {
        if e.is_config_missing() {
            CliError::ConfigMissing {
                path: store.path().to_path_buf(),
            }
        } else {
            e.into()
        }
    })
}
