//! Config document discovery.
//!
//! The CLI owns *where* the document lives; reading, validating and writing
//! it is `sprout_core::application::ConfigStore`'s job.
//!
//! # Resolution order (highest priority first)
//!
//! 1. `--config FILE`
//! 2. `SPROUT_CONFIG` (read by clap into the same flag, `.env` included)
//! 3. `<platform config dir>/sprout/sprout.json`

use std::path::{Path, PathBuf};

use sprout_core::application::ConfigStore;

/// File name of the config document.
pub const CONFIG_FILE: &str = "sprout.json";

/// Store for the config document selected by `flag`.
pub fn store(flag: Option<&Path>) -> ConfigStore {
    ConfigStore::new(config_path(flag))
}

pub fn config_path(flag: Option<&Path>) -> PathBuf {
    flag.map(Path::to_path_buf).unwrap_or_else(default_config_path)
}

/// Path to the default configuration file.
///
/// Uses `directories::ProjectDirs` for cross-platform correctness,
/// falling back to `.sprout.json` in the current directory.
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "sprout")
        .map(|d| d.config_dir().join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(".sprout.json"))
}
