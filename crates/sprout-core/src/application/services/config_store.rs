//! Config Store - reads and writes the JSON config document.
//!
//! Loading keeps three failure classes apart: the file cannot be read
//! (`ApplicationError::ConfigIo`), it is not a config document
//! (`DomainError::MalformedDocument`), or it is one but fails validation
//! (`DomainError::Invalid` and friends).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::domain::ConfigRoot;
use crate::error::SproutResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read, parse and validate the document.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> SproutResult<ConfigRoot> {
        let source = fs::read_to_string(&self.path)
            .map_err(|e| ApplicationError::config_io(&self.path, &e))?;

        let config = ConfigRoot::from_json(&source)?;
        config.validate()?;

        debug!(
            environments = config.environments.as_ref().map_or(0, |e| e.len()),
            projects = config.projects.as_ref().map_or(0, |p| p.len()),
            "config loaded"
        );
        Ok(config)
    }

    /// Write the document as pretty-printed JSON, creating parent
    /// directories as needed.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, config: &ConfigRoot) -> SproutResult<()> {
        let mut json = config.to_json_pretty()?;
        json.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ApplicationError::config_io(parent, &e))?;
        }
        fs::write(&self.path, json).map_err(|e| ApplicationError::config_io(&self.path, &e))?;

        debug!("config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, Environment, Project, UserInfo};
    use crate::error::SproutError;
    use tempfile::TempDir;

    fn sample() -> ConfigRoot {
        let mut envs = crate::domain::Environments::new();
        envs.insert(
            "default",
            Environment {
                user: Some(UserInfo::new("Ann", "ann@example.org")),
                ..Environment::default()
            },
        );
        let mut projects = crate::domain::Projects::new();
        projects.insert("empty", Project::default());

        ConfigRoot {
            environments: Some(envs),
            projects: Some(projects),
            ..ConfigRoot::default()
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("sprout.json"));

        let err = store.load().unwrap_err();
        assert!(err.is_config_missing());
        assert!(!store.exists());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("nested/sprout.json"));

        store.save(&sample()).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn saved_json_uses_pascal_case() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("sprout.json"));
        store.save(&sample()).unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains(r#""Environments""#));
        assert!(text.contains(r#""Email": "ann@example.org""#));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn syntax_errors_are_malformed_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sprout.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            SproutError::Domain(DomainError::MalformedDocument { .. })
        ));
        assert!(!err.is_config_missing());
    }

    #[test]
    fn invalid_documents_fail_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sprout.json");
        std::fs::write(&path, r#"{"Environments": {"e": {"Inherits": ["x"]}}, "Projects": {}}"#)
            .unwrap();

        let err = ConfigStore::new(&path).load().unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"$.Environments["e"].Inherits[0]: unknown environment: "x""#
        );
    }
}
