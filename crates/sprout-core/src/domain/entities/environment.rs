//! Environment: who is generating, under which license and import path.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::collection::Inheriting;
use crate::domain::error::DomainError;
use crate::domain::validation::{FieldPath, Validate};
use crate::domain::value_objects::{License, VcsType};

/// Named set of user-level settings. Layers combine through `Inherits`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Environment {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inherits: Vec<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub base_import_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,

    #[serde(skip_serializing_if = "License::is_unset")]
    pub license: License,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_control: Option<VersionControl>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserInfo {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
}

impl UserInfo {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    fn merge(&mut self, other: &Self) {
        overlay(&mut self.name, &other.name);
        overlay(&mut self.email, &other.email);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VersionControl {
    #[serde(skip_serializing_if = "VcsType::is_unset")]
    pub r#type: VcsType,

    /// Free-form remote settings, merged key by key.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub remote: IndexMap<String, serde_json::Value>,
}

impl VersionControl {
    fn merge(&mut self, other: &Self) {
        if !other.r#type.is_unset() {
            self.r#type = other.r#type.clone();
        }
        for (key, value) in &other.remote {
            self.remote.insert(key.clone(), value.clone());
        }
    }
}

impl Environment {
    /// Post-merge check: a usable environment must say who the user is.
    pub fn validate_resolved(&self, path: &FieldPath) -> Result<(), DomainError> {
        if self.user.is_none() {
            return Err(DomainError::invalid(
                path.field("User"),
                "missing after inheritance is applied",
            ));
        }
        Ok(())
    }
}

impl Validate for Environment {
    fn validate(&self, path: &FieldPath) -> Result<(), DomainError> {
        if let License::Unknown(name) = &self.license {
            return Err(DomainError::invalid(
                path.field("License"),
                format!(
                    "unknown license {name:?} (expected one of: {})",
                    License::KNOWN.join(", ")
                ),
            ));
        }
        if let Some(VersionControl {
            r#type: VcsType::Unknown(name),
            ..
        }) = &self.version_control
        {
            return Err(DomainError::invalid(
                path.field("VersionControl").field("Type"),
                format!(
                    "unknown version control type {name:?} (expected one of: {})",
                    VcsType::KNOWN.join(", ")
                ),
            ));
        }
        Ok(())
    }
}

impl Inheriting for Environment {
    const KIND: &'static str = "environment";
    const FIELD: &'static str = "Environments";

    fn inherits(&self) -> &[String] {
        &self.inherits
    }

    fn merge(&mut self, other: &Self) {
        overlay(&mut self.base_import_path, &other.base_import_path);

        if let Some(user) = &other.user {
            self.user.get_or_insert_with(UserInfo::default).merge(user);
        }

        if !other.license.is_unset() {
            self.license = other.license.clone();
        }

        if let Some(vcs) = &other.version_control {
            self.version_control
                .get_or_insert_with(VersionControl::default)
                .merge(vcs);
        }
    }
}

/// Scalar rule: a non-empty value replaces, an empty one leaves self alone.
pub(crate) fn overlay(target: &mut String, value: &str) {
    if !value.is_empty() {
        value.clone_into(target);
    }
}
