//! Field paths and the validation contract shared by config entities.

use std::fmt;

use super::error::DomainError;

/// Location of a value inside the config document.
///
/// Rendered as `$` for the root, `.Field` for struct fields, `["key"]` for
/// map entries and `[i]` for list items, e.g.
/// `$.Environments["work"].Inherits[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn root() -> Self {
        Self("$".to_owned())
    }

    pub fn field(&self, name: &str) -> Self {
        Self(format!("{}.{}", self.0, name))
    }

    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}[{:?}]", self.0, key))
    }

    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structural validation of one config value, reported at `path`.
pub trait Validate {
    fn validate(&self, path: &FieldPath) -> Result<(), DomainError>;
}

/// Entity names are map keys and command-line arguments; whitespace is never
/// allowed in them.
pub(crate) fn validate_name(path: &FieldPath, name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::invalid(path.clone(), "name must not be empty"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(DomainError::invalid(
            path.clone(),
            format!("name {name:?} must not contain whitespace"),
        ));
    }
    Ok(())
}
