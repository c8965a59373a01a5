//! Registry of functions callable from templates.
//!
//! Functions are grouped into extensions; every function is published as
//! `<namespace>_<name>`, so `time` + `year` becomes `time_year`. The
//! registry is a plain value built by the caller and handed to whichever
//! template set needs it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::error::DomainError;

/// Keyword arguments as passed by the template engine.
pub type FunctionArgs = HashMap<String, Value>;

/// A template function. Errors are plain messages; the engine adds the
/// template location.
pub type TemplateFn = Arc<dyn Fn(&FunctionArgs) -> Result<Value, String> + Send + Sync>;

/// A named group of template functions.
pub trait Extension {
    fn namespace(&self) -> &'static str;

    /// Unqualified function names paired with their implementations.
    fn functions(&self) -> Vec<(&'static str, TemplateFn)>;
}

#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: IndexMap<String, TemplateFn>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every function of `extension` under its namespace.
    ///
    /// Nothing is added if any qualified name is already taken.
    pub fn register(&mut self, extension: &dyn Extension) -> Result<(), DomainError> {
        let namespace = extension.namespace();
        let functions: Vec<_> = extension
            .functions()
            .into_iter()
            .map(|(name, f)| (format!("{namespace}_{name}"), f))
            .collect();

        for (name, _) in &functions {
            if self.functions.contains_key(name) {
                return Err(DomainError::DuplicateFunction { name: name.clone() });
            }
        }

        tracing::debug!(namespace, count = functions.len(), "registered template functions");
        self.functions.extend(functions);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TemplateFn> {
        self.functions.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateFn)> {
        self.functions.iter().map(|(name, f)| (name.as_str(), f))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}
