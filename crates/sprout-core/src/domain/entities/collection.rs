//! Named collections of inheriting entities.
//!
//! Environments and projects share the same rules: names are unique map
//! keys, `Inherits` must name entries of the same collection, inheritance
//! must be acyclic, and resolving a name folds the entity and its ancestors
//! into a fresh value in merge order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::error::DomainError;
use crate::domain::graph::InheritanceGraph;
use crate::domain::validation::{FieldPath, Validate, validate_name};

/// An entity that can inherit from others of its own kind.
pub trait Inheriting: Validate + Clone + Default {
    /// Lowercase noun used in messages ("environment", "project").
    const KIND: &'static str;

    /// Key of the config document field holding the collection.
    const FIELD: &'static str;

    fn inherits(&self) -> &[String];

    /// Overlay `other` onto `self`. Never copies `inherits`.
    fn merge(&mut self, other: &Self);
}

/// Insertion-ordered map of name -> entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    entries: IndexMap<String, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T> FromIterator<(String, T)> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<T: Inheriting> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, entity: T) -> Option<T> {
        self.entries.insert(name.into(), entity)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &T)> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn inheritance_graph(&self) -> InheritanceGraph<String> {
        let mut graph = InheritanceGraph::new();
        for (name, entity) in &self.entries {
            graph.add_node(name.clone(), entity.inherits().iter().cloned());
        }
        graph
    }

    /// Check names, each entity, every `Inherits` reference, then cycles.
    ///
    /// `path` locates the collection itself, e.g. `$.Environments`.
    pub fn validate(&self, path: &FieldPath) -> Result<(), DomainError> {
        for (name, entity) in &self.entries {
            let entry_path = path.key(name);
            validate_name(&entry_path, name)?;
            entity.validate(&entry_path)?;

            for (i, parent) in entity.inherits().iter().enumerate() {
                if !self.entries.contains_key(parent) {
                    return Err(DomainError::invalid(
                        entry_path.field("Inherits").index(i),
                        format!("unknown {}: {parent:?}", T::KIND),
                    ));
                }
            }
        }

        let graph = self.inheritance_graph();
        for name in self.entries.keys() {
            let traversal = graph.traverse(name);
            if let Some((from, to)) = traversal.back_edges.into_iter().next() {
                return Err(DomainError::InheritanceCycle {
                    path: path.key(name),
                    from,
                    to,
                });
            }
        }
        Ok(())
    }

    /// Fold `name` and all of its ancestors into a new entity.
    ///
    /// The stored entities are left untouched and the result has no
    /// `inherits` of its own.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub fn resolve(&self, name: &str) -> Result<T, DomainError> {
        if !self.entries.contains_key(name) {
            return Err(DomainError::UnknownEntity {
                kind: T::KIND,
                name: name.to_owned(),
            });
        }

        let traversal = self.inheritance_graph().traverse(&name.to_owned());
        if let Some((from, to)) = traversal.back_edges.into_iter().next() {
            return Err(DomainError::InheritanceCycle {
                path: FieldPath::root().field(T::FIELD).key(name),
                from,
                to,
            });
        }

        debug!(order = ?traversal.finished, "merge order");

        let mut merged = T::default();
        for ancestor in &traversal.finished {
            let entity = self.entries.get(ancestor).ok_or_else(|| DomainError::UnknownEntity {
                kind: T::KIND,
                name: ancestor.clone(),
            })?;
            merged.merge(entity);
        }
        Ok(merged)
    }
}
