//! Template sources and precedence.
//!
//! A source is a flat set of named template bodies (the built-in set, or
//! one external directory). Sources are layered in precedence order: when
//! two sources define the same name, the higher one wins outright. Bodies
//! are never mixed across sources, and once the winning set is fixed every
//! template sees all the others under one namespace.

use indexmap::IndexMap;

use super::error::DomainError;

/// Named template bodies from one origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    origin: String,
    templates: IndexMap<String, String>,
}

impl TemplateSource {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            templates: IndexMap::new(),
        }
    }

    /// Where the templates came from, for messages.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Add a template. Names are unique within one source.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<(), DomainError> {
        let name = name.into();
        if self.templates.contains_key(&name) {
            return Err(DomainError::DuplicateTemplate {
                origin: self.origin.clone(),
                name,
            });
        }
        self.templates.insert(name, body.into());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Sources ordered from highest to lowest precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayeredSources {
    sources: Vec<TemplateSource>,
}

impl LayeredSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source below every source already present.
    pub fn push_fallback(&mut self, source: TemplateSource) {
        self.sources.push(source);
    }

    /// Add a source above every source already present.
    pub fn push_override(&mut self, source: TemplateSource) {
        self.sources.insert(0, source);
    }

    pub fn sources(&self) -> &[TemplateSource] {
        &self.sources
    }

    /// The source that wins for `name`, with its body.
    pub fn resolve(&self, name: &str) -> Option<(&TemplateSource, &str)> {
        self.sources
            .iter()
            .find_map(|source| source.get(name).map(|body| (source, body)))
    }

    /// Every visible template name with its winning body.
    ///
    /// Names keep the order of first appearance, highest source first.
    pub fn flatten(&self) -> IndexMap<&str, &str> {
        let mut winners = IndexMap::new();
        for source in &self.sources {
            for (name, body) in &source.templates {
                winners.entry(name.as_str()).or_insert(body.as_str());
            }
        }
        winners
    }
}
