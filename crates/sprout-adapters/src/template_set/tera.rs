//! Tera-backed template set.
//!
//! All winning template bodies from the layered sources share one Tera
//! namespace, so `{% include "license.newbsd.t" %}` and
//! `{% extends "go.base.t" %}` resolve across sources. Registered template
//! functions are callable from every template.

use std::error::Error as StdError;
use std::io::Write;

use serde_json::Value;
use tera::{Context, Tera};
use tracing::{debug, instrument};

use sprout_core::{
    application::{ApplicationError, ports::TemplateSet},
    domain::{FunctionArgs, FunctionRegistry, LayeredSources},
    error::SproutResult,
};

pub struct TeraTemplateSet {
    tera: Tera,
}

impl TeraTemplateSet {
    /// Parse every winning template of `sources` and register `functions`.
    #[instrument(skip_all, fields(sources = sources.sources().len()))]
    pub fn new(sources: &LayeredSources, functions: &FunctionRegistry) -> SproutResult<Self> {
        let mut tera = Tera::default();
        // Generated files are source code, not HTML.
        tera.autoescape_on(vec![]);

        for (name, function) in functions.iter() {
            let function = function.clone();
            tera.register_function(name, move |args: &FunctionArgs| {
                function(args).map_err(tera::Error::msg)
            });
        }

        let bodies = sources.flatten();
        tera.add_raw_templates(bodies.iter().map(|(name, body)| (*name, *body)))
            .map_err(|e| ApplicationError::TemplateInvalid {
                name: "template set".into(),
                reason: describe(&e),
            })?;

        debug!(
            templates = bodies.len(),
            functions = functions.len(),
            "template set ready"
        );
        Ok(Self { tera })
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}

impl TemplateSet for TeraTemplateSet {
    fn render(&self, out: &mut dyn Write, name: &str, data: &Value) -> SproutResult<()> {
        if !self.contains(name) {
            return Err(ApplicationError::TemplateNotFound { name: name.into() }.into());
        }

        let failed = |e: tera::Error| ApplicationError::RenderingFailed {
            name: name.into(),
            reason: describe(&e),
        };
        let context = Context::from_value(data.clone()).map_err(failed)?;
        self.tera.render_to(name, &context, out).map_err(failed)?;
        Ok(())
    }

    fn add_source(&mut self, name: &str, body: &str) -> SproutResult<()> {
        self.tera
            .add_raw_template(name, body)
            .map_err(|e| ApplicationError::TemplateInvalid {
                name: name.into(),
                reason: describe(&e),
            })?;
        Ok(())
    }

    fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

impl std::fmt::Debug for TeraTemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeraTemplateSet")
            .field("templates", &self.names())
            .finish()
    }
}

/// Tera nests the useful message in the error chain; join all of it.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
