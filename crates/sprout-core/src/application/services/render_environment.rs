//! Render environment: one data context bound to a template set.
//!
//! Named templates are rendered directly. Ad-hoc text (an output path, a
//! hook directory, a hook command) is first registered in the set under a
//! fresh unique name, because the set only renders by name.

use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;
use uuid::Uuid;

use crate::application::ports::TemplateSet;
use crate::error::{Context, SproutResult};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderEnvironment {
    data: Value,
}

impl RenderEnvironment {
    pub fn new(data: &impl Serialize) -> SproutResult<Self> {
        let data = serde_json::to_value(data).context("serialising template data")?;
        Ok(Self { data })
    }

    pub fn from_value(data: Value) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Render `names` in order into `out`, stopping at the first failure.
    pub fn render<S: AsRef<str>>(
        &self,
        out: &mut dyn Write,
        templates: &dyn TemplateSet,
        names: &[S],
    ) -> SproutResult<()> {
        for name in names {
            templates.render(out, name.as_ref(), &self.data)?;
        }
        Ok(())
    }

    /// Render `text` as a template body registered under `prefix` + a
    /// random suffix.
    pub fn render_text(
        &self,
        out: &mut dyn Write,
        templates: &mut dyn TemplateSet,
        prefix: &str,
        text: &str,
    ) -> SproutResult<()> {
        let name = unique_name(&*templates, prefix);
        trace!(%name, "registering ad-hoc template");
        templates.add_source(&name, text)?;
        templates.render(out, &name, &self.data)
    }

    /// [`render_text`](Self::render_text) into a string.
    pub fn render_text_as_string(
        &self,
        templates: &mut dyn TemplateSet,
        prefix: &str,
        text: &str,
    ) -> SproutResult<String> {
        let mut buf = Vec::new();
        self.render_text(&mut buf, templates, prefix, text)?;
        String::from_utf8(buf).context("rendered text is not valid UTF-8")
    }
}

/// `prefix` followed by 22 URL-safe base64 characters (128 random bits).
fn unique_name(templates: &dyn TemplateSet, prefix: &str) -> String {
    loop {
        let suffix = URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes());
        let name = format!("{prefix}{suffix}");
        if !templates.contains(&name) {
            return name;
        }
    }
}
