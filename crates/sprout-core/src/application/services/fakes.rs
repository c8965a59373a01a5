//! In-process port doubles for service tests.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use serde_json::Value;

use crate::application::ApplicationError;
use crate::application::ports::{FileWriter, ProcessRunner, TemplateSet};
use crate::error::SproutResult;

/// Templates whose only syntax is `{{ Dotted.Path }}` substitution.
#[derive(Debug, Default)]
pub struct FakeTemplates {
    templates: IndexMap<String, String>,
}

impl FakeTemplates {
    pub fn with(templates: &[(&str, &str)]) -> Self {
        Self {
            templates: templates
                .iter()
                .map(|(name, body)| ((*name).to_owned(), (*body).to_owned()))
                .collect(),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }
}

fn lookup<'v>(data: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(data, |value, key| value.get(key))
}

impl TemplateSet for FakeTemplates {
    fn render(&self, out: &mut dyn Write, name: &str, data: &Value) -> SproutResult<()> {
        let body = self
            .templates
            .get(name)
            .ok_or_else(|| ApplicationError::TemplateNotFound { name: name.into() })?;

        let mut rest = body.as_str();
        let mut rendered = String::new();
        while let Some(start) = rest.find("{{") {
            rendered.push_str(&rest[..start]);
            let end = rest[start..].find("}}").ok_or_else(|| ApplicationError::RenderingFailed {
                name: name.into(),
                reason: "unclosed tag".into(),
            })?;
            let key = rest[start + 2..start + end].trim();
            match lookup(data, key) {
                Some(Value::String(s)) => rendered.push_str(s),
                Some(other) => rendered.push_str(&other.to_string()),
                None => {
                    return Err(ApplicationError::RenderingFailed {
                        name: name.into(),
                        reason: format!("undefined: {key}"),
                    }
                    .into());
                }
            }
            rest = &rest[start + end + 2..];
        }
        rendered.push_str(rest);

        out.write_all(rendered.as_bytes())
            .map_err(|e| ApplicationError::RenderingFailed {
                name: name.into(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn add_source(&mut self, name: &str, body: &str) -> SproutResult<()> {
        self.templates.insert(name.to_owned(), body.to_owned());
        Ok(())
    }

    fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

/// Shared log of everything the doubles observed, in order.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeWriter {
    pub files: Arc<Mutex<IndexMap<PathBuf, Vec<u8>>>>,
    pub existing: Vec<PathBuf>,
    pub journal: Journal,
}

struct FakeFile {
    path: PathBuf,
    files: Arc<Mutex<IndexMap<PathBuf, Vec<u8>>>>,
}

impl Write for FakeFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut files = self.files.lock().unwrap();
        files.entry(self.path.clone()).or_default().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FileWriter for FakeWriter {
    fn create(&self, path: &Path) -> SproutResult<Box<dyn Write + Send>> {
        if self.exists(path) {
            return Err(ApplicationError::FileExists { path: path.into() }.into());
        }
        self.journal.push(format!("write {}", path.display()));
        self.files.lock().unwrap().insert(path.to_path_buf(), Vec::new());
        Ok(Box::new(FakeFile {
            path: path.to_path_buf(),
            files: Arc::clone(&self.files),
        }))
    }

    fn exists(&self, path: &Path) -> bool {
        self.existing.iter().any(|p| p == path) || self.files.lock().unwrap().contains_key(path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    pub fail_on: Option<String>,
    pub journal: Journal,
}

impl ProcessRunner for FakeRunner {
    fn run(&self, cwd: &Path, command: &str) -> SproutResult<()> {
        self.journal.push(format!("run {} in {}", command, cwd.display()));
        if self.fail_on.as_deref() == Some(command) {
            return Err(ApplicationError::HookFailed {
                cwd: cwd.into(),
                command: command.into(),
                reason: "exit status: 1".into(),
            }
            .into());
        }
        Ok(())
    }
}
