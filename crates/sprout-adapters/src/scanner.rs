//! Filesystem-based template discovery.
//!
//! Walks an external template root recursively and lists every regular
//! file. Which files count as templates, and what they are called, is
//! decided by `TemplateService` in the core.
//!
//! # Directory layout expected
//!
//! ```text
//! ~/.config/sprout/templates/
//! ├── go.cmd.t                 ← overrides the built-in go.cmd.t
//! ├── license/
//! │   └── license.newbsd.t     ← nested directories are fine
//! └── notes.md                 ← not a template, ignored
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use sprout_core::{
    application::{ApplicationError, ports::TemplateScanner},
    error::SproutResult,
};

// ── Scanner ───────────────────────────────────────────────────────────────────

/// Lists template files with `walkdir`, following symlinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateScanner for DirectoryScanner {
    #[instrument(skip(self), fields(root = %root.display()))]
    fn list_files(&self, root: &Path) -> SproutResult<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(ApplicationError::TemplateSourceIo {
                path: root.to_path_buf(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::TemplateSourceIo {
                path: e.path().unwrap_or(root).to_path_buf(),
                reason: e.to_string(),
            })?;

            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        debug!(count = files.len(), "files discovered");
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> SproutResult<String> {
        fs::read_to_string(path).map_err(|e| {
            ApplicationError::TemplateSourceIo {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Build a temp directory tree from `(relative path, content)` pairs.
    fn make_template_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn lists_nested_files_sorted() {
        let dir = make_template_dir(&[
            ("go.cmd.t", "a"),
            ("license/license.newbsd.t", "b"),
            ("README.t", "c"),
        ]);

        let files = DirectoryScanner::new().list_files(dir.path()).unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(relative.len(), 3);
        assert!(relative.contains(&"license/license.newbsd.t".to_owned()));
    }

    #[test]
    fn directories_are_not_listed() {
        let dir = make_template_dir(&[("sub/x.t", "x")]);
        fs::create_dir_all(dir.path().join("empty")).unwrap();

        let files = DirectoryScanner::new().list_files(dir.path()).unwrap();
        assert_eq!(files, [dir.path().join("sub/x.t")]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = DirectoryScanner::new()
            .list_files(&dir.path().join("nope"))
            .unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn reads_bodies() {
        let dir = make_template_dir(&[("a.t", "{{ Project.Name }}")]);
        let body = DirectoryScanner::new()
            .read_to_string(&dir.path().join("a.t"))
            .unwrap();
        assert_eq!(body, "{{ Project.Name }}");
    }
}
