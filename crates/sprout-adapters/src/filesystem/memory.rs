//! In-memory file writer for testing and dry runs.

use std::{
    collections::BTreeMap,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use sprout_core::{
    application::{ApplicationError, ports::FileWriter},
    error::SproutResult,
};

/// In-memory file writer. Clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileWriter {
    inner: Arc<RwLock<BTreeMap<PathBuf, Vec<u8>>>>,
}

impl MemoryFileWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content as text (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Stream that appends into the shared map.
struct MemoryFile {
    path: PathBuf,
    inner: Arc<RwLock<BTreeMap<PathBuf, Vec<u8>>>>,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| io::Error::other("memory filesystem lock poisoned"))?;
        inner
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FileWriter for MemoryFileWriter {
    fn create(&self, path: &Path) -> SproutResult<Box<dyn Write + Send>> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "memory filesystem lock poisoned".into(),
            })?;

        if inner.contains_key(path) {
            return Err(ApplicationError::FileExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        inner.insert(path.to_path_buf(), Vec::new());

        Ok(Box::new(MemoryFile {
            path: path.to_path_buf(),
            inner: Arc::clone(&self.inner),
        }))
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains_key(path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_visible_through_clones() {
        let writer = MemoryFileWriter::new();
        let view = writer.clone();

        let mut out = writer.create(Path::new("demo/main.go")).unwrap();
        out.write_all(b"package ").unwrap();
        out.write_all(b"main").unwrap();

        assert_eq!(view.read_file(Path::new("demo/main.go")).unwrap(), "package main");
        assert_eq!(view.list_files(), [PathBuf::from("demo/main.go")]);
    }

    #[test]
    fn second_create_fails() {
        let writer = MemoryFileWriter::new();
        writer.create(Path::new("a")).unwrap();
        assert!(writer.exists(Path::new("a")));
        assert!(writer.create(Path::new("a")).is_err());
    }
}
