//! Local filesystem adapter using std::fs.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use sprout_core::{
    application::{ApplicationError, ports::FileWriter},
    error::{SproutError, SproutResult},
};

/// Production file writer. Files are opened with `create_new`, so an
/// existing file is never truncated.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileWriter;

impl LocalFileWriter {
    /// Create a new local file writer.
    pub fn new() -> Self {
        Self
    }
}

impl FileWriter for LocalFileWriter {
    fn create(&self, path: &Path) -> SproutResult<Box<dyn Write + Send>> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| map_io_error(parent, e, "create directory"))?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => ApplicationError::FileExists {
                    path: path.to_path_buf(),
                }
                .into(),
                _ => map_io_error(path, e, "create file"),
            })?;

        Ok(Box::new(BufWriter::new(file)))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SproutError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
