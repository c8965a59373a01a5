//! Process runner that records commands instead of running them.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use sprout_core::{
    application::{ApplicationError, ports::ProcessRunner},
    error::SproutResult,
};

/// Records `(cwd, command)` pairs. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<(PathBuf, String)>>>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail, without recording, when asked to run `command`.
    pub fn failing_on(command: impl Into<String>) -> Self {
        Self {
            fail_on: Some(command.into()),
            ..Self::default()
        }
    }

    /// Every recorded call, including those made before a poisoning panic.
    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, command)| command).collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, cwd: &Path, command: &str) -> SproutResult<()> {
        if self.fail_on.as_deref() == Some(command) {
            return Err(ApplicationError::HookFailed {
                cwd: cwd.to_path_buf(),
                command: command.to_owned(),
                reason: "exit status: 1".into(),
            }
            .into());
        }
        let mut calls = self.calls.lock().map_err(|_| ApplicationError::HookFailed {
            cwd: cwd.to_path_buf(),
            command: command.to_owned(),
            reason: "recording runner lock poisoned".into(),
        })?;
        calls.push((cwd.to_path_buf(), command.to_owned()));
        Ok(())
    }
}
