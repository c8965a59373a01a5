//! Runs hook commands through `bash -c`.

use std::path::Path;
use std::process::Command;

use tracing::{debug, instrument};

use sprout_core::{
    application::{ApplicationError, ports::ProcessRunner},
    error::SproutResult,
};

/// Runs each command synchronously with the caller's stdin, stdout and
/// stderr.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::with_shell("bash")
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner for ShellRunner {
    #[instrument(skip(self), fields(cwd = %cwd.display()))]
    fn run(&self, cwd: &Path, command: &str) -> SproutResult<()> {
        let failed = |reason: String| ApplicationError::HookFailed {
            cwd: cwd.to_path_buf(),
            command: command.to_owned(),
            reason,
        };

        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .status()
            .map_err(|e| failed(format!("cannot start {}: {e}", self.shell)))?;

        debug!(%status, "hook finished");
        if !status.success() {
            return Err(failed(status.to_string()).into());
        }
        Ok(())
    }
}
