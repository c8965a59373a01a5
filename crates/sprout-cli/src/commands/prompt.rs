//! Terminal prompts, available with the `interactive` feature.

use std::io::{self, IsTerminal as _};

use crate::error::{CliError, CliResult};

/// Whether prompting makes sense: the feature is built in and stdin is a
/// terminal.
pub fn available() -> bool {
    cfg!(feature = "interactive") && io::stdin().is_terminal()
}

#[cfg(feature = "interactive")]
mod imp {
    use std::io;

    use dialoguer::{Confirm, Input, theme::ColorfulTheme};

    use crate::error::CliError;

    fn failed(e: dialoguer::Error) -> CliError {
        CliError::IoError {
            message: "failed to read from the terminal".into(),
            source: io::Error::other(e),
        }
    }

    pub fn text(prompt: &str, allow_empty: bool) -> Result<String, CliError> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .map(|s| s.trim().to_owned())
            .map_err(failed)
    }

    pub fn confirm(prompt: &str) -> Result<bool, CliError> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(failed)
    }
}

#[cfg(not(feature = "interactive"))]
mod imp {
    use crate::error::CliError;

    fn missing() -> CliError {
        CliError::FeatureNotAvailable {
            feature: "interactive",
        }
    }

    pub fn text(_prompt: &str, _allow_empty: bool) -> Result<String, CliError> {
        Err(missing())
    }

    pub fn confirm(_prompt: &str) -> Result<bool, CliError> {
        Err(missing())
    }
}

/// Ask for a line of text. Fails if `allow_empty` is false and the answer
/// is blank.
pub fn text(prompt: &str, allow_empty: bool) -> CliResult<String> {
    let answer = imp::text(prompt, allow_empty)?;
    if !allow_empty && answer.is_empty() {
        return Err(CliError::InvalidInput {
            message: format!("{prompt} must not be empty"),
        });
    }
    Ok(answer)
}

pub fn confirm(prompt: &str) -> CliResult<bool> {
    imp::confirm(prompt)
}
