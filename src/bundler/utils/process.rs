//! External command execution.
//!
//! Every stage shells out to a macOS or Python tool. Commands run to
//! completion with captured output; a spawn failure or a non-zero exit is
//! turned into an error carrying the command line and stderr, which stops
//! the run.

use crate::bundler::error::{Error, Result};
use std::process::Output;
use tokio::process::Command;

/// Renders a command as a single line for logs and error messages.
pub fn describe(cmd: &Command) -> String {
    let std_cmd = cmd.as_std();
    std::iter::once(std_cmd.get_program())
        .chain(std_cmd.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs a command and fails unless it exits successfully.
pub async fn run(cmd: &mut Command) -> Result<Output> {
    let command = describe(cmd);
    log::debug!("Running: {}", command);

    let output = cmd
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: command.clone(),
            error,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        log::debug!("{}", stdout.trim_end());
    }

    if !output.status.success() {
        return Err(Error::CommandStatus {
            command,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}
