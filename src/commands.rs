//! Pre and post cook command execution.
//! Recipes may list shell commands to run before and after generation.

use crate::error::{YucaError, YucaResult};
use dialoguer::Confirm;
use log::{info, warn};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// A single command or a list of commands, as written in a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ShellCommands {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl ShellCommands {
    pub fn as_slice(&self) -> &[String] {
        match self {
            ShellCommands::None => &[],
            ShellCommands::One(cmd) => std::slice::from_ref(cmd),
            ShellCommands::Many(cmds) => cmds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Asks whether recipe commands may run.
///
/// Without a terminal to ask on, commands are declined unless the check is
/// skipped.
///
/// # Arguments
/// * `skip_commands_check` - Whether to skip the confirmation prompt
/// * `interactive` - Whether stdin is a terminal
///
/// # Returns
/// * `YucaResult<bool>` - Whether the user approved command execution
pub fn confirm_commands_execution(skip_commands_check: bool, interactive: bool) -> YucaResult<bool> {
    if skip_commands_check {
        return Ok(true);
    }
    if !interactive {
        warn!("Recipe commands need confirmation but stdin is not a terminal");
        return Ok(false);
    }

    Confirm::new()
        .with_prompt(
            "WARNING: This recipe contains commands that will run on your system. Do you want to run them?",
        )
        .default(false)
        .interact()
        .map_err(|e| YucaError::CommandError(e.to_string()))
}

/// Runs each command through `sh -c` in `working_dir`.
///
/// A command exiting with a non-zero status is logged and the remaining
/// commands still run.
///
/// # Returns
/// * `YucaResult<usize>` - Number of commands that failed
///
/// # Errors
/// * `YucaError::IoError` if the shell cannot be spawned
pub fn run_commands<P: AsRef<Path>>(commands: &ShellCommands, working_dir: P) -> YucaResult<usize> {
    let working_dir = working_dir.as_ref();
    let mut failed = 0;
    for cmd in commands.as_slice() {
        info!("> {cmd}");
        let status = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .current_dir(working_dir)
            .status()?;

        if !status.success() {
            warn!("'{cmd}' failed with status: {status}");
            failed += 1;
        }
    }
    Ok(failed)
}
