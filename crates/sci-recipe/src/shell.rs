// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command execution for the `run` step primitive, grounded on
//! `sci.build.Build.run` (spawn under bash, inherit stdout/stderr, stdin
//! from `/dev/null`) and on the teacher's `execute_shell`'s `set -euo
//! pipefail` wrapping, which makes a failure anywhere in a pipeline or
//! compound command surface as a non-zero exit instead of being masked.

use crate::error::RecipeError;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

pub async fn run(cwd: &Path, cmd: &str) -> Result<(), RecipeError> {
    let wrapped = format!("set -euo pipefail\n{cmd}");
    let status = Command::new("bash")
        .arg("-c")
        .arg(&wrapped)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;

    match status.code() {
        Some(0) => Ok(()),
        Some(code) => Err(RecipeError::CommandFailed { code, command: cmd.to_string() }),
        None => Err(RecipeError::CommandFailed { code: -1, command: cmd.to_string() }),
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
