// src/exec/command.rs

//! Synchronous command execution.

use std::fs::OpenOptions;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::errors::{HostkitError, Result};
use crate::exec::timeout::run_with_timeout;

/// Run `program` with `args`, wait for it and return its trimmed stdout.
///
/// Leading/trailing spaces and newlines are stripped from the output. A
/// non-zero exit is reported as [`HostkitError::CommandFailed`], which still
/// carries whatever the process printed.
///
/// There is no timeout here; see [`sh_with_timeout`].
pub fn sh<S: AsRef<str>>(program: &str, args: &[S]) -> Result<String> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    info!(program = %program, args = ?args, "running command");

    let output = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| {
            error!(program = %program, error = %source, "failed to launch command");
            HostkitError::Spawn {
                program: program.to_string(),
                source,
            }
        })?;

    let stdout = trim_output(&output.stdout);
    debug!(
        program = %program,
        exit_code = output.status.code().unwrap_or(-1),
        stdout = %stdout,
        "command exited"
    );

    check_status(program, output, stdout)
}

/// [`sh`] bounded by `deadline`.
///
/// On timeout the child process is left running; only the wait is abandoned.
pub async fn sh_with_timeout<S: AsRef<str>>(
    deadline: Duration,
    program: &str,
    args: &[S],
) -> Result<String> {
    debug!(timeout = ?deadline, program = %program, "sh with timeout");

    let program = program.to_string();
    let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();

    run_with_timeout(deadline, move || sh(&program, args.as_slice())).await
}

/// Write `content` into an existing file by running `echo` with its stdout
/// redirected there.
///
/// The file is opened write-only and never created, which is what poking
/// sysfs/procfs knobs needs.
pub fn echo_to_file(content: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!(content = %content, path = ?path, "echo into file");

    let target = OpenOptions::new().write(true).open(path).map_err(|e| {
        error!(path = ?path, error = %e, "cannot open echo target");
        HostkitError::IoError(e)
    })?;

    let output = Command::new("echo")
        .arg(content)
        .stdin(Stdio::null())
        .stdout(Stdio::from(target))
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| HostkitError::Spawn {
            program: "echo".to_string(),
            source,
        })?;

    check_status("echo", output, String::new()).map(|_| ())
}

fn check_status(program: &str, output: Output, stdout: String) -> Result<String> {
    if output.status.success() {
        return Ok(stdout);
    }

    let code = output.status.code().unwrap_or(-1);
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    error!(program = %program, exit_code = code, stderr = %stderr, "command failed");

    Err(HostkitError::CommandFailed {
        program: program.to_string(),
        code,
        stdout,
        stderr,
    })
}

fn trim_output(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_matches(|c| c == ' ' || c == '\n')
        .to_string()
}
