// src/process/signal.rs

use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, error, info, warn};

use super::Process;
use crate::config::model::DEFAULT_KILL_PROGRAM;
use crate::errors::{HostkitError, Result};

/// Ask `kill` to deliver `signal` (e.g. `"TERM"`, `"9"`) to `process`.
///
/// See [`kill_with`].
pub fn kill(process: &Process, signal: &str) -> Result<()> {
    kill_with(DEFAULT_KILL_PROGRAM, process, signal)
}

/// Launch `<program> -<signal> <pid>` and return without waiting for it.
///
/// Only a launch failure is reported. Whether the signal arrived, or the
/// process still existed, is not checked; the child's exit is collected on a
/// background thread and merely logged.
pub fn kill_with(program: &str, process: &Process, signal: &str) -> Result<()> {
    let signal = signal.trim().trim_start_matches('-');
    if signal.is_empty() {
        return Err(HostkitError::ConfigError(
            "signal name must not be empty".to_string(),
        ));
    }

    let pid = process.pid.to_string();
    let mut child = Command::new(program)
        .arg(format!("-{signal}"))
        .arg(&pid)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| {
            error!(program = %program, pid = process.pid, error = %source, "kill failed to launch");
            HostkitError::Spawn {
                program: program.to_string(),
                source,
            }
        })?;

    info!(pid = process.pid, signal = %signal, executable = %process.executable, "signal requested");

    let spawn_res = thread::Builder::new()
        .name("hostkit-kill-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) if status.success() => debug!(pid = %pid, "kill exited cleanly"),
            Ok(status) => warn!(pid = %pid, exit_code = status.code().unwrap_or(-1), "kill reported failure"),
            Err(e) => warn!(pid = %pid, error = %e, "could not wait for kill"),
        });

    if let Err(e) = spawn_res {
        // The request is already on its way; the child just stays unreaped.
        warn!(error = %e, "could not start reaper thread for kill");
    }

    Ok(())
}
