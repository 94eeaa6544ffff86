// src/config/model.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::types::HumanDuration;

pub const DEFAULT_SHELL_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const DEFAULT_KILL_PROGRAM: &str = "kill";
pub const DEFAULT_SYNC_MARKER: &str = ".hostkit-syncfs";

/// Settings as read from a TOML file, before validation.
///
/// ```toml
/// shell_timeout = "5m"
/// sync_timeout = "30s"
/// proc_root = "/proc"
/// kill_program = "kill"
/// sync_marker = ".hostkit-syncfs"
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    /// Upper bound on how long `HostTools::sh` waits for a command.
    #[serde(default = "default_shell_timeout")]
    pub shell_timeout: HumanDuration,

    /// Upper bound on how long `HostTools::sync_path` waits for `syncfs`.
    #[serde(default = "default_sync_timeout")]
    pub sync_timeout: HumanDuration,

    #[serde(default = "default_proc_root")]
    pub proc_root: PathBuf,

    /// Signal-sending utility, resolved on `PATH`.
    #[serde(default = "default_kill_program")]
    pub kill_program: String,

    /// File name created under a mountpoint to get a descriptor on it.
    #[serde(default = "default_sync_marker")]
    pub sync_marker: String,
}

fn default_shell_timeout() -> HumanDuration {
    HumanDuration::from_duration(DEFAULT_SHELL_TIMEOUT)
}

fn default_sync_timeout() -> HumanDuration {
    HumanDuration::from_duration(DEFAULT_SYNC_TIMEOUT)
}

fn default_proc_root() -> PathBuf {
    PathBuf::from(DEFAULT_PROC_ROOT)
}

fn default_kill_program() -> String {
    DEFAULT_KILL_PROGRAM.to_string()
}

fn default_sync_marker() -> String {
    DEFAULT_SYNC_MARKER.to_string()
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            shell_timeout: default_shell_timeout(),
            sync_timeout: default_sync_timeout(),
            proc_root: default_proc_root(),
            kill_program: default_kill_program(),
            sync_marker: default_sync_marker(),
        }
    }
}

/// Validated settings.
///
/// Only obtainable through `TryFrom<RawSettings>` (or `Default`), so holders
/// can rely on non-zero timeouts and non-empty names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    shell_timeout: Duration,
    sync_timeout: Duration,
    proc_root: PathBuf,
    kill_program: String,
    sync_marker: String,
}

impl Settings {
    pub(crate) fn new_unchecked(raw: RawSettings) -> Self {
        Self {
            shell_timeout: raw.shell_timeout.into(),
            sync_timeout: raw.sync_timeout.into(),
            proc_root: raw.proc_root,
            kill_program: raw.kill_program,
            sync_marker: raw.sync_marker,
        }
    }

    pub fn shell_timeout(&self) -> Duration {
        self.shell_timeout
    }

    pub fn sync_timeout(&self) -> Duration {
        self.sync_timeout
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    pub fn kill_program(&self) -> &str {
        &self.kill_program
    }

    pub fn sync_marker(&self) -> &str {
        &self.sync_marker
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new_unchecked(RawSettings::default())
    }
}
