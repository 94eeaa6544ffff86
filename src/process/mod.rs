// src/process/mod.rs

//! Process registry: enumerate processes from `/proc` and signal them.
//!
//! Enumeration is a best-effort snapshot. The process table changes while it
//! is being scanned, so entries that vanish or cannot be read are skipped
//! instead of failing the whole listing.

mod signal;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::model::DEFAULT_PROC_ROOT;
use crate::errors::{HostkitError, Result};
use crate::fs::{FileSystem, RealFileSystem};

pub use signal::{kill, kill_with};

/// One process as seen at enumeration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub pid: u32,
    /// Full command line, arguments separated by single spaces.
    pub executable: String,
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pid, self.executable)
    }
}

/// A `/proc`-style tree read through a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct ProcessTable {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new(Arc::new(RealFileSystem), DEFAULT_PROC_ROOT)
    }
}

impl ProcessTable {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every numeric entry under the root that has a readable
    /// `cmdline`, sorted by PID.
    ///
    /// Only a failure to list the root itself is an error.
    pub fn list(&self) -> Result<Vec<Process>> {
        let entries = self.fs.read_dir(&self.root).map_err(|source| {
            error!(root = ?self.root, error = %source, "could not read process table root");
            HostkitError::ProcessTable {
                path: self.root.clone(),
                source,
            }
        })?;

        let mut processes: Vec<Process> = entries
            .iter()
            .filter_map(|entry| self.read_entry(entry))
            .collect();
        processes.sort_by_key(|p| p.pid);

        debug!(root = ?self.root, count = processes.len(), "enumerated processes");
        Ok(processes)
    }

    fn read_entry(&self, entry: &Path) -> Option<Process> {
        let pid: u32 = entry.file_name()?.to_str()?.parse().ok()?;

        let cmdline_path = entry.join("cmdline");
        match self.fs.read(&cmdline_path) {
            Ok(raw) => Some(Process {
                pid,
                executable: decode_cmdline(&raw),
            }),
            Err(e) => {
                warn!(pid, path = ?cmdline_path, error = %e, "skipping unreadable process entry");
                None
            }
        }
    }
}

/// List processes from the host's `/proc`.
pub fn list_processes() -> Result<Vec<Process>> {
    ProcessTable::default().list()
}

/// `cmdline` is NUL-separated and NUL-terminated; join the arguments with
/// single spaces.
fn decode_cmdline(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\0").unwrap_or(raw);
    String::from_utf8_lossy(raw).replace('\0', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn decode_joins_arguments() {
        assert_eq!(decode_cmdline(b"sleep\0100\0"), "sleep 100");
        assert_eq!(decode_cmdline(b"no-terminator"), "no-terminator");
        assert_eq!(decode_cmdline(b""), "");
    }

    #[test]
    fn non_numeric_entries_are_ignored() {
        let fs = MockFileSystem::new();
        fs.add_file("/proc/7/cmdline", b"seven\0".to_vec());
        fs.add_file("/proc/self/cmdline", b"me\0".to_vec());
        fs.add_file("/proc/meminfo", b"MemTotal: 1 kB\n".to_vec());
        fs.add_dir("/proc/-1");

        let table = ProcessTable::new(Arc::new(fs), "/proc");
        let procs = table.list().unwrap();
        assert_eq!(
            procs,
            vec![Process {
                pid: 7,
                executable: "seven".to_string()
            }]
        );
    }

    #[test]
    fn kernel_threads_have_empty_command_lines() {
        let fs = MockFileSystem::new();
        fs.add_file("/proc/2/cmdline", Vec::new());

        let procs = ProcessTable::new(Arc::new(fs), "/proc").list().unwrap();
        assert_eq!(procs.len(), 1);
        assert_eq!(procs[0].executable, "");
    }
}
