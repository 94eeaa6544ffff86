// src/tools.rs

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::config::Settings;
use crate::errors::Result;
use crate::exec::sh_with_timeout;
use crate::fs::{FileSystem, RealFileSystem};
use crate::process::{kill_with, Process, ProcessTable};
use crate::sync::{FilesystemSync, FsSyncer, KernelSyncer};

/// The host tools with their settings applied.
///
/// Built once by the embedding agent; every call uses the timeouts and
/// paths from its [`Settings`] instead of process-wide defaults.
#[derive(Debug, Clone)]
pub struct HostTools {
    settings: Settings,
    processes: ProcessTable,
    sync: FilesystemSync,
}

impl HostTools {
    pub fn new(settings: Settings) -> Self {
        let processes = ProcessTable::new(Arc::new(RealFileSystem), settings.proc_root());
        let sync = FilesystemSync::new(Arc::new(KernelSyncer), settings.sync_marker());
        Self {
            settings,
            processes,
            sync,
        }
    }

    /// Replace the syscall used by [`Self::sync_path`].
    pub fn with_syncer(mut self, syncer: Arc<dyn FsSyncer>) -> Self {
        self.sync = FilesystemSync::new(syncer, self.settings.sync_marker());
        self
    }

    /// Replace the filesystem the process table is read from.
    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.processes = ProcessTable::new(fs, self.settings.proc_root());
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run a command, waiting at most `shell_timeout`.
    pub async fn sh<S: AsRef<str>>(&self, program: &str, args: &[S]) -> Result<String> {
        sh_with_timeout(self.settings.shell_timeout(), program, args).await
    }

    /// Sync the filesystem at `mountpoint`, waiting at most `sync_timeout`.
    pub async fn sync_path(&self, mountpoint: impl AsRef<Path>) -> Result<()> {
        debug!(timeout = ?self.settings.sync_timeout(), "sync with configured timeout");
        self.sync
            .sync_path_with_timeout(self.settings.sync_timeout(), mountpoint)
            .await
    }

    pub fn list_processes(&self) -> Result<Vec<Process>> {
        self.processes.list()
    }

    /// Signal `process` through the configured kill program.
    pub fn kill(&self, process: &Process, signal: &str) -> Result<()> {
        kill_with(self.settings.kill_program(), process, signal)
    }
}

impl Default for HostTools {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
