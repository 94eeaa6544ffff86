// src/sync.rs

//! Flushing a filesystem with `syncfs(2)`.
//!
//! The syscall needs a descriptor on the target filesystem, so a marker file
//! is opened (and created if needed) under the mountpoint. The marker is left
//! in place afterwards.

use std::fmt::Debug;
use std::fs::{File, OpenOptions};
use std::os::fd::{AsFd, AsRawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::config::model::DEFAULT_SYNC_MARKER;
use crate::errors::{HostkitError, Result};
use crate::exec::run_with_timeout;

/// Issue `syncfs(2)` for the filesystem containing `fd`.
pub fn syncfs(fd: impl AsFd) -> Result<()> {
    let raw = fd.as_fd().as_raw_fd();
    debug!(fd = raw, "syncfs enter");

    raw_syncfs(raw).map_err(|source| {
        error!(fd = raw, error = %source, "syncfs failed");
        HostkitError::Syscall {
            call: "syncfs",
            source,
        }
    })
}

#[cfg(target_os = "linux")]
fn raw_syncfs(fd: std::os::fd::RawFd) -> std::io::Result<()> {
    // SAFETY: `fd` is borrowed from a live descriptor for the whole call.
    let rc = unsafe { libc::syncfs(fd) };
    if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(target_os = "linux"))]
fn raw_syncfs(_fd: std::os::fd::RawFd) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "syncfs is only available on Linux",
    ))
}

/// Something that can flush the filesystem behind an open file.
///
/// Production code uses [`KernelSyncer`]; tests can provide one that hangs
/// or fails.
pub trait FsSyncer: Send + Sync + Debug {
    fn sync(&self, file: &File) -> Result<()>;
}

/// Calls the real `syncfs(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelSyncer;

impl FsSyncer for KernelSyncer {
    fn sync(&self, file: &File) -> Result<()> {
        syncfs(file)
    }
}

/// Marker-file based sync of a mountpoint.
#[derive(Debug, Clone)]
pub struct FilesystemSync {
    syncer: Arc<dyn FsSyncer>,
    marker: String,
}

impl Default for FilesystemSync {
    fn default() -> Self {
        Self::new(Arc::new(KernelSyncer), DEFAULT_SYNC_MARKER)
    }
}

impl FilesystemSync {
    pub fn new(syncer: Arc<dyn FsSyncer>, marker: impl Into<String>) -> Self {
        Self {
            syncer,
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Open the marker under `mountpoint` and sync its filesystem.
    ///
    /// The marker is closed whatever the sync outcome; it is not removed.
    pub fn sync_path(&self, mountpoint: impl AsRef<Path>) -> Result<()> {
        let marker_path = mountpoint.as_ref().join(&self.marker);
        info!(marker = ?marker_path, "syncing filesystem");

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .mode(0o644)
            .open(&marker_path)
            .map_err(|source| {
                error!(marker = ?marker_path, error = %source, "cannot open sync marker");
                HostkitError::SyncMarker {
                    path: marker_path.clone(),
                    source,
                }
            })?;

        let res = self.syncer.sync(&file);
        drop(file);
        res
    }

    /// [`Self::sync_path`] bounded by `deadline`.
    ///
    /// A sync that outlives the deadline keeps running on its worker thread.
    pub async fn sync_path_with_timeout(
        &self,
        deadline: Duration,
        mountpoint: impl AsRef<Path>,
    ) -> Result<()> {
        let this = self.clone();
        let mountpoint = mountpoint.as_ref().to_path_buf();

        run_with_timeout(deadline, move || this.sync_path(&mountpoint)).await
    }
}

/// Sync the filesystem mounted at `mountpoint` using the default marker.
pub fn sync_path(mountpoint: impl AsRef<Path>) -> Result<()> {
    FilesystemSync::default().sync_path(mountpoint)
}

/// [`sync_path`] bounded by `deadline`.
pub async fn sync_path_with_timeout(deadline: Duration, mountpoint: impl AsRef<Path>) -> Result<()> {
    FilesystemSync::default()
        .sync_path_with_timeout(deadline, mountpoint)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syncfs_on_a_temp_file() {
        let file = tempfile::tempfile().unwrap();
        syncfs(&file).unwrap();
    }

    #[test]
    fn missing_mountpoint_reports_marker_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-there");

        match sync_path(&missing) {
            Err(HostkitError::SyncMarker { path, .. }) => {
                assert_eq!(path, missing.join(DEFAULT_SYNC_MARKER));
            }
            other => panic!("expected SyncMarker error, got {other:?}"),
        }
    }
}
