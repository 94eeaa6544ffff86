use std::fs::File;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use hostkit::errors::{HostkitError, Result};
use hostkit::sync::FsSyncer;

/// A syncer that blocks for `delay` before reporting success, standing in
/// for a filesystem whose flush hangs.
///
/// `finished()` counts syncs that eventually returned.
#[derive(Debug)]
pub struct SlowSyncer {
    delay: Duration,
    finished: AtomicUsize,
}

impl SlowSyncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            finished: AtomicUsize::new(0),
        }
    }

    /// Effectively never returns within a test run.
    pub fn hanging() -> Self {
        Self::new(Duration::from_secs(60 * 60))
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

impl FsSyncer for SlowSyncer {
    fn sync(&self, _file: &File) -> Result<()> {
        std::thread::sleep(self.delay);
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A syncer that counts its calls and then fails or succeeds as configured.
#[derive(Debug, Default)]
pub struct RecordingSyncer {
    fail: bool,
    calls: AtomicUsize,
}

impl RecordingSyncer {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FsSyncer for RecordingSyncer {
    fn sync(&self, _file: &File) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(HostkitError::Syscall {
                call: "syncfs",
                source: std::io::Error::from_raw_os_error(5), // EIO
            });
        }
        Ok(())
    }
}
