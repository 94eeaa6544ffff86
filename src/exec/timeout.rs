// src/exec/timeout.rs

//! Bounded wait on a blocking operation.

use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::errors::{HostkitError, Result};

const WORKER_THREAD_NAME: &str = "hostkit-worker";

/// Run `work` on its own OS thread and wait at most `deadline` for it.
///
/// - If `work` finishes first, its result is returned as is.
/// - If the deadline fires first, [`HostkitError::Timeout`] is returned. The
///   thread is **not** stopped: it keeps running until `work` returns, and its
///   result is then dropped.
/// - A zero `deadline` is rejected before anything is spawned.
///
/// The result travels over a oneshot channel, so a worker that finishes after
/// the caller has gone away never blocks on the send.
pub async fn run_with_timeout<T, F>(deadline: Duration, work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    if deadline.is_zero() {
        return Err(HostkitError::ConfigError(
            "timeout duration needs to be positive".to_string(),
        ));
    }

    let (result_tx, result_rx) = oneshot::channel::<Result<T>>();

    thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            let outcome = work();
            if result_tx.send(outcome).is_err() {
                debug!("worker finished after its caller stopped waiting; result discarded");
            }
        })
        .map_err(|source| HostkitError::Spawn {
            program: WORKER_THREAD_NAME.to_string(),
            source,
        })?;

    match tokio::time::timeout(deadline, result_rx).await {
        Ok(Ok(outcome)) => outcome,
        // Sender dropped without a value: the worker panicked.
        Ok(Err(_)) => Err(HostkitError::Other(anyhow!(
            "worker thread exited without producing a result"
        ))),
        Err(_elapsed) => {
            warn!(timeout = ?deadline, "deadline reached; leaving worker running in background");
            Err(HostkitError::Timeout { timeout: deadline })
        }
    }
}
