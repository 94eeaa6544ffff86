pub mod builders;
pub mod fake_syncer;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tempfile::TempDir;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Logs go through `with_test_writer()`, so the harness only shows them for
/// failing tests (or with `-- --nocapture`). Levels come from `RUST_LOG`,
/// defaulting to `debug` for this crate so worker and timeout events show up.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,hostkit=debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_names(true)
            .init();
    });
}

/// Fail the test if `f` does not finish within `limit`.
///
/// Guards tests of the timeout wrapper against hanging themselves.
pub async fn within<F, T>(limit: Duration, f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, f)
        .await
        .unwrap_or_else(|_| panic!("test future did not finish within {limit:?}"))
}

/// A scratch directory standing in for a mountpoint.
pub fn scratch_mountpoint() -> TempDir {
    tempfile::Builder::new()
        .prefix("hostkit-mnt-")
        .tempdir()
        .expect("creating scratch mountpoint")
}

/// Whether `program` can be found on `PATH`; used to skip tests that need
/// a utility the host may not ship.
pub fn on_path(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}
