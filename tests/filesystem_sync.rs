use std::sync::Arc;
use std::time::{Duration, Instant};

use hostkit::errors::HostkitError;
use hostkit::sync::{sync_path, sync_path_with_timeout, FilesystemSync};
use hostkit_test_utils::fake_syncer::{RecordingSyncer, SlowSyncer};
use hostkit_test_utils::{init_tracing, scratch_mountpoint, within};

#[test]
fn sync_path_leaves_marker_behind() {
    init_tracing();
    let mnt = scratch_mountpoint();

    sync_path(mnt.path()).unwrap();

    assert!(mnt.path().join(".hostkit-syncfs").is_file());
    // A second sync reuses the existing marker.
    sync_path(mnt.path()).unwrap();
}

#[tokio::test]
async fn healthy_filesystem_syncs_within_deadline() {
    init_tracing();
    let mnt = scratch_mountpoint();

    sync_path_with_timeout(Duration::from_secs(1), mnt.path())
        .await
        .unwrap();
}

#[tokio::test]
async fn hanging_sync_times_out_at_deadline() {
    init_tracing();
    let mnt = scratch_mountpoint();
    let syncer = Arc::new(SlowSyncer::hanging());
    let sync = FilesystemSync::new(syncer.clone(), "marker");

    let deadline = Duration::from_secs(1);
    let start = Instant::now();
    let res = within(
        Duration::from_secs(5),
        sync.sync_path_with_timeout(deadline, mnt.path()),
    )
    .await;
    let elapsed = start.elapsed();

    match res {
        Err(HostkitError::Timeout { timeout }) => assert_eq!(timeout, deadline),
        other => panic!("expected Timeout, got {other:?}"),
    }
    assert!(elapsed >= deadline);
    assert!(elapsed < Duration::from_secs(3), "took {elapsed:?}");
    assert_eq!(syncer.finished(), 0);
}

#[tokio::test]
async fn late_sync_still_completes_in_background() {
    init_tracing();
    let mnt = scratch_mountpoint();
    let syncer = Arc::new(SlowSyncer::new(Duration::from_millis(300)));
    let sync = FilesystemSync::new(syncer.clone(), "marker");

    let res = sync
        .sync_path_with_timeout(Duration::from_millis(50), mnt.path())
        .await;
    assert!(res.unwrap_err().is_timeout());

    within(Duration::from_secs(5), async {
        while syncer.finished() == 0 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
}

#[test]
fn syscall_failure_is_returned_and_marker_still_closed() {
    init_tracing();
    let mnt = scratch_mountpoint();
    let syncer = Arc::new(RecordingSyncer::failing());
    let sync = FilesystemSync::new(syncer.clone(), "marker");

    match sync.sync_path(mnt.path()) {
        Err(HostkitError::Syscall { call, source }) => {
            assert_eq!(call, "syncfs");
            assert_eq!(source.raw_os_error(), Some(5));
        }
        other => panic!("expected Syscall error, got {other:?}"),
    }
    assert_eq!(syncer.calls(), 1);
    assert!(mnt.path().join("marker").is_file());
}

#[tokio::test]
async fn zero_deadline_never_touches_the_filesystem() {
    init_tracing();
    let mnt = scratch_mountpoint();
    let syncer = Arc::new(RecordingSyncer::succeeding());
    let sync = FilesystemSync::new(syncer.clone(), "marker");

    let res = sync.sync_path_with_timeout(Duration::ZERO, mnt.path()).await;

    assert!(matches!(res, Err(HostkitError::ConfigError(_))));
    assert_eq!(syncer.calls(), 0);
    assert!(!mnt.path().join("marker").exists());
}
