use std::time::{Duration, Instant};

use hostkit::errors::HostkitError;
use hostkit::exec::{echo_to_file, sh, sh_with_timeout};
use hostkit::filter::grep_lines;
use hostkit_test_utils::init_tracing;
use tempfile::NamedTempFile;

#[test]
fn sh_returns_trimmed_stdout() {
    init_tracing();
    let out = sh("printf", &["\n  two words \n\n"]).unwrap();
    assert_eq!(out, "two words");
}

#[test]
fn sh_reports_non_zero_exit_with_output() {
    init_tracing();
    let res = sh("sh", &["-c", "echo partial; echo oops >&2; exit 3"]);

    match res {
        Err(HostkitError::CommandFailed {
            program,
            code,
            stdout,
            stderr,
        }) => {
            assert_eq!(program, "sh");
            assert_eq!(code, 3);
            assert_eq!(stdout, "partial");
            assert_eq!(stderr, "oops");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn sh_reports_missing_program() {
    init_tracing();
    let res = sh::<&str>("hostkit-no-such-program-xyz", &[]);
    match res {
        Err(HostkitError::Spawn { program, source }) => {
            assert_eq!(program, "hostkit-no-such-program-xyz");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Spawn error, got {other:?}"),
    }
}

#[tokio::test]
async fn sh_with_timeout_passes_through_fast_commands() {
    init_tracing();
    let out = sh_with_timeout(Duration::from_secs(5), "sh", &["-c", "echo up; echo down; echo up again"])
        .await
        .unwrap();
    assert_eq!(grep_lines(&out, "up"), vec!["up", "up again"]);
}

#[tokio::test]
async fn sh_with_timeout_gives_up_on_slow_commands() {
    init_tracing();
    let start = Instant::now();
    let res = sh_with_timeout(Duration::from_millis(200), "sleep", &["5"]).await;

    match res {
        Err(HostkitError::Timeout { timeout }) => {
            assert_eq!(timeout, Duration::from_millis(200));
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn sh_with_zero_timeout_is_a_config_error() {
    let res = sh_with_timeout(Duration::ZERO, "true", &[] as &[&str]).await;
    assert!(matches!(res, Err(HostkitError::ConfigError(_))));
}

#[test]
fn echo_writes_into_existing_file() {
    init_tracing();
    let file = NamedTempFile::new().unwrap();

    echo_to_file("1", file.path()).unwrap();

    let content = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(content, "1\n");
}

#[test]
fn echo_does_not_create_missing_file() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("knob");

    let res = echo_to_file("1", &target);

    match res {
        Err(HostkitError::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected IoError, got {other:?}"),
    }
    assert!(!target.exists());
}
