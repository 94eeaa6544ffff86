// src/errors.rs

//! Crate-wide error type.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostkitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The deadline elapsed first. The operation may still be running.
    #[error("Reached timeout of {timeout:?} before the operation finished")]
    Timeout { timeout: Duration },

    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with code {code}: {stderr}")]
    CommandFailed {
        program: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("{call} syscall failed: {source}")]
    Syscall {
        call: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open sync marker {path:?}: {source}")]
    SyncMarker {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read process table at {path:?}: {source}")]
    ProcessTable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HostkitError {
    /// True when the caller gave up waiting; the underlying work may still run.
    pub fn is_timeout(&self) -> bool {
        matches!(self, HostkitError::Timeout { .. })
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, HostkitError>;
