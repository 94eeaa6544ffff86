// src/lib.rs

//! Host-management helpers for an agent:
//!
//! - run commands under a wall-clock timeout ([`exec`])
//! - pick lines out of their output ([`filter`])
//! - list and signal processes ([`process`])
//! - flush a filesystem with `syncfs` ([`sync`])
//!
//! [`HostTools`] bundles these with a validated [`config::Settings`].

pub mod config;
pub mod errors;
pub mod exec;
pub mod filter;
pub mod fs;
pub mod logging;
pub mod process;
pub mod sync;
pub mod tools;
pub mod types;

pub use errors::{HostkitError, Result};
pub use exec::{echo_to_file, run_with_timeout, sh, sh_with_timeout};
pub use filter::{grep_lines, regexp_lines};
pub use process::{kill, list_processes, Process, ProcessTable};
pub use sync::{sync_path, sync_path_with_timeout, syncfs, FilesystemSync, FsSyncer};
pub use tools::HostTools;
