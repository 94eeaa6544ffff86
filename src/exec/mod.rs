// src/exec/mod.rs

//! Running blocking work under a deadline.
//!
//! - [`timeout`] holds the race primitive: run a closure on its own thread
//!   and give up waiting after a deadline.
//! - [`command`] runs external programs synchronously and wires them through
//!   [`timeout`] for the bounded variants.

pub mod command;
pub mod timeout;

pub use command::{echo_to_file, sh, sh_with_timeout};
pub use timeout::run_with_timeout;
