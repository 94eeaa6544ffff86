// src/config/mod.rs

//! Settings for the host tools.
//!
//! - [`model`] holds the raw TOML shape and the validated [`Settings`].
//! - [`validate`] turns one into the other.
//! - [`loader`] reads a file from disk.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{RawSettings, Settings};
