//! Filesystem helpers for the helm3 mixin
//!
//! Provides normalized path handling, atomic writes and a format-aware
//! store for the persisted host configuration.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
