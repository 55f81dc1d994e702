//! Shared utilities and pure functions for pipestat
//!
//! This crate provides the crash-safe write primitive every writer of shared
//! state goes through, timestamp helpers, and logging setup.

pub mod atomic_file;
pub mod time;
pub mod tracing;

pub use atomic_file::*;
pub use time::*;
