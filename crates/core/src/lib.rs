//! Core domain types, errors, and constants for `pipestat`.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.
//! - **`types`**: Job descriptors, executor status records, CI stages and the
//!   rolled-up status enums shared by every other crate.
//! - **`constants`**: Cache layout names, timestamp format, exit codes.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result, ResultExt},
    types::*,
};
