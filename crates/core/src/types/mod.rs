//! Core domain types for pipestat.
//!
//! ## Organization
//!
//! - **`ci_stage`**: the three fixed CI stages every pipeline is made of
//! - **`job`**: immutable job descriptors produced by registration
//! - **`status`**: executor status records and the rolled-up status enums
//! - **`cache_file`**: the consolidated `cache.json` document

pub mod cache_file;
pub mod ci_stage;
pub mod job;
pub mod status;

// Re-export all public types for convenient access
pub use cache_file::*;
pub use ci_stage::*;
pub use job::*;
pub use status::*;
