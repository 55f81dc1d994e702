//! Cache directory discovery, layout, and job registration for pipestat
//!
//! A run is anchored by a cache directory. Every invocation finds it through a
//! pointer file ([`CacheLocator`]), registers jobs as one file per call, and
//! the job list is merged into `cache.json` once all registrations are done
//! ([`JobRegistry::consolidate`]).

pub mod init;
pub mod layout;
pub mod locator;
pub mod registry;

pub use init::{init_cache, InitOptions};
pub use layout::CacheDirectory;
pub use locator::{locate, CacheLocator};
pub use registry::JobRegistry;
