/// Constants used throughout the pipestat codebase
// Cache layout
pub const CACHE_FILE: &str = "cache.json";
pub const CACHE_POINTER: &str = ".pipestat_cache_dir";
pub const RUN_FILE: &str = "run.json";
pub const JOBS_DIR: &str = "jobs";
pub const STATUS_DIR: &str = "status";
pub const ARTIFACTS_DIR: &str = "artifacts";
pub const REPORT_DATA_DIR: &str = "report_data";
pub const HTML_DIR: &str = "html";

// Suffix appended to a path while it is being written atomically
pub const ATOMIC_TEMP_SUFFIX: &str = "~";

// Timestamps are UTC with second precision
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// Tag prefix that groups jobs for runtime comparison
pub const STATS_GROUP_TAG: &str = "stats-group";

// Environment variable names
pub const PIPESTAT_LOG_VAR: &str = "PIPESTAT_LOG";

// Process exit code when no cache can be located
pub const EXIT_CACHE_NOT_FOUND: i32 = 3;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
