//! Creating a fresh cache directory and pointing the working tree at it

use crate::layout::CacheDirectory;
use pipestat_core::{CacheFile, Error, Result, CACHE_POINTER, VERSION};
use pipestat_utils::{now_timestamp, write_atomic_string, write_json_atomic};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Project name recorded in `cache.json`
    pub project: String,
    /// Where to create the cache; a fresh directory under the system temp dir by default
    pub cache_dir: Option<PathBuf>,
    /// Directory that receives the pointer file
    pub pointer_dir: PathBuf,
}

/// Create the cache layout, an empty `cache.json`, and the pointer file
pub fn init_cache(options: &InitOptions) -> Result<CacheDirectory> {
    let run_id = Uuid::new_v4().to_string();
    let root = options.cache_dir.clone().unwrap_or_else(|| {
        std::env::temp_dir()
            .join("pipestat")
            .join("runs")
            .join(&run_id)
    });

    let cache = CacheDirectory::new(&root);
    cache.create_layout()?;
    let root = root
        .canonicalize()
        .map_err(|e| Error::file_system(&root, "canonicalize cache directory", e))?;
    let cache = CacheDirectory::new(root);

    let mut metadata = Map::new();
    metadata.insert("project".into(), Value::from(options.project.clone()));
    metadata.insert("run_id".into(), Value::from(run_id));
    metadata.insert("version".into(), Value::from(VERSION));
    metadata.insert("start_time".into(), Value::from(now_timestamp()));
    let cache_file = CacheFile {
        jobs: Vec::new(),
        metadata,
    };
    write_json_atomic(&cache.cache_file(), &cache_file)?;

    let pointer = options.pointer_dir.join(CACHE_POINTER);
    write_atomic_string(&pointer, &format!("{}\n", cache.root().display()))?;

    info!(
        cache = %cache.root().display(),
        pointer = %pointer.display(),
        "Initialized pipestat cache"
    );
    Ok(cache)
}
