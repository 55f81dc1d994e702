//! Atomic file operations so readers never observe a partially written file
//!
//! Content is written to a sibling `<path>~` and renamed over `path` only once
//! the write scope has finished successfully. A scope that fails, or a writer
//! dropped without [`AtomicWriter::commit`], removes the temporary file and
//! leaves any previously committed file untouched.

use pipestat_core::{Error, Result, ATOMIC_TEMP_SUFFIX};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Path of the temporary sibling used while `path` is being written
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(ATOMIC_TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Writable handle whose content only becomes visible at `path` on commit
#[derive(Debug)]
pub struct AtomicWriter {
    path: PathBuf,
    temp_path: PathBuf,
    file: Option<BufWriter<File>>,
    committed: bool,
}

impl AtomicWriter {
    /// Create parent directories and open the temporary file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| Error::file_system(parent, "create parent directory", e))?;
        }

        let temp_path = temp_path_for(&path);
        let file = File::create(&temp_path)
            .map_err(|e| Error::file_system(&temp_path, "create temporary file", e))?;

        Ok(Self {
            path,
            temp_path,
            file: Some(BufWriter::new(file)),
            committed: false,
        })
    }

    /// Final destination of the write
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush, sync and close the temporary file, then rename it onto the final path
    pub fn commit(mut self) -> Result<()> {
        let Some(writer) = self.file.take() else {
            return Err(Error::configuration(format!(
                "atomic write to '{}' has no open file",
                self.path.display()
            )));
        };

        let file = writer.into_inner().map_err(|e| {
            Error::file_system(&self.temp_path, "flush temporary file", e.into_error())
        })?;
        file.sync_all()
            .map_err(|e| Error::file_system(&self.temp_path, "sync temporary file", e))?;
        drop(file);

        fs::rename(&self.temp_path, &self.path)
            .map_err(|e| Error::file_system(&self.path, "atomic rename", e))?;
        self.committed = true;
        Ok(())
    }
}

impl Write for AtomicWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.write(buf),
            None => Err(io::Error::new(io::ErrorKind::Other, "atomic writer is closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for AtomicWriter {
    fn drop(&mut self) {
        if !self.committed {
            self.file.take();
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Run `scope` against an atomic writer for `path`, committing only if it succeeds
pub fn with_atomic_write<T, F>(path: &Path, scope: F) -> Result<T>
where
    F: FnOnce(&mut AtomicWriter) -> Result<T>,
{
    let mut writer = AtomicWriter::create(path)?;
    let value = scope(&mut writer)?;
    writer.commit()?;
    Ok(value)
}

/// Write data to a file atomically by writing to a temporary file and renaming
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    with_atomic_write(path, |writer| {
        writer
            .write_all(content)
            .map_err(|e| Error::file_system(path, "write to temporary file", e))
    })
}

/// Write string content to a file atomically
pub fn write_atomic_string(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Write `value` as pretty-printed JSON followed by a newline
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    with_atomic_write(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, value)?;
        writeln!(writer).map_err(|e| Error::file_system(path, "write to temporary file", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        write_atomic_string(&file_path, "Hello, World!").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "Hello, World!");
        assert!(!temp_path_for(&file_path).exists());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("html").join("pipelines").join("index.html");

        write_atomic_string(&file_path, "Test").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "Test");
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        fs::write(&file_path, "Old content").unwrap();
        write_atomic_string(&file_path, "New content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "New content");
    }

    #[test]
    fn test_failed_scope_keeps_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("cache.json");
        fs::write(&file_path, "{\"jobs\": []}").unwrap();

        let result: Result<()> = with_atomic_write(&file_path, |writer| {
            writer.write_all(b"{\"jobs\": [")?;
            Err(Error::configuration("interrupted"))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "{\"jobs\": []}");
        assert!(!temp_path_for(&file_path).exists());
    }

    #[test]
    fn test_dropped_writer_discards_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("page.html");

        {
            let mut writer = AtomicWriter::create(&file_path).unwrap();
            writer.write_all(b"<html>").unwrap();
            assert!(temp_path_for(&file_path).exists());
        }

        assert!(!file_path.exists());
        assert!(!temp_path_for(&file_path).exists());
    }

    #[test]
    fn test_json_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("cache.json");
        let value = serde_json::json!({"jobs": [{"job_id": "a"}], "project": "foo"});

        write_json_atomic(&file_path, &value).unwrap();

        let raw = fs::read_to_string(&file_path).unwrap();
        assert!(raw.ends_with("}\n"));
        let back: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, value);
    }
}
