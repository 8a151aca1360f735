//! Where the progress blob lives
//!
//! The store only needs to read and write one opaque blob. Backends decide
//! where it goes.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Load/save contract for the serialized progress mapping
pub trait ProgressBackend: Send + Sync {
    /// The stored blob, or `None` if nothing was ever saved
    fn load_blob(&self) -> Result<Option<Vec<u8>>>;

    fn save_blob(&self, bytes: &[u8]) -> Result<()>;
}

/// Blob stored as a single file on disk
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ProgressBackend for FileBackend {
    fn load_blob(&self) -> Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(&self.path)?))
    }

    fn save_blob(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // The previous blob stays in place until the rename
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Blob kept in memory for the life of the process
#[derive(Default)]
pub struct MemoryBackend {
    blob: Mutex<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing bytes, e.g. to simulate a previous run
    pub fn with_blob(bytes: Vec<u8>) -> Self {
        Self {
            blob: Mutex::new(Some(bytes)),
        }
    }
}

impl ProgressBackend for MemoryBackend {
    fn load_blob(&self) -> Result<Option<Vec<u8>>> {
        let blob = self
            .blob
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        Ok(blob.clone())
    }

    fn save_blob(&self, bytes: &[u8]) -> Result<()> {
        let mut blob = self
            .blob
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        *blob = Some(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("progress.json"));
        assert!(backend.load_blob().unwrap().is_none());
    }

    #[test]
    fn test_file_backend_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("progress.json");
        let backend = FileBackend::new(path.clone());

        backend.save_blob(b"{}").unwrap();

        assert!(path.exists());
        assert_eq!(backend.load_blob().unwrap(), Some(b"{}".to_vec()));
    }

    #[test]
    fn test_file_backend_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("progress.json"));

        backend.save_blob(b"first").unwrap();
        backend.save_blob(b"second").unwrap();

        assert_eq!(backend.load_blob().unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new();
        assert!(backend.load_blob().unwrap().is_none());

        backend.save_blob(b"data").unwrap();
        assert_eq!(backend.load_blob().unwrap(), Some(b"data".to_vec()));

        let seeded = MemoryBackend::with_blob(b"seed".to_vec());
        assert_eq!(seeded.load_blob().unwrap(), Some(b"seed".to_vec()));
    }
}
