//! Offline disk cache for resolved target descriptors.
//!
//! A flat directory holding one `<uid>.etd` file per descriptor. The
//! directory is created on demand; undecodable files are skipped with a
//! warning rather than failing the whole startup scan.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::recognition::target::{TARGET_FILE_EXT, TargetDescriptor};

/// Failures of the offline target cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("undecodable descriptor file {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Disk store for target descriptors.
#[derive(Debug)]
pub struct TargetCache {
    dir: PathBuf,
}

impl TargetCache {
    /// Open the cache at `dir`, creating the directory if absent.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        info!(dir = %dir.display(), "offline target cache initialized");
        Ok(Self { dir })
    }

    /// Default cache location under the platform data directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cloudtrack")
            .join("targets")
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decode every cached descriptor. Files that fail to decode are skipped.
    pub fn scan(&self) -> Result<Vec<TargetDescriptor>, CacheError> {
        let mut descriptors = Vec::new();
        for path in self.descriptor_files()? {
            match fs::read(&path).map_err(CacheError::from).and_then(|bytes| {
                TargetDescriptor::from_bytes(&bytes).map_err(|source| CacheError::Decode {
                    path: path.clone(),
                    source,
                })
            }) {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(err) => warn!(path = %path.display(), %err, "skipping cached target"),
            }
        }
        Ok(descriptors)
    }

    /// Persist one descriptor as `<uid>.etd`.
    pub fn save(&self, descriptor: &TargetDescriptor) -> Result<(), CacheError> {
        let path = self.path_for(&descriptor.uid);
        fs::write(path, descriptor.to_bytes())?;
        Ok(())
    }

    /// Delete every descriptor file in the cache directory.
    pub fn clear(&self) -> Result<(), CacheError> {
        for path in self.descriptor_files()? {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Number of descriptor files currently on disk.
    pub fn file_count(&self) -> Result<usize, CacheError> {
        Ok(self.descriptor_files()?.len())
    }

    fn path_for(&self, uid: &str) -> PathBuf {
        self.dir.join(format!("{uid}.{TARGET_FILE_EXT}"))
    }

    fn descriptor_files(&self) -> Result<Vec<PathBuf>, CacheError> {
        let mut files = Vec::new();
        if !self.dir.exists() {
            return Ok(files);
        }
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == TARGET_FILE_EXT) {
                files.push(path);
            }
        }
        Ok(files)
    }
}
