use crate::store::StoreError;
use std::fs;
use std::path::{Path, PathBuf};

/// The folder holding snapshots, reports and the ledger.
#[derive(Debug, Clone)]
pub struct DataDir {
    path: PathBuf,
}

impl DataDir {
    /// Opens the folder, creating it on first use.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|e| StoreError::file_access(&path, e))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }
}
