//! Directory-backed storage
//!
//! Every operation takes the per-path lock from [`PathLocks`], so a GET never
//! reads a file while this process is half way through writing it. Concurrent
//! POSTs to one name run one after another and the last one wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::storage::{FileStorage, PathLocks, StorageError, validate_name};

#[derive(Debug)]
pub struct DiskStorage {
    root: PathBuf,
    locks: PathLocks,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: PathLocks::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(validate_name(name)?))
    }
}

impl FileStorage for DiskStorage {
    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(name)?;
        let _guard = self.locks.read(&path).await;

        match tokio::fs::read(&path).await {
            Ok(contents) => Ok(contents),
            Err(e) if matches!(
                e.kind(),
                ErrorKind::NotFound | ErrorKind::PermissionDenied | ErrorKind::IsADirectory
            ) =>
            {
                tracing::debug!(path = %path.display(), error = %e, "File not readable");
                Err(StorageError::NotFound)
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn write(&self, name: &str, contents: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(name)?;
        let _guard = self.locks.write(&path).await;

        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(StorageError::WriteFailed)?;

        file.write_all(contents)
            .await
            .map_err(StorageError::WriteFailed)?;
        file.flush().await.map_err(StorageError::WriteFailed)?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "File written");
        Ok(())
    }
}
