//! File storage backing the `/files/` route
//!
//! Handlers talk to a [`FileStorage`]; [`DiskStorage`] is the implementation
//! used by the server, rooted at the configured directory.

pub mod disk;
pub mod locks;

pub use disk::DiskStorage;
pub use locks::PathLocks;

use std::future::Future;

/// Failures surfaced by a [`FileStorage`]
#[derive(Debug)]
pub enum StorageError {
    /// No file by that name, or it cannot be opened for reading
    NotFound,
    /// The name is empty or would escape the storage root
    InvalidName(String),
    /// Opening or writing the target failed
    WriteFailed(std::io::Error),
    /// Any other I/O failure while reading
    Io(std::io::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotFound => write!(f, "file not found"),
            StorageError::InvalidName(name) => write!(f, "invalid file name {:?}", name),
            StorageError::WriteFailed(e) => write!(f, "storage write failed: {}", e),
            StorageError::Io(e) => write!(f, "storage I/O error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::WriteFailed(e) | StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Named-file storage capability.
///
/// Names are single path segments relative to the storage root.
pub trait FileStorage: Send + Sync + 'static {
    /// Reads the whole file.
    fn read(&self, name: &str) -> impl Future<Output = Result<Vec<u8>, StorageError>> + Send;

    /// Creates or truncates the file and writes `contents` to it.
    fn write(
        &self,
        name: &str,
        contents: &[u8],
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Rejects names that are empty or could resolve outside the root.
pub fn validate_name(name: &str) -> Result<&str, StorageError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        Err(StorageError::InvalidName(name.to_string()))
    } else {
        Ok(name)
    }
}
