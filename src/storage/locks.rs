//! Per-path reader/writer locks.
//!
//! Writers to one path are serialized and readers never overlap a writer on
//! the same path. Locks exist only while some task holds or waits on them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

#[derive(Debug, Default)]
pub struct PathLocks {
    locks: Mutex<HashMap<PathBuf, Arc<RwLock<()>>>>,
}

/// Holds a path lock; releasing it drops the map entry once no one else uses it.
pub struct PathGuard<'a, G> {
    guard: Option<G>,
    path: PathBuf,
    owner: &'a PathLocks,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self, path: &Path) -> PathGuard<'_, OwnedRwLockReadGuard<()>> {
        let lock = self.entry(path);
        PathGuard {
            guard: Some(lock.read_owned().await),
            path: path.to_path_buf(),
            owner: self,
        }
    }

    pub async fn write(&self, path: &Path) -> PathGuard<'_, OwnedRwLockWriteGuard<()>> {
        let lock = self.entry(path);
        PathGuard {
            guard: Some(lock.write_owned().await),
            path: path.to_path_buf(),
            owner: self,
        }
    }

    /// Number of paths currently tracked.
    pub fn tracked(&self) -> usize {
        self.map().len()
    }

    fn entry(&self, path: &Path) -> Arc<RwLock<()>> {
        self.map()
            .entry(path.to_path_buf())
            .or_default()
            .clone()
    }

    fn release(&self, path: &Path) {
        let mut locks = self.map();
        // Only the map itself still references the lock
        if locks.get(path).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(path);
        }
    }

    fn map(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<RwLock<()>>>> {
        self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<G> Drop for PathGuard<'_, G> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.owner.release(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn entries_are_released_after_use() {
        let locks = PathLocks::new();
        let path = Path::new("/tmp/a");

        {
            let _r1 = locks.read(path).await;
            let _r2 = locks.read(path).await;
            assert_eq!(locks.tracked(), 1);
        }
        assert_eq!(locks.tracked(), 0);

        drop(locks.write(path).await);
        assert_eq!(locks.tracked(), 0);
    }
}
