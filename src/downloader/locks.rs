//! Per-artifact write locks

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OwnedMutexGuard;

/// Async locks keyed by staging path
///
/// Two tracks whose titles sanitize to the same stem share a staging path. The
/// lock serializes them so at most one writer touches a stem's files at a
/// time; the second sees the first's committed artifact and skips.
///
/// Entries are pruned on acquisition once nobody holds or waits on them.
#[derive(Clone, Default)]
pub(crate) struct PathLocks {
    inner: Arc<Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>>,
}

impl PathLocks {
    pub(crate) async fn acquire(&self, key: &Path) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(key.to_path_buf()).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
