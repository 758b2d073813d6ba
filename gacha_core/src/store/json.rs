//! JSON file snapshot of pity counters

use super::{InMemoryPityStore, PityStore, StoreError};
use crate::types::UserId;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Pity store backed by a JSON object of `user -> counter`
///
/// Counters live in an [`InMemoryPityStore`]; every commit rewrites the
/// snapshot file.
#[derive(Debug)]
pub struct JsonPityStore {
    path: PathBuf,
    inner: InMemoryPityStore,
    write_lock: Mutex<()>,
}

impl JsonPityStore {
    /// Open a snapshot, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let inner = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let raw: BTreeMap<String, i64> = serde_json::from_str(&content)?;
            let mut counters = Vec::with_capacity(raw.len());
            for (user, value) in raw {
                let user = UserId(user);
                let value = u32::try_from(value)
                    .map_err(|_| StoreError::InvalidCounter { user: user.clone(), value })?;
                counters.push((user, value));
            }
            log::info!("loaded {} pity counters from {}", counters.len(), path.display());
            InMemoryPityStore::from_counters(counters)
        } else {
            InMemoryPityStore::new()
        };

        Ok(JsonPityStore {
            path,
            inner,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all counters to disk
    pub fn save(&self) -> Result<(), StoreError> {
        let _guard = self.lock_writes()?;
        self.write_snapshot()
    }

    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Poisoned(UserId::from("*")))
    }

    fn write_snapshot(&self) -> Result<(), StoreError> {
        let snapshot: BTreeMap<String, u32> = self
            .inner
            .snapshot()?
            .into_iter()
            .map(|(user, value)| (user.0, value))
            .collect();
        let content = serde_json::to_string_pretty(&snapshot)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("saved {} pity counters to {}", snapshot.len(), self.path.display());
        Ok(())
    }

    /// Apply `f` in memory and persist it, restoring the old value if the write fails
    ///
    /// Holds the write lock throughout so no other commit can land between
    /// the change and its rollback.
    fn commit(&self, user: &UserId, f: &mut dyn FnMut(u32) -> u32) -> Result<u32, StoreError> {
        let _guard = self.lock_writes()?;

        let mut previous = 0;
        let value = self.inner.update(user, &mut |current| {
            previous = current;
            f(current)
        })?;

        if let Err(e) = self.write_snapshot() {
            log::error!("failed to save pity for {}, keeping {}: {}", user, previous, e);
            self.inner.set(user, previous)?;
            return Err(e);
        }
        Ok(value)
    }
}

impl PityStore for JsonPityStore {
    fn get(&self, user: &UserId) -> Result<u32, StoreError> {
        self.inner.get(user)
    }

    fn set(&self, user: &UserId, value: u32) -> Result<(), StoreError> {
        self.commit(user, &mut |_| value).map(|_| ())
    }

    fn update(&self, user: &UserId, f: &mut dyn FnMut(u32) -> u32) -> Result<u32, StoreError> {
        self.commit(user, f)
    }
}
