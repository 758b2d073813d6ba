//! In-memory pity store with per-user locking

use super::{PityStore, StoreError};
use crate::types::UserId;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, RwLock};

type Counter = Arc<Mutex<u32>>;

/// Pity counters held in process memory
///
/// Each user gets their own mutex, so pulls by different users never
/// contend and pulls by the same user are applied one at a time.
#[derive(Debug, Default)]
pub struct InMemoryPityStore {
    counters: RwLock<HashMap<UserId, Counter>>,
}

impl InMemoryPityStore {
    pub fn new() -> Self {
        InMemoryPityStore {
            counters: RwLock::new(HashMap::new()),
        }
    }

    /// Build a store from existing counters
    pub fn from_counters(counters: impl IntoIterator<Item = (UserId, u32)>) -> Self {
        let counters = counters
            .into_iter()
            .map(|(user, value)| (user, Arc::new(Mutex::new(value))))
            .collect();
        InMemoryPityStore {
            counters: RwLock::new(counters),
        }
    }

    fn counter(&self, user: &UserId) -> Result<Counter, StoreError> {
        {
            let counters = self
                .counters
                .read()
                .map_err(|_| StoreError::Poisoned(user.clone()))?;
            if let Some(counter) = counters.get(user) {
                return Ok(Arc::clone(counter));
            }
        }

        let mut counters = self
            .counters
            .write()
            .map_err(|_| StoreError::Poisoned(user.clone()))?;
        Ok(Arc::clone(counters.entry(user.clone()).or_default()))
    }

    /// Snapshot of every known counter, sorted by user
    pub fn snapshot(&self) -> Result<BTreeMap<UserId, u32>, StoreError> {
        let counters = self
            .counters
            .read()
            .map_err(|_| StoreError::Poisoned(UserId::from("*")))?;
        counters
            .iter()
            .map(|(user, counter)| {
                let value = counter
                    .lock()
                    .map_err(|_| StoreError::Poisoned(user.clone()))?;
                Ok((user.clone(), *value))
            })
            .collect()
    }

    /// Forget a user's counter
    pub fn remove(&self, user: &UserId) -> Result<Option<u32>, StoreError> {
        let mut counters = self
            .counters
            .write()
            .map_err(|_| StoreError::Poisoned(user.clone()))?;
        match counters.remove(user) {
            Some(counter) => {
                let value = counter
                    .lock()
                    .map_err(|_| StoreError::Poisoned(user.clone()))?;
                Ok(Some(*value))
            }
            None => Ok(None),
        }
    }
}

impl PityStore for InMemoryPityStore {
    fn get(&self, user: &UserId) -> Result<u32, StoreError> {
        let counter = self.counter(user)?;
        let value = counter
            .lock()
            .map_err(|_| StoreError::Poisoned(user.clone()))?;
        Ok(*value)
    }

    fn set(&self, user: &UserId, value: u32) -> Result<(), StoreError> {
        let counter = self.counter(user)?;
        let mut guard = counter
            .lock()
            .map_err(|_| StoreError::Poisoned(user.clone()))?;
        *guard = value;
        Ok(())
    }

    fn update(&self, user: &UserId, f: &mut dyn FnMut(u32) -> u32) -> Result<u32, StoreError> {
        let counter = self.counter(user)?;
        let mut guard = counter
            .lock()
            .map_err(|_| StoreError::Poisoned(user.clone()))?;
        *guard = f(*guard);
        Ok(*guard)
    }
}
