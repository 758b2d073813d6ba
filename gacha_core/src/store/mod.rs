//! PityStore - Trait and implementations for per-user pity counters
//!
//! The engine never owns counters. A store hands out the current value and
//! commits whatever the caller decides after a pull.

mod json;
mod memory;

pub use json::JsonPityStore;
pub use memory::InMemoryPityStore;

use crate::types::UserId;
use thiserror::Error;

/// Pity store error
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access pity snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse pity snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid pity counter {value} for user {user}")]
    InvalidCounter { user: UserId, value: i64 },
    #[error("Counter lock for user {0} is poisoned")]
    Poisoned(UserId),
}

/// Trait for anything that persists pity counters
pub trait PityStore: Send + Sync {
    /// Current counter for a user; unknown users start at 0
    fn get(&self, user: &UserId) -> Result<u32, StoreError>;

    /// Commit a new counter value
    fn set(&self, user: &UserId, value: u32) -> Result<(), StoreError>;

    /// Read, transform and commit a counter, returning the committed value
    ///
    /// The default implementation is a plain get then set. Stores shared
    /// between threads override it so updates for one user are serialized.
    fn update(&self, user: &UserId, f: &mut dyn FnMut(u32) -> u32) -> Result<u32, StoreError> {
        let next = f(self.get(user)?);
        self.set(user, next)?;
        Ok(next)
    }
}
