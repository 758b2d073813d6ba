//! Prelude module for convenient imports
//!
//! ```rust
//! use gacha_core::prelude::*;
//! ```

// Engine
pub use crate::engine::{MultiPullResult, PityRateEngine, PullResult};
pub use crate::error::GachaError;

// Rates
pub use crate::pity::{AdjustedRateTable, BaseWeights, PityConfig};

// Collaborators
pub use crate::catalog::{Character, CharacterCatalog};
pub use crate::store::{InMemoryPityStore, PityStore};

// Config
pub use crate::config::{default_banner, default_catalog};

// Types
pub use crate::types::{CharacterId, RarityTier, UserId};
