//! gacha_core - Pity-rate engine for the Nexium gacha
//!
//! This library provides:
//! - PityRateEngine: pity-adjusted rarity rates, weighted draws and pulls
//! - CharacterCatalog: rarity to character pools
//! - PityStore: per-user pity counter persistence contract
//! - Config: TOML banner and roster loading

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod pity;
pub mod prelude;
pub mod store;
pub mod types;

// Re-export core types for convenience
pub use catalog::{Character, CharacterCatalog};
pub use config::{default_banner, default_catalog, BannerConfig, ConfigError};
pub use engine::{MultiPullResult, PityRateEngine, PullResult};
pub use error::{validate_counter, GachaError};
pub use pity::{AdjustedRateTable, BaseWeights, PityConfig};
pub use store::{InMemoryPityStore, JsonPityStore, PityStore, StoreError};
pub use types::{CharacterId, RarityTier, UserId};
