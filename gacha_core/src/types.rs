//! Core types shared across the gacha engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rarity tier of a character, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RarityTier {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
    /// Event-only tier, never part of a regular banner
    Dimensional,
}

impl RarityTier {
    /// Get all tiers in ascending order
    pub fn all() -> &'static [RarityTier] {
        &[
            RarityTier::Common,
            RarityTier::Rare,
            RarityTier::Epic,
            RarityTier::Legendary,
            RarityTier::Mythic,
            RarityTier::Dimensional,
        ]
    }

    /// Tiers that can appear in regular pulls, ascending
    pub fn regular() -> &'static [RarityTier] {
        &[
            RarityTier::Common,
            RarityTier::Rare,
            RarityTier::Epic,
            RarityTier::Legendary,
            RarityTier::Mythic,
        ]
    }

    /// Check if this tier is only obtainable from events
    pub fn is_event_only(&self) -> bool {
        matches!(self, RarityTier::Dimensional)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Rare => "Rare",
            RarityTier::Epic => "Epic",
            RarityTier::Legendary => "Legendary",
            RarityTier::Mythic => "Mythic",
            RarityTier::Dimensional => "Dimensional",
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of a character in the catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub String);

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        CharacterId(s.to_string())
    }
}

impl From<String> for CharacterId {
    fn from(s: String) -> Self {
        CharacterId(s)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a player (a Discord snowflake in production)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        UserId(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
