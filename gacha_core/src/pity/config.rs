//! PityConfig - validated pity thresholds

use crate::config::ConfigError;
use crate::types::RarityTier;
use std::collections::BTreeSet;

/// Largest accepted `hard_pity`; statistics walk every pull up to it
pub const MAX_HARD_PITY: u32 = 10_000;

/// Immutable pity parameters
///
/// Invariants checked at construction:
/// - `soft_pity_start < hard_pity <= MAX_HARD_PITY`
/// - at least one high-rarity tier, none of them event-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PityConfig {
    soft_pity_start: u32,
    hard_pity: u32,
    high_rarity_tiers: BTreeSet<RarityTier>,
}

impl PityConfig {
    pub fn new(
        soft_pity_start: u32,
        hard_pity: u32,
        high_rarity_tiers: impl IntoIterator<Item = RarityTier>,
    ) -> Result<Self, ConfigError> {
        if soft_pity_start >= hard_pity {
            return Err(ConfigError::invalid(format!(
                "soft_pity_start ({}) must be below hard_pity ({})",
                soft_pity_start, hard_pity
            )));
        }
        if hard_pity > MAX_HARD_PITY {
            return Err(ConfigError::invalid(format!(
                "hard_pity ({}) exceeds the maximum of {}",
                hard_pity, MAX_HARD_PITY
            )));
        }

        let high_rarity_tiers: BTreeSet<RarityTier> = high_rarity_tiers.into_iter().collect();
        if high_rarity_tiers.is_empty() {
            return Err(ConfigError::invalid("no high-rarity tiers configured"));
        }
        if let Some(tier) = high_rarity_tiers.iter().find(|t| t.is_event_only()) {
            return Err(ConfigError::invalid(format!(
                "{} is event-only and cannot be a pity tier",
                tier
            )));
        }

        Ok(PityConfig {
            soft_pity_start,
            hard_pity,
            high_rarity_tiers,
        })
    }

    pub fn soft_pity_start(&self) -> u32 {
        self.soft_pity_start
    }

    pub fn hard_pity(&self) -> u32 {
        self.hard_pity
    }

    pub fn high_rarity_tiers(&self) -> &BTreeSet<RarityTier> {
        &self.high_rarity_tiers
    }

    /// Check if a tier resets the pity counter
    pub fn is_high_rarity(&self, tier: RarityTier) -> bool {
        self.high_rarity_tiers.contains(&tier)
    }

    /// Soft pity progress for a counter, clamped to [0, 1]
    pub fn progress(&self, counter: u32) -> f64 {
        if counter <= self.soft_pity_start {
            return 0.0;
        }
        if counter >= self.hard_pity {
            return 1.0;
        }
        f64::from(counter - self.soft_pity_start) / f64::from(self.hard_pity - self.soft_pity_start)
    }
}
