//! Pull simulation utilities

use gacha_core::{CharacterCatalog, GachaError, PityRateEngine, RarityTier};
use rand::Rng;
use std::collections::BTreeMap;

/// Result of simulating many pulls from a fresh pity counter
pub struct PullSimulation {
    pub total_pulls: u32,
    pub tier_counts: BTreeMap<RarityTier, u32>,
    pub high_rarity_hits: u32,
    pub hard_pity_hits: u32,
    /// Longest run of pulls without a high-rarity result
    pub longest_drought: u32,
}

impl PullSimulation {
    /// Simulate `pulls` consecutive pulls for one player
    pub fn run(
        engine: &PityRateEngine,
        catalog: &CharacterCatalog,
        pulls: u32,
        rng: &mut impl Rng,
    ) -> Result<Self, GachaError> {
        let mut result = PullSimulation {
            total_pulls: 0,
            tier_counts: BTreeMap::new(),
            high_rarity_hits: 0,
            hard_pity_hits: 0,
            longest_drought: 0,
        };

        let mut counter = 0;
        for _ in 0..pulls {
            let pull = engine.pull_with_counter(counter, catalog, rng)?;

            result.total_pulls += 1;
            *result.tier_counts.entry(pull.rarity).or_insert(0) += 1;
            if engine.config().is_high_rarity(pull.rarity) {
                result.high_rarity_hits += 1;
            }
            if pull.hard_pity_triggered {
                result.hard_pity_hits += 1;
            }
            result.longest_drought = result.longest_drought.max(pull.new_counter);

            counter = pull.new_counter;
        }

        Ok(result)
    }

    /// Observed rate of a tier in percent
    pub fn observed_rate(&self, tier: RarityTier) -> f64 {
        if self.total_pulls > 0 {
            f64::from(self.tier_counts.get(&tier).copied().unwrap_or(0))
                / f64::from(self.total_pulls)
                * 100.0
        } else {
            0.0
        }
    }

    /// Average pulls per high-rarity result
    pub fn pulls_per_high_rarity(&self) -> f64 {
        if self.high_rarity_hits > 0 {
            f64::from(self.total_pulls) / f64::from(self.high_rarity_hits)
        } else {
            0.0
        }
    }
}
