//! AdjustedRateTable - per-pull draw probabilities

use super::{sums_to_hundred, BaseWeights, PityConfig};
use crate::config::ConfigError;
use crate::types::RarityTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Probability (in percent) of each tier for one pull
///
/// Iteration is always in ascending tier order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedRateTable {
    rates: BTreeMap<RarityTier, f64>,
}

impl AdjustedRateTable {
    /// Build a table from raw rates without validation
    pub fn from_rates(rates: BTreeMap<RarityTier, f64>) -> Self {
        AdjustedRateTable { rates }
    }

    /// The unmodified base table
    pub fn base(weights: &BaseWeights) -> Self {
        AdjustedRateTable {
            rates: weights.iter().collect(),
        }
    }

    /// The hard-pity table: high tiers share 100% by their base weights
    pub fn hard_pity(weights: &BaseWeights, config: &PityConfig) -> Result<Self, ConfigError> {
        let high_total: f64 = config
            .high_rarity_tiers()
            .iter()
            .map(|t| weights.get(*t))
            .sum();

        if high_total <= 0.0 {
            return Err(ConfigError::invalid(
                "high-rarity tiers have no base weight to guarantee",
            ));
        }

        let rates = weights
            .iter()
            .map(|(tier, weight)| {
                let rate = if config.is_high_rarity(tier) {
                    weight / high_total * 100.0
                } else {
                    0.0
                };
                (tier, rate)
            })
            .collect();

        Ok(AdjustedRateTable { rates })
    }

    /// Linear blend toward `target`; `progress` is clamped to [0, 1]
    pub fn blend(&self, target: &AdjustedRateTable, progress: f64) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let rates = self
            .rates
            .keys()
            .chain(target.rates.keys())
            .map(|tier| {
                let rate = self.get(*tier) * (1.0 - progress) + target.get(*tier) * progress;
                (*tier, rate.max(0.0))
            })
            .collect();
        AdjustedRateTable { rates }
    }

    /// Rate of a tier (0 if absent)
    pub fn get(&self, tier: RarityTier) -> f64 {
        self.rates.get(&tier).copied().unwrap_or(0.0)
    }

    /// Iterate rates in ascending tier order
    pub fn iter(&self) -> impl Iterator<Item = (RarityTier, f64)> + '_ {
        self.rates.iter().map(|(t, r)| (*t, *r))
    }

    /// Sum of all rates
    pub fn total(&self) -> f64 {
        self.rates.values().sum()
    }

    /// Combined rate of the configured high-rarity tiers
    pub fn high_rarity_rate(&self, config: &PityConfig) -> f64 {
        config.high_rarity_tiers().iter().map(|t| self.get(*t)).sum()
    }

    /// Check that the table is a valid distribution
    pub fn is_normalized(&self) -> bool {
        self.rates.values().all(|r| *r >= 0.0) && sums_to_hundred(self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> (BaseWeights, PityConfig) {
        let weights = BaseWeights::new(BTreeMap::from([
            (RarityTier::Common, 61.0),
            (RarityTier::Rare, 25.0),
            (RarityTier::Epic, 10.0),
            (RarityTier::Legendary, 3.0),
            (RarityTier::Mythic, 1.0),
        ]))
        .unwrap();
        let config = PityConfig::new(50, 100, [RarityTier::Legendary, RarityTier::Mythic]).unwrap();
        (weights, config)
    }

    #[test]
    fn test_base_table() {
        let (weights, config) = standard();
        let table = AdjustedRateTable::base(&weights);
        assert!(table.is_normalized());
        assert!((table.high_rarity_rate(&config) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_hard_pity_table_split() {
        let (weights, config) = standard();
        let table = AdjustedRateTable::hard_pity(&weights, &config).unwrap();

        // Legendary:Mythic keeps its 3:1 ratio
        assert!((table.get(RarityTier::Legendary) - 75.0).abs() < 1e-9);
        assert!((table.get(RarityTier::Mythic) - 25.0).abs() < 1e-9);
        assert_eq!(table.get(RarityTier::Common), 0.0);
        assert_eq!(table.get(RarityTier::Rare), 0.0);
        assert_eq!(table.get(RarityTier::Epic), 0.0);
        assert!(table.is_normalized());
    }

    #[test]
    fn test_hard_pity_needs_weight() {
        let weights = BaseWeights::new(BTreeMap::from([(RarityTier::Common, 100.0)])).unwrap();
        let config = PityConfig::new(1, 2, [RarityTier::Mythic]).unwrap();
        assert!(AdjustedRateTable::hard_pity(&weights, &config).is_err());
    }

    #[test]
    fn test_blend_midpoint() {
        let (weights, config) = standard();
        let base = AdjustedRateTable::base(&weights);
        let hard = AdjustedRateTable::hard_pity(&weights, &config).unwrap();
        let half = base.blend(&hard, 0.5);

        // Common: 61 * 0.5 + 0 * 0.5
        assert!((half.get(RarityTier::Common) - 30.5).abs() < 1e-9);
        // Legendary: 3 * 0.5 + 75 * 0.5
        assert!((half.get(RarityTier::Legendary) - 39.0).abs() < 1e-9);
        assert!((half.high_rarity_rate(&config) - 52.0).abs() < 1e-9);
        assert!(half.is_normalized());
    }

    #[test]
    fn test_blend_endpoints() {
        let (weights, config) = standard();
        let base = AdjustedRateTable::base(&weights);
        let hard = AdjustedRateTable::hard_pity(&weights, &config).unwrap();
        assert_eq!(base.blend(&hard, 0.0), base);
        assert_eq!(base.blend(&hard, 1.0), hard);
        assert_eq!(base.blend(&hard, 7.0), hard);
    }

    #[test]
    fn test_unnormalized_table() {
        let table = AdjustedRateTable::from_rates(BTreeMap::from([
            (RarityTier::Common, 50.0),
            (RarityTier::Rare, 25.0),
        ]));
        assert!(!table.is_normalized());
    }
}
