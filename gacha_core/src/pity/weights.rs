//! BaseWeights - validated banner base rates

use super::sums_to_hundred;
use crate::config::ConfigError;
use crate::types::RarityTier;
use std::collections::BTreeMap;

/// Base weight per rarity tier, in percent, summing to 100
#[derive(Debug, Clone, PartialEq)]
pub struct BaseWeights {
    weights: BTreeMap<RarityTier, f64>,
}

impl BaseWeights {
    /// Validate a weight map
    ///
    /// Missing regular tiers are treated as weight 0.
    pub fn new(weights: BTreeMap<RarityTier, f64>) -> Result<Self, ConfigError> {
        for (tier, weight) in &weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ConfigError::invalid(format!(
                    "base weight for {} must be a non-negative number, got {}",
                    tier, weight
                )));
            }
            if tier.is_event_only() && *weight > 0.0 {
                return Err(ConfigError::invalid(format!(
                    "{} is event-only and cannot have a base weight",
                    tier
                )));
            }
        }

        let total: f64 = weights.values().sum();
        if !sums_to_hundred(total) {
            return Err(ConfigError::invalid(format!(
                "base weights must sum to 100, got {}",
                total
            )));
        }

        let weights = RarityTier::regular()
            .iter()
            .map(|tier| (*tier, weights.get(tier).copied().unwrap_or(0.0)))
            .collect();

        Ok(BaseWeights { weights })
    }

    /// Weight of a tier (0 for tiers not in the banner)
    pub fn get(&self, tier: RarityTier) -> f64 {
        self.weights.get(&tier).copied().unwrap_or(0.0)
    }

    /// Iterate weights in ascending tier order
    pub fn iter(&self) -> impl Iterator<Item = (RarityTier, f64)> + '_ {
        self.weights.iter().map(|(t, w)| (*t, *w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_weights() {
        let weights = BaseWeights::new(BTreeMap::from([
            (RarityTier::Common, 61.0),
            (RarityTier::Rare, 25.0),
            (RarityTier::Epic, 10.0),
            (RarityTier::Legendary, 3.0),
            (RarityTier::Mythic, 1.0),
        ]))
        .unwrap();

        assert!((weights.get(RarityTier::Rare) - 25.0).abs() < f64::EPSILON);
        assert!((weights.get(RarityTier::Dimensional) - 0.0).abs() < f64::EPSILON);
        assert_eq!(weights.iter().count(), RarityTier::regular().len());
    }

    #[test]
    fn test_missing_tiers_are_zero() {
        let weights = BaseWeights::new(BTreeMap::from([
            (RarityTier::Common, 90.0),
            (RarityTier::Mythic, 10.0),
        ]))
        .unwrap();
        assert!((weights.get(RarityTier::Epic) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reject_bad_total() {
        let result = BaseWeights::new(BTreeMap::from([
            (RarityTier::Common, 60.0),
            (RarityTier::Rare, 25.0),
        ]));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_reject_negative_weight() {
        let result = BaseWeights::new(BTreeMap::from([
            (RarityTier::Common, 110.0),
            (RarityTier::Rare, -10.0),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_event_only_weight() {
        let result = BaseWeights::new(BTreeMap::from([
            (RarityTier::Common, 99.0),
            (RarityTier::Dimensional, 1.0),
        ]));
        assert!(result.is_err());
    }
}
