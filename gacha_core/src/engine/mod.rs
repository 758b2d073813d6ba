//! PityRateEngine - pity-adjusted rates and pulls

mod pull;
mod stats;

pub use pull::{MultiPullResult, PullResult};

use crate::catalog::CharacterCatalog;
use crate::config::{default_banner, BannerConfig, ConfigError};
use crate::error::{validate_counter, GachaError};
use crate::pity::{self, AdjustedRateTable, BaseWeights, PityConfig};
use crate::types::RarityTier;
use rand::Rng;

/// Stateless engine turning a pity counter into draw probabilities
///
/// Built once from validated configuration; every operation afterwards is
/// a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct PityRateEngine {
    weights: BaseWeights,
    config: PityConfig,
    base_table: AdjustedRateTable,
    hard_pity_table: AdjustedRateTable,
}

impl PityRateEngine {
    pub fn new(weights: BaseWeights, config: PityConfig) -> Result<Self, ConfigError> {
        let base_table = AdjustedRateTable::base(&weights);
        let hard_pity_table = AdjustedRateTable::hard_pity(&weights, &config)?;

        Ok(PityRateEngine {
            weights,
            config,
            base_table,
            hard_pity_table,
        })
    }

    /// Build an engine from a raw banner configuration
    pub fn from_banner(banner: BannerConfig) -> Result<Self, ConfigError> {
        let (weights, config) = banner.into_parts()?;
        Self::new(weights, config)
    }

    /// Engine for the standard banner
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::from_banner(default_banner()?)
    }

    pub fn config(&self) -> &PityConfig {
        &self.config
    }

    pub fn base_weights(&self) -> &BaseWeights {
        &self.weights
    }

    /// Rates for a given pity counter
    pub fn calculate_pity_rates(&self, counter: u32) -> AdjustedRateTable {
        if counter < self.config.soft_pity_start() {
            return self.base_table.clone();
        }
        if counter >= self.config.hard_pity() {
            return self.hard_pity_table.clone();
        }
        self.base_table
            .blend(&self.hard_pity_table, self.config.progress(counter))
    }

    /// Rates for a counter coming from an untyped source
    pub fn calculate_pity_rates_checked(&self, counter: i64) -> Result<AdjustedRateTable, GachaError> {
        let counter = validate_counter(counter)?;
        Ok(self.calculate_pity_rates(counter))
    }

    /// Weighted-random rarity draw from a table
    pub fn draw_rarity<R: Rng + ?Sized>(
        &self,
        table: &AdjustedRateTable,
        rng: &mut R,
    ) -> Result<RarityTier, GachaError> {
        pity::draw_rarity(table, rng)
    }

    /// Tiers a pull can land on at any counter
    ///
    /// A high-rarity tier with zero base weight gets no share of the
    /// hard-pity table either, so it is never reachable.
    pub fn reachable_tiers(&self) -> Vec<RarityTier> {
        self.base_table
            .iter()
            .filter(|(tier, rate)| *rate > 0.0 || self.hard_pity_table.get(*tier) > 0.0)
            .map(|(tier, _)| tier)
            .collect()
    }

    /// Check that every reachable tier has at least one character
    pub fn validate_catalog(&self, catalog: &CharacterCatalog) -> Result<(), ConfigError> {
        let empty: Vec<String> = self
            .reachable_tiers()
            .into_iter()
            .filter(|tier| catalog.pool(*tier).is_empty())
            .map(|tier| tier.to_string())
            .collect();

        if empty.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::invalid(format!(
                "reachable tiers with no characters: {}",
                empty.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Character;
    use crate::config::default_catalog;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn standard_engine() -> PityRateEngine {
        let weights = BaseWeights::new(BTreeMap::from([
            (RarityTier::Common, 61.0),
            (RarityTier::Rare, 25.0),
            (RarityTier::Epic, 10.0),
            (RarityTier::Legendary, 3.0),
            (RarityTier::Mythic, 1.0),
        ]))
        .unwrap();
        let config = PityConfig::new(50, 100, [RarityTier::Legendary, RarityTier::Mythic]).unwrap();
        PityRateEngine::new(weights, config).unwrap()
    }

    #[test]
    fn test_below_soft_pity_is_base() {
        let engine = standard_engine();
        let base = AdjustedRateTable::base(engine.base_weights());
        for counter in 0..50 {
            assert_eq!(engine.calculate_pity_rates(counter), base);
        }
    }

    #[test]
    fn test_standard_banner_scenario() {
        let engine = standard_engine();
        let config = engine.config().clone();

        let at_zero = engine.calculate_pity_rates(0);
        assert!((at_zero.high_rarity_rate(&config) - 4.0).abs() < 1e-9);

        let at_75 = engine.calculate_pity_rates(75);
        let high = at_75.high_rarity_rate(&config);
        assert!(high > 4.0 && high < 100.0, "high rate at 75 was {}", high);

        let at_100 = engine.calculate_pity_rates(100);
        assert!((at_100.high_rarity_rate(&config) - 100.0).abs() < 1e-6);
        assert_eq!(at_100.get(RarityTier::Common), 0.0);
        assert_eq!(at_100.get(RarityTier::Rare), 0.0);
        assert_eq!(at_100.get(RarityTier::Epic), 0.0);
    }

    #[test]
    fn test_beyond_hard_pity_stays_guaranteed() {
        let engine = standard_engine();
        assert_eq!(engine.calculate_pity_rates(100), engine.calculate_pity_rates(250));
    }

    #[test]
    fn test_negative_counter_rejected() {
        let engine = standard_engine();
        assert!(matches!(
            engine.calculate_pity_rates_checked(-1),
            Err(GachaError::InvalidArgument(_))
        ));
        assert_eq!(
            engine.calculate_pity_rates_checked(60).unwrap(),
            engine.calculate_pity_rates(60)
        );
    }

    #[test]
    fn test_default_engine() {
        let engine = PityRateEngine::with_defaults().unwrap();
        assert_eq!(engine.config().hard_pity(), 100);
        engine.validate_catalog(&default_catalog().unwrap()).unwrap();
    }

    #[test]
    fn test_validate_catalog_reports_empty_pools() {
        let engine = standard_engine();
        let mut catalog = CharacterCatalog::new();
        catalog.add(Character::new("kaito", "Kaito", RarityTier::Common));

        let err = engine.validate_catalog(&catalog).unwrap_err().to_string();
        assert!(err.contains("Rare"));
        assert!(err.contains("Mythic"));
        assert!(!err.contains("Common"));
    }

    #[test]
    fn test_zero_weight_tier_is_unreachable() {
        let weights = BaseWeights::new(BTreeMap::from([
            (RarityTier::Common, 95.0),
            (RarityTier::Legendary, 5.0),
        ]))
        .unwrap();
        let config = PityConfig::new(10, 20, [RarityTier::Legendary]).unwrap();
        let engine = PityRateEngine::new(weights, config).unwrap();
        assert_eq!(
            engine.reachable_tiers(),
            vec![RarityTier::Common, RarityTier::Legendary]
        );
    }

    #[test]
    fn test_unweighted_high_tier_needs_no_pool() {
        let weights = BaseWeights::new(BTreeMap::from([
            (RarityTier::Common, 96.0),
            (RarityTier::Legendary, 4.0),
        ]))
        .unwrap();
        let config =
            PityConfig::new(10, 20, [RarityTier::Legendary, RarityTier::Mythic]).unwrap();
        let engine = PityRateEngine::new(weights, config).unwrap();
        assert_eq!(engine.calculate_pity_rates(20).get(RarityTier::Mythic), 0.0);
        assert!(!engine.reachable_tiers().contains(&RarityTier::Mythic));

        let mut catalog = CharacterCatalog::new();
        catalog.add(Character::new("kaito", "Kaito", RarityTier::Common));
        catalog.add(Character::new("sora", "Sora", RarityTier::Legendary));
        engine.validate_catalog(&catalog).unwrap();
    }

    proptest! {
        #[test]
        fn prop_rates_sum_to_hundred(counter in 0u32..400) {
            let table = standard_engine().calculate_pity_rates(counter);
            prop_assert!((table.total() - 100.0).abs() < 1e-6);
            prop_assert!(table.iter().all(|(_, rate)| rate >= 0.0));
        }

        #[test]
        fn prop_high_rarity_monotonic(counter in 0u32..120) {
            let engine = standard_engine();
            let config = engine.config().clone();
            let now = engine.calculate_pity_rates(counter).high_rarity_rate(&config);
            let next = engine.calculate_pity_rates(counter + 1).high_rarity_rate(&config);
            prop_assert!(next + 1e-9 >= now);
        }

        #[test]
        fn prop_low_rarity_never_increases(counter in 0u32..120) {
            let engine = standard_engine();
            let now = engine.calculate_pity_rates(counter);
            let next = engine.calculate_pity_rates(counter + 1);
            for tier in [RarityTier::Common, RarityTier::Rare, RarityTier::Epic] {
                prop_assert!(next.get(tier) <= now.get(tier) + 1e-9);
            }
        }

        #[test]
        fn prop_rates_are_pure(counter in 0u32..200) {
            let engine = standard_engine();
            prop_assert_eq!(engine.calculate_pity_rates(counter), engine.calculate_pity_rates(counter));
        }

        #[test]
        fn prop_any_valid_config_sums(soft in 0u32..100, span in 1u32..100, counter in 0u32..300) {
            let weights = BaseWeights::new(BTreeMap::from([
                (RarityTier::Common, 70.0),
                (RarityTier::Rare, 20.0),
                (RarityTier::Epic, 8.5),
                (RarityTier::Mythic, 1.5),
            ]))
            .unwrap();
            let config = PityConfig::new(soft, soft + span, [RarityTier::Epic, RarityTier::Mythic]).unwrap();
            let engine = PityRateEngine::new(weights, config).unwrap();
            prop_assert!(engine.calculate_pity_rates(counter).is_normalized());
        }
    }
}
