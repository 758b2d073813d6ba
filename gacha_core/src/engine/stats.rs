//! Pity statistics derived from the rate curve

use super::PityRateEngine;

impl PityRateEngine {
    /// Chance to reach a high-rarity tier on pull `n` of a fresh pity cycle
    pub fn high_rarity_chance(&self, pull_number: u32) -> f64 {
        self.calculate_pity_rates(pull_number)
            .high_rarity_rate(&self.config)
            / 100.0
    }

    /// Probability that the first high-rarity result lands on each pull
    ///
    /// Index `i` holds the probability for pull `i + 1`. The vector ends at
    /// hard pity, where the remaining probability mass is collected.
    pub fn first_high_rarity_distribution(&self) -> Vec<f64> {
        let hard = self.config.hard_pity();
        let mut survival = 1.0;
        let mut distribution = Vec::with_capacity(hard as usize);

        for pull_number in 1..=hard {
            let chance = self.high_rarity_chance(pull_number).clamp(0.0, 1.0);
            distribution.push(survival * chance);
            survival *= 1.0 - chance;
        }

        distribution
    }

    /// Expected number of pulls until a high-rarity result, starting from 0
    pub fn expected_pulls_to_high_rarity(&self) -> f64 {
        self.first_high_rarity_distribution()
            .iter()
            .enumerate()
            .map(|(i, p)| (i + 1) as f64 * p)
            .sum()
    }

    /// Probability of a high-rarity result within `pulls` pulls of a fresh cycle
    pub fn high_rarity_within(&self, pulls: u32) -> f64 {
        self.first_high_rarity_distribution()
            .iter()
            .take(pulls as usize)
            .sum::<f64>()
            .min(1.0)
    }
}
