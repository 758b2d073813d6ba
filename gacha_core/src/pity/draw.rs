//! Weighted rarity selection

use super::AdjustedRateTable;
use crate::error::GachaError;
use crate::types::RarityTier;
use rand::Rng;

/// Draw a rarity from a rate table
///
/// Rolls a uniform value in [0, 100) and walks the cumulative
/// distribution in ascending tier order, so a fixed RNG seed always
/// yields the same tier.
pub fn draw_rarity<R: Rng + ?Sized>(
    table: &AdjustedRateTable,
    rng: &mut R,
) -> Result<RarityTier, GachaError> {
    if !table.is_normalized() {
        return Err(GachaError::misconfigured(format!(
            "rate table sums to {} instead of 100",
            table.total()
        )));
    }

    let roll = rng.gen_range(0.0..100.0);
    pick_tier(table, roll)
        .ok_or_else(|| GachaError::misconfigured("rate table has no tier with positive weight"))
}

/// Map a roll in [0, 100) onto the cumulative distribution
///
/// Zero-weight tiers are never returned. Rounding slack above the last
/// cumulative bound falls through to the highest weighted tier.
pub fn pick_tier(table: &AdjustedRateTable, roll: f64) -> Option<RarityTier> {
    let mut cumulative = 0.0;
    let mut last_weighted = None;

    for (tier, rate) in table.iter() {
        if rate <= 0.0 {
            continue;
        }
        cumulative += rate;
        last_weighted = Some(tier);
        if roll < cumulative {
            return Some(tier);
        }
    }

    last_weighted
}
