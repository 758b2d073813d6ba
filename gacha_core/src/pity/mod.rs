//! Pity system - validated parameters, rate tables and weighted draws
//!
//! A pull's rates depend only on the player's pity counter:
//!
//! - Below `soft_pity_start` the banner's base weights apply unchanged.
//! - Between `soft_pity_start` and `hard_pity` the table is a linear blend
//!   from the base weights toward the hard-pity table:
//!   `rate = base * (1 - progress) + hard * progress`, with
//!   `progress = (counter - soft) / (hard - soft)`.
//! - At `hard_pity` and beyond only high-rarity tiers have weight. They
//!   split 100% in proportion to their base weights.
//!
//! Example (soft 50, hard 100, 61/25/10/3/1):
//! - counter 0: Legendary + Mythic = 4%
//! - counter 75: Legendary + Mythic = 4 * 0.5 + 100 * 0.5 = 52%
//! - counter 100: Legendary 75%, Mythic 25%, everything else 0%

mod config;
mod draw;
mod rates;
mod weights;

pub use config::{PityConfig, MAX_HARD_PITY};
pub use draw::{draw_rarity, pick_tier};
pub use rates::AdjustedRateTable;
pub use weights::BaseWeights;

/// Tolerance used when checking that a table sums to 100
pub const RATE_TOLERANCE: f64 = 1e-6;

/// Check that a total is 100 within tolerance
pub fn sums_to_hundred(total: f64) -> bool {
    (total - 100.0).abs() <= RATE_TOLERANCE
}
