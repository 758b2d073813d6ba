//! Banner configuration loading

use super::ConfigError;
use crate::pity::{BaseWeights, PityConfig};
use crate::types::RarityTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Raw banner configuration as written in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    /// Display name of the banner
    #[serde(default = "default_banner_name")]
    pub name: String,
    /// Counter value at which rates start shifting upward
    pub soft_pity_start: u32,
    /// Counter value at which a high-rarity result is guaranteed
    pub hard_pity: u32,
    /// Tiers that reset the pity counter and are guaranteed at hard pity
    #[serde(default = "default_high_rarity_tiers")]
    pub high_rarity_tiers: Vec<RarityTier>,
    /// Base weight per tier, in percent
    pub base_weights: BTreeMap<RarityTier, f64>,
}

fn default_banner_name() -> String {
    "Standard Banner".to_string()
}

fn default_high_rarity_tiers() -> Vec<RarityTier> {
    vec![RarityTier::Legendary, RarityTier::Mythic]
}

impl BannerConfig {
    /// Validate and split into the typed engine inputs
    pub fn into_parts(self) -> Result<(BaseWeights, PityConfig), ConfigError> {
        let weights = BaseWeights::new(self.base_weights)?;
        let config = PityConfig::new(
            self.soft_pity_start,
            self.hard_pity,
            self.high_rarity_tiers,
        )?;
        Ok((weights, config))
    }
}

/// Load a banner configuration from a TOML file
pub fn load_banner_config(path: &Path) -> Result<BannerConfig, ConfigError> {
    let banner: BannerConfig = super::load_toml(path)?;
    log::info!("loaded banner '{}' from {}", banner.name, path.display());
    Ok(banner)
}

/// Load a banner configuration from a TOML string
pub fn parse_banner_config(content: &str) -> Result<BannerConfig, ConfigError> {
    super::parse_toml(content)
}

const DEFAULT_BANNER: &str = include_str!("../../config/banner.toml");

/// The standard banner compiled into the crate
pub fn default_banner() -> Result<BannerConfig, ConfigError> {
    parse_banner_config(DEFAULT_BANNER)
}
