//! Character catalog loading

use super::ConfigError;
use crate::catalog::{Character, CharacterCatalog};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for character definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharactersConfig {
    pub characters: Vec<Character>,
}

fn build_catalog(config: CharactersConfig) -> Result<CharacterCatalog, ConfigError> {
    let mut catalog = CharacterCatalog::new();
    for character in config.characters {
        let id = character.id.clone();
        if !catalog.add(character) {
            return Err(ConfigError::invalid(format!("duplicate character id '{}'", id)));
        }
    }
    Ok(catalog)
}

/// Load a character catalog from a TOML file
pub fn load_character_catalog(path: &Path) -> Result<CharacterCatalog, ConfigError> {
    let config: CharactersConfig = super::load_toml(path)?;
    let catalog = build_catalog(config)?;
    log::info!("loaded {} characters from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load a character catalog from a TOML string
pub fn parse_character_catalog(content: &str) -> Result<CharacterCatalog, ConfigError> {
    let config: CharactersConfig = super::parse_toml(content)?;
    build_catalog(config)
}

const DEFAULT_ROSTER: &str = include_str!("../../config/characters.toml");

/// The character roster compiled into the crate
pub fn default_catalog() -> Result<CharacterCatalog, ConfigError> {
    parse_character_catalog(DEFAULT_ROSTER)
}
