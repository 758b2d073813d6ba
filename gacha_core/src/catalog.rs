//! CharacterCatalog - rarity to character pool mapping

use crate::error::GachaError;
use crate::types::{CharacterId, RarityTier};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A pullable character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub rarity: RarityTier,
    /// Series or faction the character belongs to
    #[serde(default)]
    pub series: Option<String>,
}

impl Character {
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>, rarity: RarityTier) -> Self {
        Character {
            id: id.into(),
            name: name.into(),
            rarity,
            series: None,
        }
    }
}

/// Static catalog of characters grouped by rarity
#[derive(Debug, Clone, Default)]
pub struct CharacterCatalog {
    pools: BTreeMap<RarityTier, Vec<Character>>,
}

impl CharacterCatalog {
    pub fn new() -> Self {
        CharacterCatalog {
            pools: BTreeMap::new(),
        }
    }

    /// Add a character to the pool of its rarity
    ///
    /// Returns false if a character with the same id is already present.
    pub fn add(&mut self, character: Character) -> bool {
        if self.get(&character.id).is_some() {
            return false;
        }
        self.pools
            .entry(character.rarity)
            .or_default()
            .push(character);
        true
    }

    /// Characters of a given rarity
    pub fn pool(&self, rarity: RarityTier) -> &[Character] {
        self.pools.get(&rarity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up a character by id
    pub fn get(&self, id: &CharacterId) -> Option<&Character> {
        self.pools.values().flatten().find(|c| &c.id == id)
    }

    /// Total number of characters
    pub fn len(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Uniformly pick one character of the given rarity
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rarity: RarityTier,
        rng: &mut R,
    ) -> Result<&Character, GachaError> {
        self.pool(rarity)
            .choose(rng)
            .ok_or(GachaError::EmptyPool(rarity))
    }
}
