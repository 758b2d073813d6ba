//! Pull execution
//!
//! Off-by-one convention: a pull is evaluated at its pull number, i.e.
//! `calculate_pity_rates(counter + 1)`. With `hard_pity = 100`, a player
//! holding counter 99 is making their 100th pull without a high-rarity
//! result and is guaranteed one.

use super::PityRateEngine;
use crate::catalog::{Character, CharacterCatalog};
use crate::error::GachaError;
use crate::store::{PityStore, StoreError};
use crate::types::{RarityTier, UserId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome of a single pull
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullResult {
    pub character: Character,
    pub rarity: RarityTier,
    /// Counter going into the pull
    pub pity_before: u32,
    /// Counter the caller should commit
    pub new_counter: u32,
    /// Whether the pull was made at the hard-pity threshold
    pub hard_pity_triggered: bool,
}

/// Outcome of several pulls made back to back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPullResult {
    pub pulls: Vec<PullResult>,
    /// Counter after the last pull
    pub final_counter: u32,
}

impl MultiPullResult {
    /// Highest rarity among the pulls
    pub fn best_rarity(&self) -> Option<RarityTier> {
        self.pulls.iter().map(|p| p.rarity).max()
    }

    /// Number of pulls that landed on the given tier
    pub fn count(&self, rarity: RarityTier) -> usize {
        self.pulls.iter().filter(|p| p.rarity == rarity).count()
    }
}

impl PityRateEngine {
    /// Counter value that follows a pull of the given rarity
    pub fn next_counter(&self, counter: u32, rarity: RarityTier) -> u32 {
        if self.config.is_high_rarity(rarity) {
            0
        } else {
            counter.saturating_add(1)
        }
    }

    /// Perform one pull for a known counter value
    pub fn pull_with_counter<R: Rng + ?Sized>(
        &self,
        counter: u32,
        catalog: &CharacterCatalog,
        rng: &mut R,
    ) -> Result<PullResult, GachaError> {
        let pull_number = counter.saturating_add(1);
        let table = self.calculate_pity_rates(pull_number);
        let rarity = self.draw_rarity(&table, rng)?;
        let character = catalog.sample(rarity, rng)?.clone();
        let new_counter = self.next_counter(counter, rarity);
        let hard_pity_triggered = pull_number >= self.config.hard_pity();

        if hard_pity_triggered {
            log::info!(
                "hard pity reached at pull {}: {} ({})",
                pull_number,
                character.name,
                rarity
            );
        }

        Ok(PullResult {
            character,
            rarity,
            pity_before: counter,
            new_counter,
            hard_pity_triggered,
        })
    }

    /// Perform one pull for a user
    ///
    /// Reads the counter from `store` but does not write it back; the
    /// caller commits `new_counter` together with the pulled character.
    pub fn execute_pull<S, R>(
        &self,
        user: &UserId,
        store: &S,
        catalog: &CharacterCatalog,
        rng: &mut R,
    ) -> Result<PullResult, GachaError>
    where
        S: PityStore + ?Sized,
        R: Rng + ?Sized,
    {
        let counter = store.get(user)?;
        let result = self.pull_with_counter(counter, catalog, rng)?;
        log::debug!(
            "pull for {}: pity {} -> {} ({})",
            user,
            result.pity_before,
            result.new_counter,
            result.rarity
        );
        Ok(result)
    }

    /// Perform `count` pulls in a row for a known counter value
    pub fn multi_pull_with_counter<R: Rng + ?Sized>(
        &self,
        counter: u32,
        count: usize,
        catalog: &CharacterCatalog,
        rng: &mut R,
    ) -> Result<MultiPullResult, GachaError> {
        if count == 0 {
            return Err(GachaError::invalid_argument("pull count must be at least 1"));
        }

        let mut counter = counter;
        let mut pulls = Vec::with_capacity(count);
        for _ in 0..count {
            let result = self.pull_with_counter(counter, catalog, rng)?;
            counter = result.new_counter;
            pulls.push(result);
        }

        Ok(MultiPullResult {
            pulls,
            final_counter: counter,
        })
    }

    /// Perform `count` pulls in a row for a user
    ///
    /// The counter is threaded through every pull in memory. Nothing is
    /// written to `store`; an error on any pull discards the whole batch.
    pub fn execute_multi_pull<S, R>(
        &self,
        user: &UserId,
        count: usize,
        store: &S,
        catalog: &CharacterCatalog,
        rng: &mut R,
    ) -> Result<MultiPullResult, GachaError>
    where
        S: PityStore + ?Sized,
        R: Rng + ?Sized,
    {
        let counter = store.get(user)?;
        let result = self.multi_pull_with_counter(counter, count, catalog, rng)?;
        log::debug!("{} pulls for {}: final pity {}", count, user, result.final_counter);
        Ok(result)
    }

    /// Pull and commit the new counter under the store's per-user serialization
    pub fn pull_and_commit<S, R>(
        &self,
        user: &UserId,
        store: &S,
        catalog: &CharacterCatalog,
        rng: &mut R,
    ) -> Result<PullResult, GachaError>
    where
        S: PityStore + ?Sized,
        R: Rng + ?Sized,
    {
        commit_with(user, store, |counter| {
            let result = self.pull_with_counter(counter, catalog, &mut *rng)?;
            let next = result.new_counter;
            Ok((result, next))
        })
    }

    /// Several pulls committed as one update; a failed pull commits nothing
    pub fn multi_pull_and_commit<S, R>(
        &self,
        user: &UserId,
        count: usize,
        store: &S,
        catalog: &CharacterCatalog,
        rng: &mut R,
    ) -> Result<MultiPullResult, GachaError>
    where
        S: PityStore + ?Sized,
        R: Rng + ?Sized,
    {
        let result = commit_with(user, store, |counter| {
            let result = self.multi_pull_with_counter(counter, count, catalog, &mut *rng)?;
            let next = result.final_counter;
            Ok((result, next))
        })?;
        log::debug!("{} pulls for {}: final pity {}", count, user, result.final_counter);
        Ok(result)
    }
}

/// Run `pull` inside `store.update`, committing its counter only on success
fn commit_with<S, T>(
    user: &UserId,
    store: &S,
    mut pull: impl FnMut(u32) -> Result<(T, u32), GachaError>,
) -> Result<T, GachaError>
where
    S: PityStore + ?Sized,
{
    let mut outcome = None;
    store.update(user, &mut |counter| match pull(counter) {
        Ok((result, next)) => {
            outcome = Some(Ok(result));
            next
        }
        Err(e) => {
            outcome = Some(Err(e));
            counter
        }
    })?;

    outcome.unwrap_or(Err(GachaError::Store(StoreError::Poisoned(user.clone()))))
}
