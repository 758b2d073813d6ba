//! Integration test: Load banner -> Pull -> Commit pity -> Reload
//!
//! Validates the full flow a command handler goes through for a pull.

use gacha_core::config::{load_banner_config, parse_character_catalog};
use gacha_core::{
    CharacterCatalog, GachaError, InMemoryPityStore, JsonPityStore, PityRateEngine, PityStore,
    RarityTier, UserId,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::sync::Arc;
use std::thread;

const BANNER: &str = r#"
name = "Integration Banner"
soft_pity_start = 20
hard_pity = 30
high_rarity_tiers = ["legendary", "mythic"]

[base_weights]
common = 70
rare = 20
epic = 9
legendary = 0.8
mythic = 0.2
"#;

const ROSTER: &str = r#"
[[characters]]
id = "kaito"
name = "Kaito"
rarity = "common"

[[characters]]
id = "aiko"
name = "Aiko"
rarity = "rare"

[[characters]]
id = "shion"
name = "Shion"
rarity = "epic"

[[characters]]
id = "sora"
name = "Sora"
rarity = "legendary"

[[characters]]
id = "veyra"
name = "Veyra"
rarity = "mythic"
"#;

fn setup(dir: &std::path::Path) -> (PityRateEngine, CharacterCatalog) {
    let banner_path = dir.join("banner.toml");
    fs::write(&banner_path, BANNER).unwrap();

    let banner = load_banner_config(&banner_path).unwrap();
    assert_eq!(banner.name, "Integration Banner");
    let engine = PityRateEngine::from_banner(banner).unwrap();

    let catalog = parse_character_catalog(ROSTER).unwrap();
    engine.validate_catalog(&catalog).unwrap();
    (engine, catalog)
}

#[test]
fn test_pull_commit_reload() {
    let dir = tempfile::tempdir().unwrap();
    let (engine, catalog) = setup(dir.path());
    let pity_path = dir.path().join("pity.json");
    let user = UserId::from("314159265358979323");
    let mut rng = ChaCha8Rng::seed_from_u64(1234);

    let mut expected_counter = 0;
    let mut misses = 0;
    {
        let store = JsonPityStore::open(&pity_path).unwrap();
        for _ in 0..300 {
            let result = engine.execute_pull(&user, &store, &catalog, &mut rng).unwrap();
            assert_eq!(result.pity_before, expected_counter);
            assert_eq!(result.character.rarity, result.rarity);

            if engine.config().is_high_rarity(result.rarity) {
                misses = 0;
            } else {
                misses += 1;
            }
            assert!(misses < 30, "hard pity breached");

            // Caller commits the counter alongside the result
            store.set(&user, result.new_counter).unwrap();
            expected_counter = result.new_counter;
        }
    }

    let reopened = JsonPityStore::open(&pity_path).unwrap();
    assert_eq!(reopened.get(&user).unwrap(), expected_counter);
}

#[test]
fn test_hard_pity_from_persisted_counter() {
    let dir = tempfile::tempdir().unwrap();
    let (engine, catalog) = setup(dir.path());
    let pity_path = dir.path().join("pity.json");
    fs::write(&pity_path, r#"{ "veteran": 29 }"#).unwrap();

    let store = JsonPityStore::open(&pity_path).unwrap();
    let user = UserId::from("veteran");
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    let result = engine.pull_and_commit(&user, &store, &catalog, &mut rng).unwrap();
    assert!(matches!(result.rarity, RarityTier::Legendary | RarityTier::Mythic));
    assert!(result.hard_pity_triggered);
    assert_eq!(store.get(&user).unwrap(), 0);
}

#[test]
fn test_ten_pull_commit() {
    let dir = tempfile::tempdir().unwrap();
    let (engine, catalog) = setup(dir.path());
    let store = InMemoryPityStore::new();
    let user = UserId::from("whale");
    store.set(&user, 25).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let multi = engine
        .execute_multi_pull(&user, 10, &store, &catalog, &mut rng)
        .unwrap();
    store.set(&user, multi.final_counter).unwrap();

    // 25 going in means the fifth pull at the latest is guaranteed
    assert!(multi.pulls[..5]
        .iter()
        .any(|p| engine.config().is_high_rarity(p.rarity)));
    assert_eq!(store.get(&user).unwrap(), multi.final_counter);
}

#[test]
fn test_concurrent_pulls_same_user() {
    let dir = tempfile::tempdir().unwrap();
    let (engine, catalog) = setup(dir.path());
    let engine = Arc::new(engine);
    let catalog = Arc::new(catalog);
    let store = Arc::new(InMemoryPityStore::new());
    let user = UserId::from("spammer");

    // Each thread mixes single pulls with ten-pulls; every commit is
    // recorded as (counter before, counter after)
    let handles: Vec<_> = (0..4)
        .map(|seed| {
            let engine = Arc::clone(&engine);
            let catalog = Arc::clone(&catalog);
            let store = Arc::clone(&store);
            let user = user.clone();
            thread::spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                (0..100)
                    .map(|i| {
                        if i % 5 == 0 {
                            let multi = engine
                                .multi_pull_and_commit(&user, 10, store.as_ref(), &catalog, &mut rng)
                                .unwrap();
                            (multi.pulls[0].pity_before, multi.final_counter)
                        } else {
                            let pull = engine
                                .pull_and_commit(&user, store.as_ref(), &catalog, &mut rng)
                                .unwrap();
                            (pull.pity_before, pull.new_counter)
                        }
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let commits: Vec<(u32, u32)> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(commits.len(), 400);

    // Serialized commits form one chain 0 -> ... -> final, so every counter a
    // commit started from was produced by exactly one earlier commit (or is
    // the initial 0). A lost update would break this multiset equality.
    let final_counter = store.get(&user).unwrap();
    let mut befores: Vec<u32> = commits.iter().map(|(before, _)| *before).collect();
    let mut afters: Vec<u32> = commits.iter().map(|(_, after)| *after).collect();
    afters.push(0);
    let last = afters.iter().position(|c| *c == final_counter).unwrap();
    afters.swap_remove(last);

    befores.sort_unstable();
    afters.sort_unstable();
    assert_eq!(befores, afters);
}

#[test]
fn test_failed_save_keeps_pity() {
    let dir = tempfile::tempdir().unwrap();
    let (engine, catalog) = setup(dir.path());
    let snapshots = dir.path().join("snapshots");
    fs::create_dir(&snapshots).unwrap();

    let store = JsonPityStore::open(snapshots.join("pity.json")).unwrap();
    let user = UserId::from("alice");
    store.set(&user, 29).unwrap();
    fs::remove_dir_all(&snapshots).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let result = engine.pull_and_commit(&user, &store, &catalog, &mut rng);
    assert!(matches!(result, Err(GachaError::Store(_))));
    assert_eq!(store.get(&user).unwrap(), 29);

    // Once the snapshot is writable again the guarantee is still owed
    fs::create_dir(&snapshots).unwrap();
    let result = engine.pull_and_commit(&user, &store, &catalog, &mut rng).unwrap();
    assert!(result.hard_pity_triggered);
    assert_eq!(store.get(&user).unwrap(), 0);
}

#[test]
fn test_empty_pool_surfaces_error() {
    let dir = tempfile::tempdir().unwrap();
    let (engine, _) = setup(dir.path());
    let catalog = parse_character_catalog(
        r#"
[[characters]]
id = "kaito"
name = "Kaito"
rarity = "common"
"#,
    )
    .unwrap();

    assert!(engine.validate_catalog(&catalog).is_err());

    let store = InMemoryPityStore::new();
    let user = UserId::from("unlucky");
    store.set(&user, 29).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let result = engine.execute_pull(&user, &store, &catalog, &mut rng);
    assert!(matches!(result, Err(GachaError::EmptyPool(_))));
}
