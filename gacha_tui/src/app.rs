//! Application state

use crate::logger::LogBuffer;
use crate::simulation::PullSimulation;
use clap::Parser;
use gacha_core::config::{load_banner_config, load_character_catalog};
use gacha_core::{
    default_banner, default_catalog, AdjustedRateTable, CharacterCatalog, ConfigError,
    GachaError, InMemoryPityStore, JsonPityStore, PityRateEngine, PityStore, PullResult,
    RarityTier, StoreError, UserId,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

const HISTORY_LIMIT: usize = 200;
const SIMULATION_PULLS: u32 = 10_000;

/// Startup error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gacha_tui")]
#[command(about = "Explore pity rates and simulate pulls", long_about = None)]
pub struct Options {
    /// Banner configuration (TOML); the standard banner if omitted
    #[arg(short, long)]
    pub banner: Option<PathBuf>,

    /// Character roster (TOML); the built-in roster if omitted
    #[arg(short, long)]
    pub roster: Option<PathBuf>,

    /// Pity snapshot (JSON) to load and write through; in-memory if omitted
    #[arg(short, long = "pity")]
    pub pity_file: Option<PathBuf>,

    /// User whose pity counter is used
    #[arg(short, long, default_value = "player")]
    pub user: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Pull,
    Rates,
    Stats,
    Log,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Pull, Tab::Rates, Tab::Stats, Tab::Log, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Pull => "Pull",
            Tab::Rates => "Rates",
            Tab::Stats => "Stats",
            Tab::Log => "Log",
            Tab::Help => "Help",
        }
    }
}

pub struct App {
    pub current_tab: Tab,
    /// Tab to return to when help is toggled off
    pub previous_tab: Tab,
    pub engine: PityRateEngine,
    pub catalog: CharacterCatalog,
    pub store: Box<dyn PityStore>,
    pub user: UserId,
    pub banner_name: String,
    pub history: Vec<PullResult>,
    pub tier_counts: BTreeMap<RarityTier, u32>,
    pub total_pulls: u32,
    pub rng: ChaCha8Rng,
    pub preview_counter: i64,
    pub simulation: Option<PullSimulation>,
    /// First high-rarity probability per pull of a fresh cycle
    pub odds: Vec<f64>,
    pub status: Option<String>,
    pub logs: LogBuffer,
    pub history_scroll: usize,
    pub log_scroll: usize,
}

impl App {
    pub fn new(options: Options, logs: LogBuffer) -> Result<Self, AppError> {
        let banner = match &options.banner {
            Some(path) => load_banner_config(path)?,
            None => default_banner()?,
        };
        let banner_name = banner.name.clone();
        let engine = PityRateEngine::from_banner(banner)?;

        let catalog = match &options.roster {
            Some(path) => load_character_catalog(path)?,
            None => default_catalog()?,
        };
        engine.validate_catalog(&catalog)?;

        let store: Box<dyn PityStore> = match &options.pity_file {
            Some(path) => Box::new(JsonPityStore::open(path.clone())?),
            None => Box::new(InMemoryPityStore::new()),
        };

        let user = UserId::from(options.user);
        let preview_counter = i64::from(store.get(&user)?);

        log::info!(
            "banner '{}' ready: soft pity {}, hard pity {}, {} characters",
            banner_name,
            engine.config().soft_pity_start(),
            engine.config().hard_pity(),
            catalog.len()
        );

        let odds = engine.first_high_rarity_distribution();

        Ok(App {
            current_tab: Tab::Pull,
            previous_tab: Tab::Pull,
            engine,
            catalog,
            store,
            user,
            banner_name,
            history: Vec::new(),
            tier_counts: BTreeMap::new(),
            total_pulls: 0,
            rng: ChaCha8Rng::from_entropy(),
            preview_counter,
            simulation: None,
            odds,
            status: None,
            logs,
            history_scroll: 0,
            log_scroll: 0,
        })
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(idx + 1) % tabs.len()];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(idx + tabs.len() - 1) % tabs.len()];
    }

    pub fn set_tab(&mut self, index: usize) {
        if let Some(tab) = Tab::all().get(index) {
            self.current_tab = *tab;
        }
    }

    pub fn toggle_help(&mut self) {
        if self.current_tab == Tab::Help {
            self.current_tab = self.previous_tab;
        } else {
            self.previous_tab = self.current_tab;
            self.current_tab = Tab::Help;
        }
    }

    /// Expected pulls until a high-rarity result from a fresh cycle
    pub fn expected_pulls(&self) -> f64 {
        self.odds
            .iter()
            .enumerate()
            .map(|(i, p)| (i + 1) as f64 * p)
            .sum()
    }

    /// Chance of a high-rarity result within `pulls` pulls of a fresh cycle
    pub fn high_rarity_within(&self, pulls: u32) -> f64 {
        self.odds
            .iter()
            .take(pulls as usize)
            .sum::<f64>()
            .min(1.0)
    }

    /// Current pity counter of the active user
    pub fn current_pity(&self) -> u32 {
        self.store.get(&self.user).unwrap_or(0)
    }

    /// Rates the next pull will use
    pub fn next_pull_rates(&self) -> AdjustedRateTable {
        self.engine
            .calculate_pity_rates(self.current_pity().saturating_add(1))
    }

    /// Rates at the counter shown in the Rates tab
    pub fn preview_rates(&self) -> Result<AdjustedRateTable, GachaError> {
        self.engine.calculate_pity_rates_checked(self.preview_counter)
    }

    /// Single pull, committed to the store
    pub fn pull_once(&mut self) {
        let result = self.engine.pull_and_commit(
            &self.user,
            self.store.as_ref(),
            &self.catalog,
            &mut self.rng,
        );
        match result {
            Ok(pull) => {
                self.status = Some(describe(&pull));
                self.record(pull);
            }
            Err(e) => self.report(e),
        }
    }

    /// Ten pulls, committed as one update once all of them succeed
    pub fn pull_ten(&mut self) {
        let result = self.engine.multi_pull_and_commit(
            &self.user,
            10,
            self.store.as_ref(),
            &self.catalog,
            &mut self.rng,
        );

        match result {
            Ok(multi) => {
                let best = multi
                    .best_rarity()
                    .map(|r| r.to_string())
                    .unwrap_or_default();
                self.status = Some(format!("10 pulls, best: {}", best));
                for pull in multi.pulls {
                    self.record(pull);
                }
            }
            Err(e) => self.report(e),
        }
    }

    /// Reset the active user's pity counter
    pub fn reset_pity(&mut self) {
        match self.store.set(&self.user, 0) {
            Ok(()) => {
                log::info!("pity for {} reset", self.user);
                self.status = Some("Pity reset".to_string());
            }
            Err(e) => self.report(e.into()),
        }
    }

    /// Clear history and statistics
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.tier_counts.clear();
        self.total_pulls = 0;
        self.history_scroll = 0;
    }

    pub fn adjust_preview(&mut self, delta: i64) {
        self.preview_counter = self.preview_counter.saturating_add(delta);
    }

    pub fn run_simulation(&mut self) {
        match PullSimulation::run(&self.engine, &self.catalog, SIMULATION_PULLS, &mut self.rng) {
            Ok(sim) => {
                log::info!(
                    "simulated {} pulls: {:.2} pulls per high-rarity result",
                    sim.total_pulls,
                    sim.pulls_per_high_rarity()
                );
                self.simulation = Some(sim);
            }
            Err(e) => self.report(e),
        }
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Pull => self.history_scroll = self.history_scroll.saturating_sub(1),
            Tab::Rates => self.adjust_preview(1),
            Tab::Log => self.log_scroll = self.log_scroll.saturating_sub(1),
            _ => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Pull => {
                if self.history_scroll + 1 < self.history.len() {
                    self.history_scroll += 1;
                }
            }
            Tab::Rates => self.adjust_preview(-1),
            Tab::Log => {
                if self.log_scroll + 1 < self.log_len() {
                    self.log_scroll += 1;
                }
            }
            _ => {}
        }
    }

    pub fn on_left(&mut self) {
        if self.current_tab == Tab::Rates {
            self.adjust_preview(-10);
        }
    }

    pub fn on_right(&mut self) {
        if self.current_tab == Tab::Rates {
            self.adjust_preview(10);
        }
    }

    /// Copy of the log buffer
    pub fn log_lines(&self) -> Vec<String> {
        self.logs.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn log_len(&self) -> usize {
        self.logs.lock().map(|l| l.len()).unwrap_or(0)
    }

    fn record(&mut self, pull: PullResult) {
        self.total_pulls += 1;
        *self.tier_counts.entry(pull.rarity).or_insert(0) += 1;
        self.history.insert(0, pull);
        self.history.truncate(HISTORY_LIMIT);
        self.history_scroll = 0;
    }

    fn report(&mut self, error: GachaError) {
        log::error!("{}", error);
        self.status = Some(format!("Error: {}", error));
    }
}

fn describe(pull: &PullResult) -> String {
    let mut text = format!("{} [{}]", pull.character.name, pull.rarity);
    if pull.hard_pity_triggered {
        text.push_str(" - hard pity!");
    }
    text
}
