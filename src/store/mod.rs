//! Collaborator seams the season engine is driven through: the global clock,
//! player state, the farmer pool, market notifications, and the per-player
//! matchday simulation. Everything is injected so tests can run against the
//! in-memory fakes in [`memory`] while the binary uses the JSON stores in
//! [`file`].

pub mod file;
pub mod memory;

use crate::models::{Farmer, FarmerSeason, PlayerState, Profile};
use std::collections::BTreeMap;

/// The single global matchday counter shared by all leagues.
pub trait Clock {
    fn current(&self) -> u32;
    fn set(&mut self, matchday: u32);
}

/// Per-player season state and display profile. Missing players read as
/// defaults; lookups are never an error.
pub trait PlayerStore {
    fn player(&self, id: &str) -> PlayerState;
    fn set_player(&mut self, id: &str, state: PlayerState);
    fn profile(&self, id: &str) -> Profile;
}

/// Farmer attribute pool, possibly evolved per league, plus the archived
/// performance of the previous season.
pub trait FarmerPool {
    /// League-specific evolved pool if one exists, otherwise the base pool.
    fn pool_for(&self, code: &str) -> Vec<Farmer>;
    fn set_pool_for(&mut self, code: &str, pool: Vec<Farmer>);
    fn season_archive(&self, code: &str) -> BTreeMap<String, FarmerSeason>;
    fn set_season_archive(&mut self, code: &str, archive: BTreeMap<String, FarmerSeason>);
}

/// Receives "this league was reset" notifications so market and chat state
/// can be dropped.
pub trait MarketHooks {
    fn reset_league(&mut self, code: &str);
}

/// Failure from a per-player simulation run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimError(pub String);

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for SimError {}

/// The external matchday simulation: appends one history entry (per-farmer
/// point lines) to the player's record. Must leave the player untouched on
/// error so the runner can keep their counter behind the clock.
pub trait Simulator {
    fn simulate_matchday(&mut self, id: &str, players: &mut dyn PlayerStore)
        -> Result<(), SimError>;
}
