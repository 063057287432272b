//! In-memory collaborator implementations: deterministic fakes for tests and
//! a convenient starting point for embedders.

use crate::models::{Farmer, FarmerSeason, PlayerState, Profile};
use crate::store::{Clock, FarmerPool, MarketHooks, PlayerStore};
use std::collections::{BTreeMap, HashMap};

/// A fake global clock holding a plain integer.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryClock(pub u32);

impl Clock for MemoryClock {
    fn current(&self) -> u32 {
        self.0
    }

    fn set(&mut self, matchday: u32) {
        self.0 = matchday;
    }
}

/// Player state and profiles held in maps.
#[derive(Clone, Debug, Default)]
pub struct MemoryPlayers {
    pub players: HashMap<String, PlayerState>,
    pub profiles: HashMap<String, Profile>,
}

impl PlayerStore for MemoryPlayers {
    fn player(&self, id: &str) -> PlayerState {
        self.players.get(id).cloned().unwrap_or_default()
    }

    fn set_player(&mut self, id: &str, state: PlayerState) {
        self.players.insert(id.to_string(), state);
    }

    fn profile(&self, id: &str) -> Profile {
        self.profiles.get(id).cloned().unwrap_or_default()
    }
}

/// Farmer pools and season archives held in maps.
#[derive(Clone, Debug, Default)]
pub struct MemoryPool {
    pub base: Vec<Farmer>,
    pub per_league: HashMap<String, Vec<Farmer>>,
    pub archives: HashMap<String, BTreeMap<String, FarmerSeason>>,
}

impl FarmerPool for MemoryPool {
    fn pool_for(&self, code: &str) -> Vec<Farmer> {
        self.per_league
            .get(code)
            .cloned()
            .unwrap_or_else(|| self.base.clone())
    }

    fn set_pool_for(&mut self, code: &str, pool: Vec<Farmer>) {
        self.per_league.insert(code.to_string(), pool);
    }

    fn season_archive(&self, code: &str) -> BTreeMap<String, FarmerSeason> {
        self.archives.get(code).cloned().unwrap_or_default()
    }

    fn set_season_archive(&mut self, code: &str, archive: BTreeMap<String, FarmerSeason>) {
        self.archives.insert(code.to_string(), archive);
    }
}

/// Records which league codes were reset, for assertions.
#[derive(Clone, Debug, Default)]
pub struct RecordingMarket {
    pub resets: Vec<String>,
}

impl MarketHooks for RecordingMarket {
    fn reset_league(&mut self, code: &str) {
        self.resets.push(code.to_string());
    }
}
