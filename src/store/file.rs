//! JSON-file-backed stores: one document per concern in a data directory.
//! Missing files read as empty defaults. Write failures are logged rather
//! than propagated so a matchday tick keeps going for everyone else.

use crate::models::{Farmer, FarmerSeason, League, PlayerState, Profile};
use crate::store::{Clock, FarmerPool, MarketHooks, PlayerStore};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// I/O or JSON failure while reading or writing a store file.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store I/O error: {}", e),
            StoreError::Json(e) => write!(f, "store JSON error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("unreadable JSON in {}: {}; using defaults", path.display(), e);
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string_pretty(value)?;
    fs::write(path, raw)?;
    Ok(())
}

fn write_json_or_log<T: Serialize>(path: &Path, value: &T) {
    if let Err(e) = write_json(path, value) {
        error!("failed to persist {}: {}", path.display(), e);
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
struct ClockFile {
    #[serde(default)]
    current_matchday: u32,
}

/// Global matchday counter in `global_matchday.json`.
pub struct FileClock {
    path: PathBuf,
}

impl FileClock {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join("global_matchday.json"),
        }
    }
}

impl Clock for FileClock {
    fn current(&self) -> u32 {
        read_json::<ClockFile>(&self.path).current_matchday
    }

    fn set(&mut self, matchday: u32) {
        write_json_or_log(
            &self.path,
            &ClockFile {
                current_matchday: matchday,
            },
        );
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct StatsFile {
    #[serde(default)]
    users: BTreeMap<String, PlayerState>,
}

/// Player state in `farm_stats.json`, profiles in `profiles.json`.
pub struct FilePlayers {
    stats_path: PathBuf,
    profiles_path: PathBuf,
}

impl FilePlayers {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            stats_path: dir.as_ref().join("farm_stats.json"),
            profiles_path: dir.as_ref().join("profiles.json"),
        }
    }
}

impl PlayerStore for FilePlayers {
    fn player(&self, id: &str) -> PlayerState {
        read_json::<StatsFile>(&self.stats_path)
            .users
            .remove(id)
            .unwrap_or_default()
    }

    fn set_player(&mut self, id: &str, state: PlayerState) {
        let mut file = read_json::<StatsFile>(&self.stats_path);
        file.users.insert(id.to_string(), state);
        write_json_or_log(&self.stats_path, &file);
    }

    fn profile(&self, id: &str) -> Profile {
        read_json::<BTreeMap<String, Profile>>(&self.profiles_path)
            .remove(id)
            .unwrap_or_default()
    }
}

/// The league table in `leagues.json`, loaded and saved at tick boundaries.
pub struct FileLeagues {
    path: PathBuf,
}

impl FileLeagues {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join("leagues.json"),
        }
    }

    pub fn load(&self) -> BTreeMap<String, League> {
        read_json(&self.path)
    }

    pub fn save(&self, leagues: &BTreeMap<String, League>) -> Result<(), StoreError> {
        write_json(&self.path, leagues)
    }
}

/// Farmer pools: `farmer_pool.json` as the base, `farmer_pool_<code>.json`
/// once a league has evolved stats, `previous_season_stats_<code>.json` for
/// the season archive.
pub struct FilePool {
    dir: PathBuf,
}

impl FilePool {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn league_pool_path(&self, code: &str) -> PathBuf {
        self.dir.join(format!("farmer_pool_{}.json", code))
    }

    fn archive_path(&self, code: &str) -> PathBuf {
        self.dir.join(format!("previous_season_stats_{}.json", code))
    }
}

impl FarmerPool for FilePool {
    fn pool_for(&self, code: &str) -> Vec<Farmer> {
        let league_path = self.league_pool_path(code);
        if league_path.exists() {
            read_json(&league_path)
        } else {
            read_json(&self.dir.join("farmer_pool.json"))
        }
    }

    fn set_pool_for(&mut self, code: &str, pool: Vec<Farmer>) {
        write_json_or_log(&self.league_pool_path(code), &pool);
    }

    fn season_archive(&self, code: &str) -> BTreeMap<String, FarmerSeason> {
        read_json(&self.archive_path(code))
    }

    fn set_season_archive(&mut self, code: &str, archive: BTreeMap<String, FarmerSeason>) {
        write_json_or_log(&self.archive_path(code), &archive);
    }
}

/// Market/chat cleanup: a league reset removes `market_<code>.json` and
/// `chat_<code>.json`.
pub struct FileMarket {
    dir: PathBuf,
}

impl FileMarket {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl MarketHooks for FileMarket {
    fn reset_league(&mut self, code: &str) {
        for name in [format!("market_{}.json", code), format!("chat_{}.json", code)] {
            let path = self.dir.join(&name);
            if path.exists() {
                match fs::remove_file(&path) {
                    Ok(()) => info!("removed {} for league reset", path.display()),
                    Err(e) => error!("failed to remove {}: {}", path.display(), e),
                }
            }
        }
    }
}
