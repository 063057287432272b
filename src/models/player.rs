//! Per-player season state: roster, personal matchday counter, match history.

use crate::models::farmer::{Farmer, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One farmer's result line inside a matchday entry.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FarmerLine {
    pub name: String,
    /// Points awarded after catastrophe and injury adjustments.
    pub points: i64,
    #[serde(default)]
    pub injuries: u32,
}

/// One simulated matchday for one player.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchdayEntry {
    pub farmers: Vec<FarmerLine>,
}

impl MatchdayEntry {
    pub fn total_points(&self) -> i64 {
        self.farmers.iter().map(|f| f.points).sum()
    }
}

/// Everything the engine tracks per player identity. A missing record reads
/// as the default: matchday 0, empty roster, no history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Personal matchday counter. May lag the global clock when a player
    /// joins late or a simulation fails; the engine never catches it up.
    #[serde(default)]
    pub matchday: u32,
    /// Role -> drafted farmer.
    #[serde(default)]
    pub roster: HashMap<Role, Farmer>,
    /// One entry per simulated matchday, oldest first.
    #[serde(default)]
    pub history: Vec<MatchdayEntry>,
}

impl PlayerState {
    /// True when every starting role holds a named farmer.
    pub fn has_complete_roster(&self) -> bool {
        Role::STARTERS
            .iter()
            .all(|role| self.roster.get(role).is_some_and(|f| !f.name.is_empty()))
    }

    /// Cumulative season points across the whole history.
    pub fn total_points(&self) -> i64 {
        self.history.iter().map(MatchdayEntry::total_points).sum()
    }
}

/// Display profile for archival snapshots.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub profile_pic: String,
}
