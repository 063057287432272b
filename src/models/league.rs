//! League state: membership, settings, schedules, records, and lifecycle.

use crate::models::farmer::{Farmer, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Errors that can occur during league operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// Player is already a member of this league.
    AlreadyMember(String),
    /// Player is not a member of this league.
    NotAMember(String),
    /// The host cannot leave their own league.
    HostCannotLeave,
    /// Only the league host may perform this action.
    NotHost,
    /// Settings and membership are frozen once the draft is scheduled.
    SettingsLocked,
    /// League is not in a state that allows this action.
    InvalidState,
    /// It is another player's turn in the snake draft.
    NotYourTurn(String),
    /// This farmer has already been drafted in this league.
    FarmerAlreadyPicked(String),
    /// The picker already assigned a farmer to this role.
    RoleOccupied(Role),
    /// No league exists with this code.
    UnknownLeague(String),
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::AlreadyMember(p) => write!(f, "{} is already in this league", p),
            LeagueError::NotAMember(p) => write!(f, "{} is not in this league", p),
            LeagueError::HostCannotLeave => write!(f, "The host cannot leave their own league"),
            LeagueError::NotHost => write!(f, "Only the league host can do that"),
            LeagueError::SettingsLocked => {
                write!(f, "League settings are locked once the draft is scheduled")
            }
            LeagueError::InvalidState => write!(f, "Invalid league state for this action"),
            LeagueError::NotYourTurn(p) => write!(f, "It is {}'s turn to pick", p),
            LeagueError::FarmerAlreadyPicked(n) => write!(f, "{} has already been drafted", n),
            LeagueError::RoleOccupied(r) => write!(f, "The {} role is already filled", r),
            LeagueError::UnknownLeague(c) => write!(f, "No league with code {}", c),
        }
    }
}

impl std::error::Error for LeagueError {}

/// Matchup schedule: member -> per-cycle opponent, `None` for a bye.
pub type Schedule = HashMap<String, Vec<Option<String>>>;

/// Lifecycle phase of a league.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueStatus {
    /// Gathering members and tuning settings; draft not scheduled.
    #[default]
    Forming,
    /// Snake draft scheduled or in progress; membership frozen.
    Drafting,
    /// Season running: matchdays advance and records accumulate.
    Active,
    /// Season over; standings and archives are final.
    Finished,
}

/// Cumulative head-to-head record for one player.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Record {
    pub fn is_empty(&self) -> bool {
        self.wins == 0 && self.losses == 0 && self.ties == 0
    }
}

/// Post-midpoint tier assignment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tier {
    Winners,
    Losers,
}

/// The two tiers formed at the season midpoint.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Brackets {
    pub winners: Vec<String>,
    pub losers: Vec<String>,
}

impl Brackets {
    pub fn tier_of(&self, player: &str) -> Option<Tier> {
        if self.winners.iter().any(|p| p == player) {
            Some(Tier::Winners)
        } else if self.losers.iter().any(|p| p == player) {
            Some(Tier::Losers)
        } else {
            None
        }
    }
}

/// Independent round-robin schedules for each tier.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketSchedules {
    #[serde(default)]
    pub winners: Schedule,
    #[serde(default)]
    pub losers: Schedule,
}

/// One row of the final standings.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player: String,
    pub points: i64,
    #[serde(default)]
    pub record: Record,
}

/// Snapshot of a member's team taken when the season finishes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchivedTeam {
    pub team: HashMap<Role, Farmer>,
    pub final_points: i64,
    pub matchdays_played: u32,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub profile_pic: String,
}

/// Per-farmer totals accumulated from members' match histories, captured at
/// season finish before player state is wiped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FarmerTally {
    pub games_played: u32,
    pub total_points: i64,
    pub total_injuries: u32,
}

/// A named competition: settings, members, and all derived season state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct League {
    /// Stable identifier (uppercase hex), never changes.
    pub code: String,
    pub name: String,
    pub host: String,
    /// Join order; no duplicates.
    pub players: Vec<String>,
    /// Season length in matchdays.
    pub matchdays: u32,
    pub use_playoffs: bool,
    /// Advertised playoff cutoff; tiers always split at the midpoint.
    pub playoff_cutoff: usize,
    pub lock_market_in_playoffs: bool,
    #[serde(default)]
    pub status: LeagueStatus,

    // Draft sub-state.
    #[serde(default)]
    pub settings_locked: bool,
    #[serde(default)]
    pub draft_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub draft_complete: bool,
    #[serde(default)]
    pub snake_order: Vec<String>,
    #[serde(default)]
    pub picks_made: usize,
    #[serde(default)]
    pub picked_farmers: Vec<String>,

    // Season sub-state.
    #[serde(default)]
    pub matchup_schedule: Schedule,
    #[serde(default)]
    pub brackets_created: bool,
    #[serde(default)]
    pub brackets: Brackets,
    #[serde(default)]
    pub bracket_schedules: BracketSchedules,
    #[serde(default)]
    pub records: BTreeMap<String, Record>,
    /// Matchup identifiers already scored; the dedup guard that makes record
    /// keeping idempotent.
    #[serde(default)]
    pub recorded_matchups: BTreeSet<String>,

    // Completion.
    #[serde(default)]
    pub final_standings: Vec<Standing>,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_teams: BTreeMap<String, ArchivedTeam>,
    #[serde(default)]
    pub farmer_tallies: BTreeMap<String, FarmerTally>,
}

impl League {
    /// Create a league with default settings and the host as sole member.
    pub fn new(code: impl Into<String>, name: impl Into<String>, host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            code: code.into(),
            name: name.into(),
            host: host.clone(),
            players: vec![host],
            matchdays: 30,
            use_playoffs: true,
            playoff_cutoff: 6,
            lock_market_in_playoffs: true,
            status: LeagueStatus::Forming,
            settings_locked: false,
            draft_time: None,
            draft_complete: false,
            snake_order: Vec::new(),
            picks_made: 0,
            picked_farmers: Vec::new(),
            matchup_schedule: Schedule::new(),
            brackets_created: false,
            brackets: Brackets::default(),
            bracket_schedules: BracketSchedules::default(),
            records: BTreeMap::new(),
            recorded_matchups: BTreeSet::new(),
            final_standings: Vec::new(),
            winner: None,
            completed_at: None,
            archived_teams: BTreeMap::new(),
            farmer_tallies: BTreeMap::new(),
        }
    }

    pub fn is_member(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    /// Matchday at which brackets are formed.
    pub fn bracket_creation_point(&self) -> u32 {
        self.matchdays / 2
    }

    /// Season length in whole 3-matchday cycles.
    pub fn total_cycles(&self) -> usize {
        (self.matchdays / 3) as usize
    }

    /// Make sure every current member has a record entry.
    pub fn ensure_records(&mut self) {
        for player in &self.players {
            self.records.entry(player.clone()).or_default();
        }
    }

    pub fn record_of(&self, player: &str) -> Record {
        self.records.get(player).copied().unwrap_or_default()
    }
}
