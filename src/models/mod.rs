//! Data structures for the farming league: farmers, players, leagues.

mod farmer;
mod league;
mod player;

pub use farmer::{Farmer, FarmerSeason, Role};
pub use league::{
    ArchivedTeam, BracketSchedules, Brackets, FarmerTally, League, LeagueError, LeagueStatus,
    Record, Schedule, Standing, Tier,
};
pub use player::{FarmerLine, MatchdayEntry, PlayerState, Profile};
