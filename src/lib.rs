//! Fantasy farming league: season state machine with scheduling, records,
//! brackets, and offseason progression.

pub mod logic;
pub mod models;
pub mod sim;
pub mod store;

pub use logic::{
    advance_tick, check_and_finish, continue_league_new_season, create_league, cycle_points,
    delete_league,
    generate_matchup_schedule, generate_schedule, join_league, kick_player, leave_league,
    matchup_progress, maybe_create_brackets, opponent_for, record_pick, start_draft,
    update_records, update_settings, CycleProgress, LeagueSettings, Matchup, TickReport,
    CYCLE_LEN,
};
pub use models::{
    ArchivedTeam, BracketSchedules, Brackets, Farmer, FarmerLine, FarmerSeason, FarmerTally,
    League, LeagueError, LeagueStatus, MatchdayEntry, PlayerState, Profile, Record, Role,
    Schedule, Standing, Tier,
};
