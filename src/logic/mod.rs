//! Season business logic: scheduling, brackets, records, completion, the
//! matchday tick, league lifecycle, and offseason continuation.

mod brackets;
mod lifecycle;
mod matchday;
mod offseason;
mod records;
mod schedule;
mod season;

pub use brackets::maybe_create_brackets;
pub use lifecycle::{
    create_league, delete_league, join_league, kick_player, leave_league, record_pick,
    start_draft, update_settings, LeagueSettings,
};
pub use matchday::{advance_tick, TickReport};
pub use offseason::continue_league_new_season;
pub use records::{cycle_points, update_records};
pub use schedule::{
    generate_matchup_schedule, generate_schedule, matchup_progress, opponent_for, CycleProgress,
    Matchup, CYCLE_LEN,
};
pub use season::check_and_finish;
