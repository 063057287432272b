//! Midpoint bracket formation: the league splits into winners and losers
//! tiers, each with its own round-robin schedule for the rest of the season.

use crate::logic::schedule::{generate_schedule, CYCLE_LEN};
use crate::models::{BracketSchedules, Brackets, League};
use crate::store::{Clock, PlayerStore};
use log::info;
use std::cmp::Reverse;

/// Split the league into tiers once the global clock reaches the season
/// midpoint. Idempotent: after `brackets_created` is set, calls are no-ops.
///
/// Members are ranked by wins, then cumulative season points. The split is
/// at `len / 2`: the upper half of the ranking forms the winners tier, so on
/// odd counts the losers tier carries the extra member.
pub fn maybe_create_brackets(league: &mut League, clock: &dyn Clock, players: &dyn PlayerStore) {
    if !league.use_playoffs || league.brackets_created {
        return;
    }
    let point = league.bracket_creation_point();
    if clock.current() < point {
        return;
    }

    let mut ranked: Vec<String> = league.players.clone();
    ranked.sort_by_key(|p| {
        Reverse((league.record_of(p).wins, players.player(p).total_points()))
    });

    let mid = ranked.len() / 2;
    let losers = ranked.split_off(mid);
    let winners = ranked;

    let tier_cycles = ((league.matchdays - point) / CYCLE_LEN) as usize;
    league.bracket_schedules = BracketSchedules {
        winners: generate_schedule(&winners, tier_cycles),
        losers: generate_schedule(&losers, tier_cycles),
    };

    info!(
        "playoff brackets created for league {}: winners {:?}, losers {:?}",
        league.code, winners, losers
    );
    league.brackets = Brackets { winners, losers };
    league.brackets_created = true;
}
