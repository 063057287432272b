//! Cycle record keeping: win/loss/tie updates with matchup-level dedup.

use crate::logic::brackets::maybe_create_brackets;
use crate::logic::schedule::{opponent_for, Matchup, CYCLE_LEN};
use crate::models::League;
use crate::store::{Clock, PlayerStore};
use log::{debug, warn};
use std::collections::HashSet;

/// Apply results for the just-completed 3-matchday cycle.
///
/// No-op unless the global clock sits exactly on a cycle boundary. Every
/// matchup and bye is guarded by an identifier in
/// `league.recorded_matchups`, so replays within a tick or across ticks
/// never double-count.
pub fn update_records(league: &mut League, clock: &dyn Clock, players: &dyn PlayerStore) {
    if !league.use_playoffs {
        return;
    }

    league.ensure_records();
    maybe_create_brackets(league, clock, players);

    let day = clock.current();
    if day == 0 || day % CYCLE_LEN != 0 {
        return;
    }
    let cycle = (day / CYCLE_LEN - 1) as usize;

    let mut seen_this_call: HashSet<String> = HashSet::new();
    for player in league.players.clone() {
        let matchup = match opponent_for(league, &player, cycle) {
            Some(m) => m,
            None => {
                warn!(
                    "no schedule entry for {} in cycle {} of league {}; scoring as a bye",
                    player, cycle, league.code
                );
                Matchup::Bye
            }
        };

        match matchup {
            Matchup::Bye => {
                let key = format!("{}_bye_cycle_{}", player, cycle);
                if league.recorded_matchups.insert(key) {
                    league.records.entry(player.clone()).or_default().wins += 1;
                    debug!("{} takes a bye win for cycle {}", player, cycle);
                }
            }
            Matchup::Versus(opponent) => {
                // Canonical identifier: sorted pair, so both sides produce
                // the same key regardless of processing order.
                let mut pair = [player.as_str(), opponent.as_str()];
                pair.sort_unstable();
                let key = format!("{}_vs_{}_cycle_{}", pair[0], pair[1], cycle);
                if seen_this_call.contains(&key) || league.recorded_matchups.contains(&key) {
                    continue;
                }

                let own = cycle_points(players, &player, cycle);
                let theirs = cycle_points(players, &opponent, cycle);
                debug!(
                    "cycle {}: {} ({}) vs {} ({})",
                    cycle, player, own, opponent, theirs
                );

                league.records.entry(opponent.clone()).or_default();
                if own > theirs {
                    league.records.entry(player.clone()).or_default().wins += 1;
                    league.records.entry(opponent.clone()).or_default().losses += 1;
                } else if theirs > own {
                    league.records.entry(opponent.clone()).or_default().wins += 1;
                    league.records.entry(player.clone()).or_default().losses += 1;
                } else {
                    league.records.entry(player.clone()).or_default().ties += 1;
                    league.records.entry(opponent.clone()).or_default().ties += 1;
                }

                league.recorded_matchups.insert(key.clone());
                seen_this_call.insert(key);
            }
        }
    }
}

/// Sum of a player's points over the 3 matchdays of `cycle`. Missing history
/// entries count as 0.
pub fn cycle_points(players: &dyn PlayerStore, id: &str, cycle: usize) -> i64 {
    let start = cycle * CYCLE_LEN as usize;
    players
        .player(id)
        .history
        .iter()
        .skip(start)
        .take(CYCLE_LEN as usize)
        .map(|entry| entry.total_points())
        .sum()
}
