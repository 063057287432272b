//! Season completion: finish detection, champion resolution, final
//! standings, and archival of team snapshots.

use crate::logic::records::update_records;
use crate::models::{
    ArchivedTeam, FarmerTally, League, LeagueStatus, PlayerState, Standing, Tier,
};
use crate::store::{Clock, MarketHooks, PlayerStore};
use chrono::Utc;
use log::info;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Finish the league if any member's personal matchday counter has reached
/// the season limit; otherwise a no-op. Record keeping always runs first so
/// the final cycle is scored before standings are computed.
///
/// Safe to call redundantly: finishing resets every member's counter to 0,
/// so the condition can never fire a second time for the same season.
pub fn check_and_finish(
    league: &mut League,
    clock: &dyn Clock,
    players: &mut dyn PlayerStore,
    market: &mut dyn MarketHooks,
) {
    update_records(league, clock, &*players);

    let mut max_matchday = 0;
    let mut season_points: BTreeMap<String, i64> = BTreeMap::new();
    for player in &league.players {
        let state = players.player(player);
        max_matchday = max_matchday.max(state.matchday);
        season_points.insert(player.clone(), state.total_points());
    }

    if max_matchday < league.matchdays || league.players.is_empty() {
        return;
    }

    let (winner, final_standings) = if league.use_playoffs {
        resolve_playoff_finish(league, &season_points)
    } else {
        resolve_points_finish(league, &season_points)
    };

    league.status = LeagueStatus::Finished;
    league.winner = Some(winner.clone());
    league.final_standings = final_standings;
    league.completed_at = Some(Utc::now());

    // Snapshot every member's team and tally per-farmer totals before the
    // live state is wiped; the offseason evolution reads these tallies.
    league.archived_teams.clear();
    league.farmer_tallies.clear();
    for player in league.players.clone() {
        let state = players.player(&player);
        let profile = players.profile(&player);

        for entry in &state.history {
            for line in &entry.farmers {
                let tally = league
                    .farmer_tallies
                    .entry(line.name.clone())
                    .or_insert_with(FarmerTally::default);
                tally.games_played += 1;
                tally.total_points += line.points;
                tally.total_injuries += line.injuries;
            }
        }

        league.archived_teams.insert(
            player.clone(),
            ArchivedTeam {
                team: state.roster.clone(),
                final_points: season_points.get(&player).copied().unwrap_or(0),
                matchdays_played: state.matchday,
                team_name: profile.team_name,
                profile_pic: profile.profile_pic,
            },
        );
        players.set_player(&player, PlayerState::default());
    }

    market.reset_league(&league.code);
    info!("league {} finished, winner: {}", league.code, winner);
}

fn standing_of(league: &League, points: &BTreeMap<String, i64>, player: &str) -> Standing {
    Standing {
        player: player.to_string(),
        points: points.get(player).copied().unwrap_or(0),
        record: league.record_of(player),
    }
}

fn tier_priority(league: &League, player: &str) -> u8 {
    match league.brackets.tier_of(player) {
        Some(Tier::Winners) => 2,
        Some(Tier::Losers) => 1,
        None => 0,
    }
}

/// First member with the strictly best key; earlier candidates win ties.
fn pick_best<'a, K, F>(candidates: impl IntoIterator<Item = &'a String>, key: F) -> String
where
    K: Ord,
    F: Fn(&str) -> K,
{
    let mut best: Option<(String, K)> = None;
    for candidate in candidates {
        let k = key(candidate);
        match &best {
            Some((_, held)) if *held >= k => {}
            _ => best = Some((candidate.clone(), k)),
        }
    }
    best.map(|(p, _)| p).unwrap_or_default()
}

/// Playoff-mode finish: champion comes from the winners tier when one
/// exists, by (wins, points); pre-bracket finishes consider every recorded
/// member. Remaining standings order by tier priority, wins, then points.
fn resolve_playoff_finish(
    league: &League,
    points: &BTreeMap<String, i64>,
) -> (String, Vec<Standing>) {
    let has_records = league.records.values().any(|r| !r.is_empty());
    if !has_records {
        return resolve_points_finish(league, points);
    }

    let candidates: &[String] = if league.brackets.winners.is_empty() {
        &league.players
    } else {
        &league.brackets.winners
    };
    let winner = pick_best(candidates.iter(), |p| {
        (
            league.record_of(p).wins,
            points.get(p).copied().unwrap_or(0),
        )
    });

    let mut rest: Vec<Standing> = league
        .players
        .iter()
        .filter(|p| **p != winner)
        .map(|p| standing_of(league, points, p))
        .collect();
    rest.sort_by_key(|s| Reverse((tier_priority(league, &s.player), s.record.wins, s.points)));

    let mut standings = vec![standing_of(league, points, &winner)];
    standings.extend(rest);
    (winner, standings)
}

/// Points-only finish: highest cumulative season points wins, ties broken by
/// join order. Also the fallback when playoff records are all empty.
fn resolve_points_finish(
    league: &League,
    points: &BTreeMap<String, i64>,
) -> (String, Vec<Standing>) {
    let winner = pick_best(league.players.iter(), |p| {
        points.get(p).copied().unwrap_or(0)
    });
    let mut standings: Vec<Standing> = league
        .players
        .iter()
        .map(|p| standing_of(league, points, p))
        .collect();
    standings.sort_by_key(|s| Reverse(s.points));
    (winner, standings)
}
