//! The matchday tick: run simulations for every ready player, advance the
//! global clock, then cascade record keeping and season resolution.

use crate::logic::records::update_records;
use crate::logic::season::check_and_finish;
use crate::models::{League, LeagueStatus};
use crate::store::{Clock, MarketHooks, PlayerStore, Simulator};
use log::{error, info};
use std::collections::{BTreeMap, HashSet};

/// Outcome of one [`advance_tick`] call. An empty `advanced` list means the
/// clock did not move; `failures` lists players whose simulation errored
/// while everyone else carried on.
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub advanced: Vec<String>,
    pub failures: Vec<(String, String)>,
}

impl TickReport {
    pub fn advanced_count(&self) -> usize {
        self.advanced.len()
    }
}

/// Run one matchday for every member with a complete roster across all
/// active leagues, advance the global clock by exactly one if anyone ran,
/// then update records and check for season completion in every active
/// league.
///
/// A member is simulated at most once per tick even if league data lists
/// them twice. If no one was ready the clock stays put, so empty ticks
/// cannot disturb cycle-boundary math.
pub fn advance_tick(
    leagues: &mut BTreeMap<String, League>,
    clock: &mut dyn Clock,
    players: &mut dyn PlayerStore,
    sim: &mut dyn Simulator,
    market: &mut dyn MarketHooks,
) -> TickReport {
    let day = clock.current();
    let mut report = TickReport::default();
    let mut processed: HashSet<String> = HashSet::new();

    let active: Vec<String> = leagues
        .iter()
        .filter(|(_, l)| l.status != LeagueStatus::Finished && l.draft_complete)
        .map(|(code, _)| code.clone())
        .collect();

    for code in &active {
        let league = match leagues.get(code) {
            Some(l) => l,
            None => continue,
        };
        if day >= league.matchdays {
            continue;
        }

        for player in league.players.clone() {
            if processed.contains(&player) {
                continue;
            }
            let before = players.player(&player);
            if !before.has_complete_roster() {
                continue;
            }

            // The personal counter runs one ahead of the pre-tick clock so
            // a player's first matchday shows as 1.
            let mut state = before.clone();
            state.matchday = day + 1;
            players.set_player(&player, state);

            match sim.simulate_matchday(&player, players) {
                Ok(()) => {
                    info!("completed matchday for {}", player);
                    processed.insert(player.clone());
                    report.advanced.push(player);
                }
                Err(e) => {
                    error!("matchday simulation failed for {}: {}", player, e);
                    // A failed player keeps their old counter and history
                    // and simply falls behind the clock.
                    players.set_player(&player, before);
                    report.failures.push((player, e.to_string()));
                }
            }
        }
    }

    if report.advanced.is_empty() {
        info!("no players were ready; global matchday stays at {}", day);
        return report;
    }

    clock.set(day + 1);
    info!("global matchday advanced to {}", day + 1);

    for code in &active {
        if let Some(league) = leagues.get_mut(code) {
            update_records(league, &*clock, &*players);
            check_and_finish(league, &*clock, players, market);
        }
    }

    report
}
