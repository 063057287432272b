//! Offseason continuation: archive the finished season's farmer
//! performance, evolve the pool, and reset the league for a fresh draft.

use crate::logic::schedule::generate_matchup_schedule;
use crate::models::{
    BracketSchedules, Brackets, Farmer, FarmerSeason, League, LeagueError, LeagueStatus,
    PlayerState, Schedule,
};
use crate::store::{Clock, FarmerPool, MarketHooks, PlayerStore};
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashSet};

/// Average points per game at or above which a season counts as good.
const GOOD_AVG_POINTS: f64 = 10.0;
/// Average points per game at or below which a season counts as poor.
const POOR_AVG_POINTS: f64 = 9.0;
/// Injury count from which a farmer's body starts to give.
const MANY_INJURIES: u32 = 6;
/// Farmers receiving a random offseason boost.
const BOOSTED_FARMERS: usize = 5;

/// Roll a finished league into a new season: persist the performance
/// archive, evolve the farmer pool from it, reset league and member state,
/// and restart the global clock.
pub fn continue_league_new_season(
    league: &mut League,
    clock: &mut dyn Clock,
    players: &mut dyn PlayerStore,
    pool: &mut dyn FarmerPool,
    market: &mut dyn MarketHooks,
) -> Result<(), LeagueError> {
    if league.status != LeagueStatus::Finished {
        return Err(LeagueError::InvalidState);
    }

    let archive = build_season_archive(league, pool);
    pool.set_season_archive(&league.code, archive.clone());

    let evolved = evolve_pool(pool.pool_for(&league.code), &archive);
    pool.set_pool_for(&league.code, evolved);

    reset_for_new_season(league, players, market);
    clock.set(0);
    info!(
        "league {} reset for a new season with evolved farmer stats",
        league.code
    );
    Ok(())
}

/// Assemble the per-farmer season summary from the tallies captured at
/// finish time and the team snapshots.
fn build_season_archive(league: &League, pool: &dyn FarmerPool) -> BTreeMap<String, FarmerSeason> {
    let drafted: HashSet<&str> = league
        .archived_teams
        .values()
        .flat_map(|team| team.team.values().map(|f| f.name.as_str()))
        .collect();

    pool.pool_for(&league.code)
        .into_iter()
        .map(|farmer| {
            let tally = league
                .farmer_tallies
                .get(&farmer.name)
                .copied()
                .unwrap_or_default();
            let season = FarmerSeason {
                name: farmer.name.clone(),
                games_played: tally.games_played,
                total_points: tally.total_points,
                total_injuries: tally.total_injuries,
                best_role: farmer.best_role(),
                was_drafted: drafted.contains(farmer.name.as_str()),
            };
            (farmer.name, season)
        })
        .collect()
}

/// Apply stat progression to every farmer with an archived season, then
/// boost the best stat of a few random farmers by +1 or +2.
fn evolve_pool(pool: Vec<Farmer>, archive: &BTreeMap<String, FarmerSeason>) -> Vec<Farmer> {
    let mut rng = rand::thread_rng();
    let mut evolved: Vec<Farmer> = pool
        .into_iter()
        .map(|mut farmer| {
            if let Some(season) = archive.get(&farmer.name) {
                apply_progression(&mut farmer, season, &mut rng);
            }
            farmer
        })
        .collect();

    let mut picks: Vec<usize> = (0..evolved.len()).collect();
    picks.shuffle(&mut rng);
    for &i in picks.iter().take(BOOSTED_FARMERS) {
        let boost = if rng.gen_bool(0.5) { 1 } else { 2 };
        evolved[i].bump_best_stat(boost);
        info!("offseason boost: {} +{}", evolved[i].name, boost);
    }

    evolved
}

/// Stat progression rules. Role stat 6..=9 moves by itself (+1 good, -2
/// poor); a weak role stat of 1..=5 moves the farmer's best stat instead
/// (+2 good, -1 poor). Physical drifts down after an injury-riddled season
/// and up after a healthy one, each with a coin-flip second step.
fn apply_progression(farmer: &mut Farmer, season: &FarmerSeason, rng: &mut impl Rng) {
    // A farmer with no recorded games has no performance to react to; they
    // keep their stats until someone fields them.
    if season.games_played == 0 {
        return;
    }

    let avg = season.total_points as f64 / season.games_played as f64;
    let good = avg >= GOOD_AVG_POINTS;
    let poor = avg <= POOR_AVG_POINTS;

    let role_stat = farmer.role_stat(season.best_role);
    if (6..=9).contains(&role_stat) {
        if good {
            farmer.bump_role_stat(season.best_role, 1);
        } else if poor {
            farmer.bump_role_stat(season.best_role, -2);
        }
    } else if (1..=5).contains(&role_stat) {
        if good {
            farmer.bump_best_stat(2);
        } else if poor {
            farmer.bump_best_stat(-1);
        }
    }

    let many_injuries = season.total_injuries >= MANY_INJURIES;
    if (6..=10).contains(&farmer.physical) {
        if many_injuries {
            farmer.physical = (farmer.physical - 1).max(1);
            if rng.gen_bool(0.5) {
                farmer.physical = (farmer.physical - 1).max(1);
            }
        }
    } else if !many_injuries {
        farmer.physical = (farmer.physical + 1).min(10);
        if rng.gen_bool(0.5) {
            farmer.physical = (farmer.physical + 1).min(10);
        }
    }
}

/// Clear every piece of derived season state while preserving the league's
/// identity, membership, and settings; members return with empty rosters.
fn reset_for_new_season(
    league: &mut League,
    players: &mut dyn PlayerStore,
    market: &mut dyn MarketHooks,
) {
    league.status = LeagueStatus::Forming;
    league.settings_locked = false;
    league.draft_time = None;
    league.draft_complete = false;
    league.snake_order.clear();
    league.picks_made = 0;
    league.picked_farmers.clear();
    league.matchup_schedule = Schedule::new();
    league.brackets_created = false;
    league.brackets = Brackets::default();
    league.bracket_schedules = BracketSchedules::default();
    league.records.clear();
    league.recorded_matchups.clear();
    league.final_standings.clear();
    league.winner = None;
    league.completed_at = None;
    league.archived_teams.clear();
    league.farmer_tallies.clear();
    league.matchup_schedule = generate_matchup_schedule(league);

    for player in league.players.clone() {
        players.set_player(&player, PlayerState::default());
    }
    market.reset_league(&league.code);
}
