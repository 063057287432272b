//! League lifecycle: creation, membership edits, settings, and the snake
//! draft that kicks a season off.

use crate::logic::schedule::generate_matchup_schedule;
use crate::models::{Farmer, League, LeagueError, LeagueStatus, PlayerState, Role};
use crate::store::{Clock, MarketHooks, PlayerStore};
use chrono::{Duration, Utc};
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Every member picks five farmers: three starters and two bench slots.
const DRAFT_ROUNDS: usize = 5;

/// Create a league with default settings, a random uppercase hex code, and
/// the host as its only member.
pub fn create_league(name: impl Into<String>, host: impl Into<String>) -> League {
    let mut rng = rand::thread_rng();
    let code: String = (0..4).map(|_| format!("{:02X}", rng.gen::<u8>())).collect();
    let mut league = League::new(code, name, host);
    league.matchup_schedule = generate_matchup_schedule(&league);
    info!("league {} created by {}", league.code, league.host);
    league
}

/// Add a member. Membership is frozen once the draft is scheduled; any
/// change regenerates the matchup schedule.
pub fn join_league(league: &mut League, player: impl Into<String>) -> Result<(), LeagueError> {
    if league.settings_locked {
        return Err(LeagueError::SettingsLocked);
    }
    let player = player.into();
    if league.is_member(&player) {
        return Err(LeagueError::AlreadyMember(player));
    }
    league.players.push(player);
    league.matchup_schedule = generate_matchup_schedule(league);
    Ok(())
}

/// Remove a non-host member before the draft is scheduled.
pub fn leave_league(league: &mut League, player: &str) -> Result<(), LeagueError> {
    if league.settings_locked {
        return Err(LeagueError::SettingsLocked);
    }
    if player == league.host {
        return Err(LeagueError::HostCannotLeave);
    }
    if !league.is_member(player) {
        return Err(LeagueError::NotAMember(player.to_string()));
    }
    league.players.retain(|p| p != player);
    league.matchup_schedule = generate_matchup_schedule(league);
    Ok(())
}

/// Host-only removal of a member, allowed even mid-season. Drops the
/// member's record, regenerates the schedule, and resets their stored state
/// when a draft had completed.
pub fn kick_player(
    league: &mut League,
    host: &str,
    target: &str,
    players: &mut dyn PlayerStore,
) -> Result<(), LeagueError> {
    if host != league.host {
        return Err(LeagueError::NotHost);
    }
    if !league.is_member(target) {
        return Err(LeagueError::NotAMember(target.to_string()));
    }

    league.players.retain(|p| p != target);
    league.records.remove(target);
    league.matchup_schedule = generate_matchup_schedule(league);
    if league.draft_complete {
        players.set_player(target, PlayerState::default());
    }
    info!("{} kicked from league {}", target, league.code);
    Ok(())
}

/// Host-only removal of an entire league: member state is cleared, the
/// market and chat for the league are dropped, and the global clock returns
/// to 0 so remaining leagues restart their cycle math from a clean slate.
pub fn delete_league(
    leagues: &mut BTreeMap<String, League>,
    code: &str,
    host: &str,
    players: &mut dyn PlayerStore,
    clock: &mut dyn Clock,
    market: &mut dyn MarketHooks,
) -> Result<(), LeagueError> {
    let league = leagues
        .get(code)
        .ok_or_else(|| LeagueError::UnknownLeague(code.to_string()))?;
    if host != league.host {
        return Err(LeagueError::NotHost);
    }

    let league = match leagues.remove(code) {
        Some(l) => l,
        None => return Err(LeagueError::UnknownLeague(code.to_string())),
    };
    for player in &league.players {
        players.set_player(player, PlayerState::default());
    }
    market.reset_league(&league.code);
    clock.set(0);
    info!("league {} deleted by {}", league.code, host);
    Ok(())
}

/// Host-editable settings, frozen once the draft is scheduled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LeagueSettings {
    pub matchdays: u32,
    pub use_playoffs: bool,
    pub playoff_cutoff: usize,
    pub lock_market_in_playoffs: bool,
}

/// Update season settings and regenerate the schedule to match.
pub fn update_settings(
    league: &mut League,
    host: &str,
    settings: LeagueSettings,
) -> Result<(), LeagueError> {
    if host != league.host {
        return Err(LeagueError::NotHost);
    }
    if league.settings_locked {
        return Err(LeagueError::SettingsLocked);
    }

    league.matchdays = settings.matchdays;
    league.use_playoffs = settings.use_playoffs;
    league.playoff_cutoff = settings.playoff_cutoff;
    league.lock_market_in_playoffs = settings.lock_market_in_playoffs;
    league.matchup_schedule = generate_matchup_schedule(league);
    Ok(())
}

/// Lock settings, schedule the draft one minute out, and lay out the snake
/// order: members shuffled once, then five rounds alternating direction.
pub fn start_draft(league: &mut League, host: &str) -> Result<(), LeagueError> {
    if host != league.host {
        return Err(LeagueError::NotHost);
    }
    if league.settings_locked || league.status != LeagueStatus::Forming {
        return Err(LeagueError::InvalidState);
    }

    let mut order = league.players.clone();
    order.shuffle(&mut rand::thread_rng());

    league.snake_order.clear();
    for round in 0..DRAFT_ROUNDS {
        if round % 2 == 0 {
            league.snake_order.extend(order.iter().cloned());
        } else {
            league.snake_order.extend(order.iter().rev().cloned());
        }
    }

    league.settings_locked = true;
    league.draft_time = Some(Utc::now() + Duration::minutes(1));
    league.status = LeagueStatus::Drafting;
    info!("draft scheduled for league {}", league.code);
    Ok(())
}

/// Record one snake-draft pick: the farmer lands in the picker's roster at
/// the chosen role. The final pick completes the draft, activates the
/// league, and resets the global clock to 0 for the new season.
pub fn record_pick(
    league: &mut League,
    player: &str,
    farmer: Farmer,
    role: Role,
    players: &mut dyn PlayerStore,
    clock: &mut dyn Clock,
) -> Result<(), LeagueError> {
    if league.status != LeagueStatus::Drafting {
        return Err(LeagueError::InvalidState);
    }
    let on_turn = league
        .snake_order
        .get(league.picks_made)
        .ok_or(LeagueError::InvalidState)?;
    if on_turn != player {
        return Err(LeagueError::NotYourTurn(on_turn.clone()));
    }
    if league.picked_farmers.iter().any(|n| *n == farmer.name) {
        return Err(LeagueError::FarmerAlreadyPicked(farmer.name));
    }

    let mut state = players.player(player);
    if state.roster.contains_key(&role) {
        return Err(LeagueError::RoleOccupied(role));
    }
    league.picked_farmers.push(farmer.name.clone());
    state.roster.insert(role, farmer);
    players.set_player(player, state);
    league.picks_made += 1;

    if league.picks_made >= league.snake_order.len() {
        league.draft_complete = true;
        league.status = LeagueStatus::Active;
        league.draft_time = None;
        clock.set(0);
        info!(
            "draft complete for league {}; global matchday reset to 0",
            league.code
        );
    }
    Ok(())
}
