//! Round-robin matchup scheduling in 3-matchday cycles, plus the single
//! opponent-lookup used by record keeping and display alike.

use crate::models::{League, Schedule, Tier};

/// Matchdays per head-to-head cycle.
pub const CYCLE_LEN: u32 = 3;

/// Generate a deterministic round-robin schedule with byes.
///
/// Cycle 0 pairs players in list order (first with second, third with
/// fourth, ...). Later cycles pop the first remaining player and pair them
/// with the one at `cycle % remaining`. Odd pools of three or more sit one
/// player out per cycle, rotating by cycle index; two players always face
/// each other.
pub fn generate_schedule(players: &[String], total_cycles: usize) -> Schedule {
    let mut schedule: Schedule = players
        .iter()
        .map(|p| (p.clone(), Vec::with_capacity(total_cycles)))
        .collect();

    if players.len() < 2 {
        for slots in schedule.values_mut() {
            slots.resize(total_cycles, None);
        }
        return schedule;
    }

    if players.len() == 2 {
        for _ in 0..total_cycles {
            push_pairing(&mut schedule, &players[0], &players[1]);
        }
        return schedule;
    }

    let has_bye = players.len() % 2 == 1;
    for cycle in 0..total_cycles {
        let mut pool: Vec<&str> = players.iter().map(String::as_str).collect();

        if has_bye {
            let bye = pool.remove(cycle % pool.len());
            if let Some(slots) = schedule.get_mut(bye) {
                slots.push(None);
            }
        }

        while pool.len() >= 2 {
            let first = pool.remove(0);
            let second = pool.remove(cycle % pool.len());
            push_pairing(&mut schedule, first, second);
        }
    }

    schedule
}

fn push_pairing(schedule: &mut Schedule, a: &str, b: &str) {
    if let Some(slots) = schedule.get_mut(a) {
        slots.push(Some(b.to_string()));
    }
    if let Some(slots) = schedule.get_mut(b) {
        slots.push(Some(a.to_string()));
    }
}

/// The pre-bracket schedule for a league, sized to the full season.
pub fn generate_matchup_schedule(league: &League) -> Schedule {
    generate_schedule(&league.players, league.total_cycles())
}

/// A player's pairing for one cycle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Matchup {
    Bye,
    Versus(String),
}

/// Resolve a player's opponent for `cycle`, bracket-aware: cycles before the
/// bracket boundary read the pre-bracket schedule, later cycles the player's
/// tier schedule at the tier-relative index. `None` means the schedules hold
/// no entry at all for this player and cycle.
pub fn opponent_for(league: &League, player: &str, cycle: usize) -> Option<Matchup> {
    if !league.use_playoffs {
        return None;
    }

    let boundary_cycle = (league.bracket_creation_point() / CYCLE_LEN) as usize;
    let (schedule, slot) = if cycle < boundary_cycle {
        (&league.matchup_schedule, cycle)
    } else {
        let schedule = match league.brackets.tier_of(player)? {
            Tier::Winners => &league.bracket_schedules.winners,
            Tier::Losers => &league.bracket_schedules.losers,
        };
        (schedule, cycle - boundary_cycle)
    };

    match schedule.get(player)?.get(slot)? {
        Some(opponent) => Some(Matchup::Versus(opponent.clone())),
        None => Some(Matchup::Bye),
    }
}

/// Progress within the current 3-matchday cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CycleProgress {
    pub games_played: u32,
    pub games_remaining: u32,
}

pub fn matchup_progress(current_matchday: u32) -> CycleProgress {
    let played = current_matchday % CYCLE_LEN;
    CycleProgress {
        games_played: played,
        games_remaining: if played > 0 { CYCLE_LEN - played } else { CYCLE_LEN },
    }
}
