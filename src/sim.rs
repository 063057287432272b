//! Basic stat-weighted matchday simulation.
//!
//! Stands in for the full task/injury/crop engine: each starting farmer
//! rolls points weighted by their role stat, with an occasional injury
//! knock gated by their physical stat.

use crate::models::{FarmerLine, MatchdayEntry, Role};
use crate::store::{PlayerStore, SimError, Simulator};
use rand::Rng;

pub struct StatSimulator;

impl Simulator for StatSimulator {
    fn simulate_matchday(
        &mut self,
        id: &str,
        players: &mut dyn PlayerStore,
    ) -> Result<(), SimError> {
        let mut state = players.player(id);
        if !state.has_complete_roster() {
            return Err(SimError(format!("{} has an incomplete roster", id)));
        }

        let mut rng = rand::thread_rng();
        let mut lines = Vec::new();
        for role in Role::STARTERS {
            let farmer = match state.roster.get(&role) {
                Some(f) => f.clone(),
                None => continue,
            };
            let mut points = rng.gen_range(0..=10i64) + farmer.role_stat(role) as i64;
            let mut injuries = 0;
            // Injury odds: 1 in 3, gated by the physical stat.
            if rng.gen_range(1..=3) == 3 && rng.gen_range(1..=11) > i32::from(farmer.physical) {
                points = (points - rng.gen_range(1..=2i64)).max(0);
                injuries = 1;
            }
            lines.push(FarmerLine {
                name: farmer.name,
                points,
                injuries,
            });
        }

        state.history.push(MatchdayEntry { farmers: lines });
        players.set_player(id, state);
        Ok(())
    }
}
