//! Farmer attributes, roster roles, and archived season performance.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Roster slot a farmer can be assigned to. The first three are the starting
/// roles that must be filled before a matchday can run for a player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Fix Meiser")]
    FixMeiser,
    #[serde(rename = "Speed Runner")]
    SpeedRunner,
    #[serde(rename = "Lift Tender")]
    LiftTender,
    #[serde(rename = "Bench 1")]
    Bench1,
    #[serde(rename = "Bench 2")]
    Bench2,
}

impl Role {
    /// Roles checked for roster completeness before a matchday.
    pub const STARTERS: [Role; 3] = [Role::FixMeiser, Role::SpeedRunner, Role::LiftTender];

    /// All roster slots, in draft display order.
    pub const ALL: [Role; 5] = [
        Role::FixMeiser,
        Role::SpeedRunner,
        Role::LiftTender,
        Role::Bench1,
        Role::Bench2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::FixMeiser => "Fix Meiser",
            Role::SpeedRunner => "Speed Runner",
            Role::LiftTender => "Lift Tender",
            Role::Bench1 => "Bench 1",
            Role::Bench2 => "Bench 2",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A farmer in the attribute pool. Stats run 1..=10.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    pub name: String,
    pub strength: u8,
    pub handy: u8,
    pub stamina: u8,
    pub physical: u8,
    #[serde(default)]
    pub image: String,
    /// Season name -> preferred crop.
    #[serde(default)]
    pub crop_preferences: HashMap<String, String>,
}

impl Farmer {
    pub fn new(name: impl Into<String>, strength: u8, handy: u8, stamina: u8, physical: u8) -> Self {
        Self {
            name: name.into(),
            strength,
            handy,
            stamina,
            physical,
            image: String::new(),
            crop_preferences: HashMap::new(),
        }
    }

    /// The attribute a role leans on. Bench slots have no role stat; they
    /// read as the neutral 5.
    pub fn role_stat(&self, role: Role) -> u8 {
        match role {
            Role::FixMeiser => self.handy,
            Role::SpeedRunner => self.stamina,
            Role::LiftTender => self.strength,
            Role::Bench1 | Role::Bench2 => 5,
        }
    }

    /// Starting role whose stat is highest; earlier roles win ties.
    pub fn best_role(&self) -> Role {
        let mut best = Role::FixMeiser;
        for role in Role::STARTERS {
            if self.role_stat(role) > self.role_stat(best) {
                best = role;
            }
        }
        best
    }

    /// Adjust the stat behind `role` by `delta`, clamped to 1..=10. Bench
    /// roles are ignored.
    pub fn bump_role_stat(&mut self, role: Role, delta: i16) {
        let stat = match role {
            Role::FixMeiser => &mut self.handy,
            Role::SpeedRunner => &mut self.stamina,
            Role::LiftTender => &mut self.strength,
            Role::Bench1 | Role::Bench2 => return,
        };
        *stat = clamp_stat(*stat as i16 + delta);
    }

    /// Adjust the highest non-physical stat by `delta`, clamped to 1..=10.
    /// Among equals, strength is preferred, then handy, then stamina.
    pub fn bump_best_stat(&mut self, delta: i16) {
        let current = [self.strength, self.handy, self.stamina];
        let mut best = 0;
        for (i, value) in current.iter().enumerate() {
            if *value > current[best] {
                best = i;
            }
        }
        let stat = match best {
            0 => &mut self.strength,
            1 => &mut self.handy,
            _ => &mut self.stamina,
        };
        *stat = clamp_stat(*stat as i16 + delta);
    }
}

fn clamp_stat(value: i16) -> u8 {
    value.clamp(1, 10) as u8
}

/// One farmer's archived performance over a finished season, used to evolve
/// the pool between seasons.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FarmerSeason {
    pub name: String,
    pub games_played: u32,
    pub total_points: i64,
    pub total_injuries: u32,
    pub best_role: Role,
    pub was_drafted: bool,
}
