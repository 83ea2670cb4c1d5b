use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{LeaderboardError, Result};
use crate::render::strip_formatting;

pub const MEDAL_ACCURACY: &str = "accuracy";
pub const MEDAL_HEADSHOT: &str = "headshot";
pub const MEDAL_IMPRESSIVE: &str = "impressive";
pub const MEDAL_EXCELLENT: &str = "excellent";
pub const MEDAL_FIRSTFRAG: &str = "firstfrag";
pub const MEDAL_MIDAIR: &str = "midair";
pub const MEDAL_REVENGE: &str = "revenge";

/// The fixed set of weapons tracked for accuracy. Everything else a player
/// fires (gauntlet, BFG, ...) is ignored by the accuracy leaderboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weapon {
    #[serde(rename = "LIGHTNING")]
    LightningGun,
    #[serde(rename = "GRENADE")]
    GrenadeLauncher,
    #[serde(rename = "RAILGUN")]
    Railgun,
    #[serde(rename = "PLASMA")]
    PlasmaGun,
    #[serde(rename = "ROCKET")]
    RocketLauncher,
    #[serde(rename = "MACHINEGUN")]
    MachineGun,
    #[serde(rename = "HMG")]
    HeavyMachineGun,
    #[serde(rename = "SHOTGUN")]
    Shotgun,
}

impl Weapon {
    /// Display order for accuracy columns and summaries.
    pub const ALL: [Weapon; 8] = [
        Weapon::LightningGun,
        Weapon::GrenadeLauncher,
        Weapon::Railgun,
        Weapon::PlasmaGun,
        Weapon::RocketLauncher,
        Weapon::MachineGun,
        Weapon::HeavyMachineGun,
        Weapon::Shotgun,
    ];

    pub fn abbr(&self) -> &'static str {
        match self {
            Weapon::LightningGun => "LG",
            Weapon::GrenadeLauncher => "GL",
            Weapon::Railgun => "RG",
            Weapon::PlasmaGun => "PG",
            Weapon::RocketLauncher => "RL",
            Weapon::MachineGun => "MG",
            Weapon::HeavyMachineGun => "HMG",
            Weapon::Shotgun => "SG",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeaponShots {
    pub hits: u32,
    pub shots: u32,
}

/// One player's stat line for one completed match. Immutable once created;
/// warmup and aborted matches are never recorded in the first place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatRecord {
    /// Stable account id. Unauthenticated and bot entries have none and
    /// fall back to the sanitized display name as identity.
    pub player_id: Option<u64>,
    pub name: String,
    pub match_id: String,
    /// Stored in UTC. Records without a timestamp never match a window.
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub damage_dealt: u64,
    #[serde(default)]
    pub damage_taken: u64,
    #[serde(default)]
    pub win: bool,
    #[serde(default)]
    pub loss: bool,
    #[serde(default)]
    pub medals: HashMap<String, u32>,
    #[serde(default)]
    pub weapons: HashMap<Weapon, WeaponShots>,
}

impl StatRecord {
    /// Identity key for accumulation: the stable id when present, otherwise
    /// the display name with color markers stripped.
    pub fn identity(&self) -> String {
        match self.player_id {
            Some(id) => id.to_string(),
            None => strip_formatting(&self.name),
        }
    }

    pub fn medal(&self, name: &str) -> u32 {
        self.medals.get(name).copied().unwrap_or(0)
    }

    pub fn weapon(&self, weapon: Weapon) -> WeaponShots {
        self.weapons.get(&weapon).copied().unwrap_or_default()
    }

    /// Checks the fields every computation relies on. A failing record is
    /// skipped and counted by its source, never fatal.
    pub fn validate(&self) -> Result<()> {
        if self.match_id.is_empty() {
            return Err(LeaderboardError::MalformedRecord(format!(
                "record for {} has no match id",
                self.name
            )));
        }
        if self.timestamp.is_none() {
            return Err(LeaderboardError::MalformedRecord(format!(
                "record for {} in match {} has no timestamp",
                self.name, self.match_id
            )));
        }
        Ok(())
    }
}
