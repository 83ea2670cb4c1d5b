use crate::aggregate::Accumulate;
use crate::models::record::{
    MEDAL_ACCURACY, MEDAL_EXCELLENT, MEDAL_FIRSTFRAG, MEDAL_HEADSHOT, MEDAL_IMPRESSIVE,
    MEDAL_MIDAIR, MEDAL_REVENGE,
};
use crate::models::{StatRecord, Weapon, WeaponShots};

const LOW_ACCURACY_THRESHOLD: f64 = 20.0;
const MEDIUM_ACCURACY_THRESHOLD: f64 = 35.0;

/// Column headers and row cells for one leaderboard family. The rank and
/// player columns are prepended by the service.
pub trait FamilyColumns: Accumulate {
    fn headers() -> Vec<String>;
    fn row(&self) -> Vec<String>;
}

fn headers_of(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

// ---- damage ----

#[derive(Debug, Clone, Copy, Default)]
pub struct DamageTotals {
    pub given: u64,
    pub taken: u64,
}

impl Accumulate for DamageTotals {
    fn absorb(&mut self, record: &StatRecord) {
        self.given += record.damage_dealt;
        self.taken += record.damage_taken;
    }

    fn merge(&mut self, other: Self) {
        self.given += other.given;
        self.taken += other.taken;
    }
}

impl FamilyColumns for DamageTotals {
    fn headers() -> Vec<String> {
        headers_of(&["DAMAGE GIVEN", "DAMAGE TAKEN"])
    }

    fn row(&self) -> Vec<String> {
        vec![self.given.to_string(), self.taken.to_string()]
    }
}

// ---- kills / deaths ----

#[derive(Debug, Clone, Copy, Default)]
pub struct KillDeathTotals {
    pub kills: u32,
    pub deaths: u32,
}

impl KillDeathTotals {
    /// Display convention, not a true ratio: with zero deaths the raw kill
    /// count is reported instead of dividing.
    pub fn kd_ratio(&self) -> f64 {
        if self.deaths > 0 {
            self.kills as f64 / self.deaths as f64
        } else {
            self.kills as f64
        }
    }
}

impl Accumulate for KillDeathTotals {
    fn absorb(&mut self, record: &StatRecord) {
        self.kills += record.kills;
        self.deaths += record.deaths;
    }

    fn merge(&mut self, other: Self) {
        self.kills += other.kills;
        self.deaths += other.deaths;
    }
}

impl FamilyColumns for KillDeathTotals {
    fn headers() -> Vec<String> {
        headers_of(&["KILLS", "DEATHS", "K/D RATIO"])
    }

    fn row(&self) -> Vec<String> {
        let ratio = if self.deaths > 0 {
            format!("{:.2}", self.kd_ratio())
        } else {
            self.kills.to_string()
        };
        vec![self.kills.to_string(), self.deaths.to_string(), ratio]
    }
}

// ---- wins / losses ----

#[derive(Debug, Clone, Copy, Default)]
pub struct WinLossTotals {
    pub wins: u32,
    pub losses: u32,
}

impl Accumulate for WinLossTotals {
    fn absorb(&mut self, record: &StatRecord) {
        self.wins += record.win as u32;
        self.losses += record.loss as u32;
    }

    fn merge(&mut self, other: Self) {
        self.wins += other.wins;
        self.losses += other.losses;
    }
}

impl FamilyColumns for WinLossTotals {
    fn headers() -> Vec<String> {
        headers_of(&["WINS", "LOSSES"])
    }

    fn row(&self) -> Vec<String> {
        vec![self.wins.to_string(), self.losses.to_string()]
    }
}

// ---- weapon accuracy ----

/// Per-weapon hit and shot sums over the fixed tracked set, shared by the
/// accuracy leaderboard and the composite scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeaponTotals {
    lines: [WeaponShots; Weapon::ALL.len()],
}

impl WeaponTotals {
    pub fn absorb(&mut self, record: &StatRecord) {
        for (line, weapon) in self.lines.iter_mut().zip(Weapon::ALL) {
            let shots = record.weapon(weapon);
            line.hits += shots.hits;
            line.shots += shots.shots;
        }
    }

    pub fn merge(&mut self, other: Self) {
        for (line, incoming) in self.lines.iter_mut().zip(other.lines) {
            line.hits += incoming.hits;
            line.shots += incoming.shots;
        }
    }

    /// Accuracy percentage for one weapon, `None` until it has a recorded
    /// shot.
    pub fn accuracy(&self, weapon: Weapon) -> Option<f64> {
        Weapon::ALL
            .iter()
            .zip(&self.lines)
            .find(|(candidate, _)| **candidate == weapon)
            .and_then(|(_, line)| {
                if line.shots > 0 {
                    Some(line.hits as f64 / line.shots as f64 * 100.0)
                } else {
                    None
                }
            })
    }

    /// Mean accuracy over only the weapons with at least one recorded shot.
    /// Weapons never fired are excluded from the denominator, not treated
    /// as zero. With no weapons fired at all this is 0.
    pub fn average(&self) -> f64 {
        let mut sum = 0.0;
        let mut fired = 0usize;
        for weapon in Weapon::ALL {
            if let Some(pct) = self.accuracy(weapon) {
                sum += pct;
                fired += 1;
            }
        }
        if fired > 0 {
            sum / fired as f64
        } else {
            0.0
        }
    }

    fn cell(&self, weapon: Weapon) -> String {
        match self.accuracy(weapon) {
            Some(pct) => format!("{}", pct.round()),
            None => "-".to_string(),
        }
    }

    /// One-line colorized summary in weapon display order, used for the
    /// single-player stats command.
    pub fn summary(&self) -> String {
        Weapon::ALL
            .iter()
            .map(|weapon| format!("{}: {}", weapon.abbr(), self.colorized_cell(*weapon)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn colorized_cell(&self, weapon: Weapon) -> String {
        match self.accuracy(weapon) {
            Some(pct) => {
                let rounded = pct.round();
                let color = if rounded > MEDIUM_ACCURACY_THRESHOLD {
                    "^2"
                } else if rounded >= LOW_ACCURACY_THRESHOLD {
                    "^3"
                } else {
                    "^1"
                };
                format!("{}{}^7", color, rounded)
            }
            None => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccuracyTotals {
    pub weapons: WeaponTotals,
}

impl Accumulate for AccuracyTotals {
    fn absorb(&mut self, record: &StatRecord) {
        self.weapons.absorb(record);
    }

    fn merge(&mut self, other: Self) {
        self.weapons.merge(other.weapons);
    }
}

impl FamilyColumns for AccuracyTotals {
    fn headers() -> Vec<String> {
        let mut headers = headers_of(&["AVG"]);
        headers.extend(Weapon::ALL.iter().map(|weapon| weapon.abbr().to_string()));
        headers
    }

    fn row(&self) -> Vec<String> {
        let mut row = vec![format!("{}", self.weapons.average().round())];
        row.extend(Weapon::ALL.iter().map(|weapon| self.weapons.cell(*weapon)));
        row
    }
}

// ---- medals ----

#[derive(Debug, Clone, Copy, Default)]
pub struct SniperTotals {
    pub accuracy: u32,
    pub headshots: u32,
    pub impressives: u32,
}

impl SniperTotals {
    pub fn total(&self) -> u32 {
        self.accuracy + self.headshots + self.impressives
    }
}

impl Accumulate for SniperTotals {
    fn absorb(&mut self, record: &StatRecord) {
        self.accuracy += record.medal(MEDAL_ACCURACY);
        self.headshots += record.medal(MEDAL_HEADSHOT);
        self.impressives += record.medal(MEDAL_IMPRESSIVE);
    }

    fn merge(&mut self, other: Self) {
        self.accuracy += other.accuracy;
        self.headshots += other.headshots;
        self.impressives += other.impressives;
    }
}

impl FamilyColumns for SniperTotals {
    fn headers() -> Vec<String> {
        headers_of(&["ACCURACY", "HEADSHOTS", "IMPRESSIVES", "TOTAL"])
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.accuracy.to_string(),
            self.headshots.to_string(),
            self.impressives.to_string(),
            self.total().to_string(),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttackerTotals {
    pub excellents: u32,
    pub firstfrags: u32,
    pub midairs: u32,
    pub revenges: u32,
}

impl AttackerTotals {
    pub fn total(&self) -> u32 {
        self.excellents + self.firstfrags + self.midairs + self.revenges
    }
}

impl Accumulate for AttackerTotals {
    fn absorb(&mut self, record: &StatRecord) {
        self.excellents += record.medal(MEDAL_EXCELLENT);
        self.firstfrags += record.medal(MEDAL_FIRSTFRAG);
        self.midairs += record.medal(MEDAL_MIDAIR);
        self.revenges += record.medal(MEDAL_REVENGE);
    }

    fn merge(&mut self, other: Self) {
        self.excellents += other.excellents;
        self.firstfrags += other.firstfrags;
        self.midairs += other.midairs;
        self.revenges += other.revenges;
    }
}

impl FamilyColumns for AttackerTotals {
    fn headers() -> Vec<String> {
        headers_of(&["EXCELLENT", "FIRSTFRAG", "MIDAIR", "REVENGE", "TOTAL"])
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.excellents.to_string(),
            self.firstfrags.to_string(),
            self.midairs.to_string(),
            self.revenges.to_string(),
            self.total().to_string(),
        ]
    }
}
