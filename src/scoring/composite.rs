use crate::aggregate::{Accumulate, WeaponTotals};
use crate::models::StatRecord;
use crate::scoring::CompositeWeights;

/// Inputs to the "best players" ranking: kills, damage given, and the same
/// per-weapon accuracy sums the accuracy leaderboard uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeTotals {
    pub kills: u32,
    pub damage_given: u64,
    pub weapons: WeaponTotals,
}

impl Accumulate for CompositeTotals {
    fn absorb(&mut self, record: &StatRecord) {
        self.kills += record.kills;
        self.damage_given += record.damage_dealt;
        self.weapons.absorb(record);
    }

    fn merge(&mut self, other: Self) {
        self.kills += other.kills;
        self.damage_given += other.damage_given;
        self.weapons.merge(other.weapons);
    }
}

#[derive(Debug, Clone)]
pub struct CompositeScorer {
    weights: CompositeWeights,
    decimals: u32,
}

impl CompositeScorer {
    pub fn new(weights: CompositeWeights, decimals: u32) -> Self {
        Self { weights, decimals }
    }

    /// Unrounded weighted score; sorting always uses this value. A player
    /// who never fired a tracked weapon contributes an average accuracy of
    /// 0, not a penalty.
    pub fn score(&self, totals: &CompositeTotals) -> f64 {
        totals.kills as f64 * self.weights.kills
            + (totals.damage_given as f64 / 1000.0) * self.weights.damage
            + totals.weapons.average() * self.weights.accuracy
    }

    /// Score rounded to the configured number of decimal places, for
    /// display only.
    pub fn display(&self, score: f64) -> String {
        format!("{:.*}", self.decimals as usize, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::accumulate;
    use crate::models::{Weapon, WeaponShots};
    use crate::source::test_support::record;

    fn scorer() -> CompositeScorer {
        CompositeScorer::new(CompositeWeights::default(), 2)
    }

    #[test]
    fn score_weighs_kills_damage_and_accuracy() {
        let mut r = record("1", "Alice");
        r.kills = 10;
        r.damage_dealt = 2000;
        r.weapons.insert(Weapon::Railgun, WeaponShots { hits: 40, shots: 100 });

        let totals = accumulate::<CompositeTotals>(&[r]);
        let score = scorer().score(&totals["Alice"].totals);
        // 10*0.5 + (2000/1000)*0.3 + 40*1.5
        assert!((score - 65.6).abs() < 1e-9);
    }

    #[test]
    fn zero_weapons_fired_means_zero_accuracy_term() {
        let mut r = record("1", "Alice");
        r.kills = 4;
        r.damage_dealt = 1000;

        let totals = accumulate::<CompositeTotals>(&[r]);
        let score = scorer().score(&totals["Alice"].totals);
        assert!((score - 2.3).abs() < 1e-9);
    }

    #[test]
    fn accuracy_weight_comes_from_configuration() {
        let mut r = record("1", "Alice");
        r.weapons.insert(Weapon::Railgun, WeaponShots { hits: 50, shots: 100 });
        let totals = accumulate::<CompositeTotals>(&[r]);

        let light = CompositeScorer::new(
            CompositeWeights { kills: 0.5, damage: 0.3, accuracy: 0.9 },
            2,
        );
        assert!((light.score(&totals["Alice"].totals) - 45.0).abs() < 1e-9);
        assert!((scorer().score(&totals["Alice"].totals) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn display_rounds_without_touching_the_sort_value() {
        let s = scorer();
        assert_eq!(s.display(12.345), "12.35");
        assert_eq!(s.display(12.0), "12.00");
    }
}
