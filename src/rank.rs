use std::cmp::Ordering;
use std::collections::HashMap;

use crate::aggregate::PlayerTotals;

#[derive(Debug, Clone)]
pub struct RankedPlayer<T> {
    pub rank: usize,
    pub identity: String,
    pub name: String,
    pub totals: T,
}

/// Sorts descending by the family's primary key and truncates to the top
/// `limit` entries, never padding when fewer players exist. Ties break on
/// ascending player identity so a ranking is reproducible across runs
/// instead of depending on map iteration order.
pub fn rank_players<T>(
    totals: HashMap<String, PlayerTotals<T>>,
    key: impl Fn(&T) -> f64,
    limit: usize,
) -> Vec<RankedPlayer<T>> {
    let mut players: Vec<(String, PlayerTotals<T>)> = totals.into_iter().collect();
    players.sort_by(|a, b| {
        key(&b.1.totals)
            .partial_cmp(&key(&a.1.totals))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    players.truncate(limit);
    players
        .into_iter()
        .enumerate()
        .map(|(index, (identity, player))| RankedPlayer {
            rank: index + 1,
            identity,
            name: player.name,
            totals: player.totals,
        })
        .collect()
}
