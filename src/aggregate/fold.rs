use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::models::StatRecord;

/// Per-family accumulation strategy. One generic fold visits every record
/// exactly once; the totals type decides which fields it sums. `merge`
/// combines partial folds by field-wise addition, so accumulation stays
/// commutative and associative and partitioned folds give the same result
/// as a single pass.
pub trait Accumulate: Default + Send + 'static {
    fn absorb(&mut self, record: &StatRecord);
    fn merge(&mut self, other: Self);
}

/// Running totals for one player, keyed by identity in the fold's map. The
/// display name is captured on first sight.
#[derive(Debug, Clone, Default)]
pub struct PlayerTotals<T> {
    pub name: String,
    pub totals: T,
}

/// Folds records into per-player totals, creating zeroed totals on first
/// sight. Built fresh per query and never persisted.
pub fn accumulate<T: Accumulate>(records: &[StatRecord]) -> HashMap<String, PlayerTotals<T>> {
    let mut totals: HashMap<String, PlayerTotals<T>> = HashMap::new();
    for record in records {
        let entry = totals
            .entry(record.identity())
            .or_insert_with(|| PlayerTotals {
                name: record.name.clone(),
                totals: T::default(),
            });
        entry.totals.absorb(record);
    }
    totals
}

/// Combines two partial folds. Used when record sets are accumulated in
/// disjoint partitions.
pub fn merge_partials<T: Accumulate>(
    mut left: HashMap<String, PlayerTotals<T>>,
    right: HashMap<String, PlayerTotals<T>>,
) -> HashMap<String, PlayerTotals<T>> {
    for (identity, partial) in right {
        match left.entry(identity) {
            Entry::Occupied(mut occupied) => occupied.get_mut().totals.merge(partial.totals),
            Entry::Vacant(vacant) => {
                vacant.insert(partial);
            }
        }
    }
    left
}
