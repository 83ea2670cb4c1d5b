use serde::Serialize;

/// One ranked row: 1-based position, display name, and the family's
/// pre-stringified metric cells.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub name: String,
    pub values: Vec<String>,
}

/// The terminal artifact of a leaderboard computation, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardTable {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub entries: Vec<RankedEntry>,
}

impl LeaderboardTable {
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|entry| {
                let mut row = vec![entry.rank.to_string(), entry.name.clone()];
                row.extend(entry.values.iter().cloned());
                row
            })
            .collect()
    }
}
