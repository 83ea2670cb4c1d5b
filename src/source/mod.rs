pub mod json;

pub use json::JsonFileSource;

use async_trait::async_trait;

use crate::models::{Result, StatRecord};

/// Which players a fetch covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerScope {
    All,
    Player(String),
}

impl PlayerScope {
    pub fn matches(&self, record: &StatRecord) -> bool {
        match self {
            PlayerScope::All => true,
            PlayerScope::Player(identity) => record.identity() == *identity,
        }
    }
}

/// Boundary to wherever raw match stats live. An empty result is a valid
/// answer; only transport failure is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_records(&self, scope: &PlayerScope) -> Result<Vec<StatRecord>>;
}

/// In-memory source over an already-materialized record set.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<StatRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<StatRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch_records(&self, scope: &PlayerScope) -> Result<Vec<StatRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|record| scope.matches(record))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
pub mod test_support {
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    use crate::models::StatRecord;

    /// A minimal valid record timestamped at a fixed instant tests can
    /// resolve windows around.
    pub fn record(match_id: &str, name: &str) -> StatRecord {
        StatRecord {
            player_id: None,
            name: name.to_string(),
            match_id: match_id.to_string(),
            timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()),
            kills: 0,
            deaths: 0,
            damage_dealt: 0,
            damage_taken: 0,
            win: false,
            loss: false,
            medals: HashMap::new(),
            weapons: HashMap::new(),
        }
    }
}
