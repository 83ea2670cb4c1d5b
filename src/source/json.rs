use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::models::{LeaderboardError, Result, StatRecord};
use crate::source::{PlayerScope, RecordSource};

/// Reads a JSON array of stat records dumped from the store. Individually
/// malformed entries are skipped and counted so one bad record cannot fail
/// a whole leaderboard; only I/O and top-level parse failures are fatal.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch_records(&self, scope: &PlayerScope) -> Result<Vec<StatRecord>> {
        info!("Fetching records from {}", self.path.display());

        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            LeaderboardError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let values: Vec<serde_json::Value> = serde_json::from_str(&raw)
            .map_err(|e| LeaderboardError::SourceUnavailable(e.to_string()))?;

        let mut records = Vec::with_capacity(values.len());
        let mut skipped = 0usize;
        for value in values {
            match serde_json::from_value::<StatRecord>(value) {
                Ok(record) => match record.validate() {
                    Ok(()) => {
                        if scope.matches(&record) {
                            records.push(record);
                        }
                    }
                    Err(e) => {
                        skipped += 1;
                        warn!("Skipping record: {}", e);
                    }
                },
                Err(e) => {
                    skipped += 1;
                    warn!("Skipping undecodable record: {}", e);
                }
            }
        }
        if skipped > 0 {
            warn!("Skipped {} malformed records from {}", skipped, self.path.display());
        }

        Ok(records)
    }
}
