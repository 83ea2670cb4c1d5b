use chrono::FixedOffset;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::LeaderboardError;
use crate::scoring::CompositeWeights;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub scoring: ScoringSettings,
    pub leaderboard: LeaderboardSettings,
    pub source: SourceSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub weights: CompositeWeights,
    /// Decimal places for displayed composite scores; ranking always uses
    /// the unrounded value.
    pub score_decimals: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSettings {
    /// Fixed UTC offset windows are resolved in, e.g. "+02:00". Read once
    /// at startup, immutable for the process lifetime.
    pub reference_timezone: String,
    pub top_n: usize,
    pub popup_top_n: usize,
    /// Delay between successive tables of an `all` run, for rate-limited
    /// sinks.
    pub pacing_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    pub base_url: String,
    pub namespace: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Arena Leaderboards".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            scoring: ScoringSettings {
                weights: CompositeWeights::default(),
                score_decimals: 2,
            },
            leaderboard: LeaderboardSettings {
                reference_timezone: "+00:00".to_string(),
                top_n: 10,
                popup_top_n: 3,
                pacing_ms: 200,
            },
            source: SourceSettings {
                base_url: "http://localhost:6379".to_string(),
                namespace: "arena:players".to_string(),
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("ARENA_LB"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn reference_offset(&self) -> Result<FixedOffset, LeaderboardError> {
        self.leaderboard.reference_timezone.parse().map_err(|e| {
            LeaderboardError::ConfigError(format!(
                "invalid reference timezone {:?}: {}",
                self.leaderboard.reference_timezone, e
            ))
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        self.scoring.weights.validate()?;

        if self.leaderboard.top_n == 0 || self.leaderboard.popup_top_n == 0 {
            return Err("Leaderboard sizes must be at least 1".to_string());
        }

        if self.reference_offset().is_err() {
            return Err(format!(
                "Reference timezone {:?} is not a valid UTC offset",
                self.leaderboard.reference_timezone
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.reference_offset().unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn garbage_timezone_fails_validation() {
        let mut settings = Settings::default();
        settings.leaderboard.reference_timezone = "somewhere".to_string();
        assert!(settings.validate().is_err());
        assert!(matches!(
            settings.reference_offset(),
            Err(LeaderboardError::ConfigError(_))
        ));
    }

    #[test]
    fn negative_weights_fail_validation() {
        let mut settings = Settings::default();
        settings.scoring.weights.accuracy = -1.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn offsets_parse_both_directions() {
        let mut settings = Settings::default();
        settings.leaderboard.reference_timezone = "+02:00".to_string();
        assert_eq!(settings.reference_offset().unwrap().local_minus_utc(), 7200);
        settings.leaderboard.reference_timezone = "-05:00".to_string();
        assert_eq!(settings.reference_offset().unwrap().local_minus_utc(), -18000);
    }
}
