use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Unknown period: {0}. Available periods: day, week, month")]
    InvalidPeriod(String),

    #[error("Unknown leaderboard type: {0}. Available types: all, accuracy, damage_dealt, damage_taken, kills, deaths, winners, losers, snipers, attackers, best")]
    InvalidFamily(String),

    #[error("No stats available")]
    NoData,

    #[error("Stat source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, LeaderboardError>;
