pub mod aggregate;
pub mod command;
pub mod config;
pub mod models;
pub mod rank;
pub mod render;
pub mod scoring;
pub mod service;
pub mod sink;
pub mod source;
pub mod window;

pub use command::{parse_request, Family, LeaderboardRequest};
pub use config::Settings;
pub use models::{LeaderboardError, LeaderboardTable, RankedEntry, Result, StatRecord, Weapon};
pub use service::LeaderboardService;
pub use window::{Period, TimeWindow};
