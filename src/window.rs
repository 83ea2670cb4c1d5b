use chrono::{DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use std::str::FromStr;
use tracing::debug;

use crate::models::{LeaderboardError, StatRecord};

/// Symbolic leaderboard period. Parsing an unknown tag is a user error and
/// is rejected before any records are touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
}

impl FromStr for Period {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(LeaderboardError::InvalidPeriod(other.to_string())),
        }
    }
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Day => "today",
            Period::Week => "this week",
            Period::Month => "this month",
        }
    }
}

/// Half-open `[start, end)` interval in UTC instants. Boundaries are
/// resolved at local midnight in the process-wide reference timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn resolve(period: Period, now: DateTime<Utc>, tz: FixedOffset) -> Self {
        let today = now.with_timezone(&tz).date_naive();
        let (start, end) = match period {
            Period::Day => (today, today + Duration::days(1)),
            Period::Week => {
                let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                (monday, monday + Duration::days(7))
            }
            Period::Month => {
                let first = today - Duration::days((today.day() - 1) as i64);
                (first, first + Months::new(1))
            }
        };
        TimeWindow {
            start: midnight_utc(start, tz),
            end: midnight_utc(end, tz),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn midnight_utc(date: NaiveDate, tz: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    Utc.from_utc_datetime(&(local - Duration::seconds(tz.local_minus_utc() as i64)))
}

/// Data-hygiene filter, not a validation gate: records without a timestamp
/// are dropped silently and only logged.
pub fn filter_records(records: Vec<StatRecord>, window: &TimeWindow) -> Vec<StatRecord> {
    let mut dropped = 0usize;
    let filtered: Vec<StatRecord> = records
        .into_iter()
        .filter(|record| match record.timestamp {
            Some(t) => window.contains(t),
            None => {
                dropped += 1;
                false
            }
        })
        .collect();
    if dropped > 0 {
        debug!("dropped {} records without a timestamp", dropped);
    }
    filtered
}
