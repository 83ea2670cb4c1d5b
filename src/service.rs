use chrono::{DateTime, FixedOffset, Utc};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::aggregate::{
    accumulate, AccuracyTotals, AttackerTotals, DamageTotals, FamilyColumns, KillDeathTotals,
    SniperTotals, WinLossTotals,
};
use crate::command::{Family, LeaderboardRequest};
use crate::config::Settings;
use crate::models::{LeaderboardError, LeaderboardTable, RankedEntry, Result, StatRecord};
use crate::rank::rank_players;
use crate::scoring::{CompositeScorer, CompositeTotals};
use crate::sink::DeliverySink;
use crate::source::{PlayerScope, RecordSource};
use crate::window::{filter_records, Period, TimeWindow};

const POPUP_NAME_WIDTH: usize = 10;

/// Runs the full pipeline per request: fetch, filter to the resolved
/// window, accumulate, score, rank, render. Each computation is pure over
/// its fetched snapshot; nothing is shared or persisted between requests,
/// and an error discards the whole computation rather than exposing
/// partial totals.
#[derive(Clone)]
pub struct LeaderboardService {
    source: Arc<dyn RecordSource>,
    settings: Settings,
    tz: FixedOffset,
    scorer: CompositeScorer,
}

impl LeaderboardService {
    pub fn new(source: Arc<dyn RecordSource>, settings: Settings) -> Result<Self> {
        let tz = settings.reference_offset()?;
        let scorer = CompositeScorer::new(
            settings.scoring.weights.clone(),
            settings.scoring.score_decimals,
        );
        Ok(Self {
            source,
            settings,
            tz,
            scorer,
        })
    }

    pub async fn run(
        &self,
        request: LeaderboardRequest,
        sink: &dyn DeliverySink,
        now: DateTime<Utc>,
    ) -> Result<()> {
        match request.family {
            Family::All => self.run_all(request.period, sink, now).await,
            family => {
                let table = self.leaderboard(family, request.period, now).await?;
                let lines: Vec<String> = table.render().lines().map(str::to_string).collect();
                sink.send_lines(&lines).await
            }
        }
    }

    /// Computes one concrete family's table for the given period.
    pub async fn leaderboard(
        &self,
        family: Family,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<LeaderboardTable> {
        let records = self.windowed_records(period, now).await?;
        self.build(family, period, &records)
    }

    /// Computes every concrete family over one immutable snapshot,
    /// fanning the folds out across tasks, then emits the tables in
    /// [`Family::CONCRETE`] order with a pacing delay between them.
    pub async fn run_all(
        &self,
        period: Period,
        sink: &dyn DeliverySink,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let records: Arc<[StatRecord]> = self.windowed_records(period, now).await?.into();
        info!(
            "Running all leaderboards over {} records ({})",
            records.len(),
            period.label()
        );

        let handles = Family::CONCRETE.map(|family| {
            let service = self.clone();
            let snapshot = Arc::clone(&records);
            tokio::spawn(async move { service.build(family, period, &snapshot) })
        });
        let results = join_all(handles).await;

        let pacing = Duration::from_millis(self.settings.leaderboard.pacing_ms);
        let mut first = true;
        for (family, joined) in Family::CONCRETE.into_iter().zip(results) {
            let outcome = joined.unwrap_or_else(|e| {
                Err(LeaderboardError::SourceUnavailable(format!(
                    "{} computation failed: {}",
                    family.tag(),
                    e
                )))
            });
            match outcome {
                Ok(table) => {
                    if !first {
                        tokio::time::sleep(pacing).await;
                    }
                    first = false;
                    let lines: Vec<String> = table.render().lines().map(str::to_string).collect();
                    sink.send_lines(&lines).await?;
                }
                Err(LeaderboardError::NoData) => {
                    warn!("No data for {} ({})", family.tag(), period.label());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Top-3 composite summary shown on a team-change event, independent of
    /// any leaderboard query. Covers all stored records rather than a
    /// window.
    pub async fn team_switch_popup(&self, sink: &dyn DeliverySink) -> Result<()> {
        let records = self.source.fetch_records(&PlayerScope::All).await?;
        if records.is_empty() {
            return Err(LeaderboardError::NoData);
        }

        let totals = accumulate::<CompositeTotals>(&records);
        let ranked = rank_players(
            totals,
            |t| self.scorer.score(t),
            self.settings.leaderboard.popup_top_n,
        );
        let lines: Vec<String> = ranked
            .iter()
            .map(|player| {
                format!(
                    "{}. {} (score: {})",
                    player.rank,
                    truncate_name(&player.name, POPUP_NAME_WIDTH),
                    self.scorer.display(self.scorer.score(&player.totals))
                )
            })
            .collect();

        sink.popup(&format!("^3Best players:^7\n{}", lines.join("\n")))
            .await
    }

    /// Colorized per-weapon accuracy summary for one player over the given
    /// period.
    pub async fn player_accuracy_summary(
        &self,
        identity: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let window = TimeWindow::resolve(period, now, self.tz);
        let records = self
            .source
            .fetch_records(&PlayerScope::Player(identity.to_string()))
            .await?;
        let records = filter_records(records, &window);
        if records.is_empty() {
            return Err(LeaderboardError::NoData);
        }

        let games = records.len();
        let totals = accumulate::<AccuracyTotals>(&records);
        let player = totals
            .into_values()
            .next()
            .ok_or(LeaderboardError::NoData)?;
        Ok(format!(
            "{}'s stats over {} games ({}): {}",
            player.name,
            games,
            period.label(),
            player.totals.weapons.summary()
        ))
    }

    async fn windowed_records(
        &self,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<Vec<StatRecord>> {
        let window = TimeWindow::resolve(period, now, self.tz);
        let records = self.source.fetch_records(&PlayerScope::All).await?;
        let records = filter_records(records, &window);
        if records.is_empty() {
            return Err(LeaderboardError::NoData);
        }
        Ok(records)
    }

    fn build(&self, family: Family, period: Period, records: &[StatRecord]) -> Result<LeaderboardTable> {
        let limit = self.settings.leaderboard.top_n;
        match family {
            Family::DamageDealt => self.family_table::<DamageTotals>(
                records,
                format!("Damage Dealt ({})", period.label()),
                |t| t.given as f64,
                limit,
            ),
            Family::DamageTaken => self.family_table::<DamageTotals>(
                records,
                format!("Damage Taken ({})", period.label()),
                |t| t.taken as f64,
                limit,
            ),
            Family::Kills => self.family_table::<KillDeathTotals>(
                records,
                format!("Kills ({})", period.label()),
                |t| t.kills as f64,
                limit,
            ),
            Family::Deaths => self.family_table::<KillDeathTotals>(
                records,
                format!("Deaths ({})", period.label()),
                |t| t.deaths as f64,
                limit,
            ),
            Family::Winners => self.family_table::<WinLossTotals>(
                records,
                format!("Wins ({})", period.label()),
                |t| t.wins as f64,
                limit,
            ),
            Family::Losers => self.family_table::<WinLossTotals>(
                records,
                format!("Losses ({})", period.label()),
                |t| t.losses as f64,
                limit,
            ),
            Family::Accuracy => self.family_table::<AccuracyTotals>(
                records,
                format!("Average Accuracy ({})", period.label()),
                |t| t.weapons.average(),
                limit,
            ),
            Family::Snipers => self.family_table::<SniperTotals>(
                records,
                format!("Sniper Medals ({})", period.label()),
                |t| t.total() as f64,
                limit,
            ),
            Family::Attackers => self.family_table::<AttackerTotals>(
                records,
                format!("Attack Medals ({})", period.label()),
                |t| t.total() as f64,
                limit,
            ),
            Family::Best => self.best_table(records, period, limit),
            Family::All => Err(LeaderboardError::InvalidFamily("all".to_string())),
        }
    }

    fn family_table<T: FamilyColumns>(
        &self,
        records: &[StatRecord],
        title: String,
        key: impl Fn(&T) -> f64,
        limit: usize,
    ) -> Result<LeaderboardTable> {
        let totals = accumulate::<T>(records);
        if totals.is_empty() {
            return Err(LeaderboardError::NoData);
        }

        let ranked = rank_players(totals, key, limit);
        let entries = ranked
            .into_iter()
            .map(|player| RankedEntry {
                rank: player.rank,
                name: player.name,
                values: player.totals.row(),
            })
            .collect();

        let mut headers = vec!["#".to_string(), "PLAYER".to_string()];
        headers.extend(T::headers());
        Ok(LeaderboardTable {
            title: Some(title),
            headers,
            entries,
        })
    }

    fn best_table(
        &self,
        records: &[StatRecord],
        period: Period,
        limit: usize,
    ) -> Result<LeaderboardTable> {
        let totals = accumulate::<CompositeTotals>(records);
        if totals.is_empty() {
            return Err(LeaderboardError::NoData);
        }

        let ranked = rank_players(totals, |t| self.scorer.score(t), limit);
        let entries = ranked
            .into_iter()
            .map(|player| {
                let score = self.scorer.score(&player.totals);
                RankedEntry {
                    rank: player.rank,
                    name: player.name,
                    values: vec![self.scorer.display(score)],
                }
            })
            .collect();

        Ok(LeaderboardTable {
            title: Some(format!("Best Players ({})", period.label())),
            headers: vec!["#".to_string(), "PLAYER".to_string(), "SCORE".to_string()],
            entries,
        })
    }
}

fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let truncated: String = name.chars().take(max).collect();
        format!("{}…", truncated)
    } else {
        name.to_string()
    }
}
