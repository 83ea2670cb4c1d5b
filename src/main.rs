use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use arena_leaderboards::models::LeaderboardError;
use arena_leaderboards::sink::ConsoleSink;
use arena_leaderboards::source::JsonFileSource;
use arena_leaderboards::window::Period;
use arena_leaderboards::{parse_request, LeaderboardService, Settings};

#[derive(Parser)]
#[clap(name = "arena-lb")]
#[clap(about = "Aggregate match stats into ranked leaderboards", long_about = None)]
struct Cli {
    /// JSON dump of stat records to aggregate
    #[clap(short, long, default_value = "records.json")]
    records: PathBuf,

    /// Configuration file (defaults to the layered config/ lookup)
    #[clap(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one leaderboard (or `all`) to the console
    Lb {
        /// Leaderboard type
        family: String,

        /// Time window
        #[clap(default_value = "day")]
        period: String,
    },

    /// Print the top-3 best-players popup block
    Popup,

    /// Print a single player's weapon accuracy summary
    Stats {
        /// Player identity (stable id, or display name for unauthenticated
        /// entries)
        player: String,

        /// Time window
        #[clap(default_value = "day")]
        period: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new().unwrap_or_else(|_| {
            info!("Using default settings");
            Settings::default()
        }),
    };
    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    let source = Arc::new(JsonFileSource::new(cli.records));
    let service = LeaderboardService::new(source, settings)?;
    let sink = ConsoleSink;
    let now = chrono::Utc::now();

    let outcome = match cli.command {
        Commands::Lb { family, period } => {
            match parse_request(&format!("{} {}", family, period)) {
                Ok(request) => service.run(request, &sink, now).await,
                Err(e) => Err(e),
            }
        }
        Commands::Popup => service.team_switch_popup(&sink).await,
        Commands::Stats { player, period } => match period.parse::<Period>() {
            Ok(period) => service
                .player_accuracy_summary(&player, period, now)
                .await
                .map(|summary| println!("{}", summary)),
            Err(e) => Err(e),
        },
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(LeaderboardError::NoData) => {
            println!("No stats available.");
            Ok(())
        }
        Err(e @ LeaderboardError::SourceUnavailable(_)) => {
            error!("{}", e);
            println!("Stats are unavailable right now, try again later.");
            Err(anyhow::anyhow!("stat source unavailable"))
        }
        Err(e) => {
            println!("{}", e);
            Ok(())
        }
    }
}
