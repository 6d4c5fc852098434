use clap::{Parser, Subcommand};
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::adapters::NbaStatsClient;
use crate::config::AppConfig;
use crate::domain::{SeriesOrder, StatKind};
use crate::error::Result;
use crate::report::OutputMode;
use crate::services::{ProjectionRequest, ProjectionService};

#[derive(Parser)]
#[command(name = "propcast")]
#[command(version)]
#[command(about = "Project a player's next-game stat line with Monte Carlo over/under odds", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory
    #[arg(short, long, default_value = "config", global = true)]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project a player's next game for one stat
    Project {
        /// Full player name (e.g., "LeBron James")
        player: String,
        /// Stat code: P, R, A, PA, PR, 3P
        stat: String,
        /// Number of recent games to fit (default from config)
        #[arg(short, long)]
        games: Option<usize>,
        /// Monte Carlo trials (default from config)
        #[arg(short, long)]
        samples: Option<usize>,
        /// Seed for reproducible samples
        #[arg(long)]
        seed: Option<u64>,
        /// Which end of the game log is game 1
        #[arg(long, value_enum)]
        order: Option<SeriesOrder>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List supported stat codes
    Stats {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct StatRow {
    code: &'static str,
    column: &'static str,
    name: &'static str,
}

/// Fetch, fit and simulate one request, then print the report
pub async fn run_project(
    config: &AppConfig,
    request: &ProjectionRequest,
    mode: OutputMode,
) -> Result<()> {
    let client = NbaStatsClient::new(&config.data_source)?;
    let service = ProjectionService::new(client, config.simulation.clone());

    let report = service.project(request).await?;
    println!("{}", report.render(mode)?);
    Ok(())
}

pub fn list_stats(mode: OutputMode) -> Result<()> {
    let rows: Vec<StatRow> = StatKind::ALL
        .iter()
        .map(|kind| StatRow {
            code: kind.code(),
            column: kind.column(),
            name: kind.long_name(),
        })
        .collect();

    match mode {
        OutputMode::Text => println!("{}", Table::new(rows)),
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}
