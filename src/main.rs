use clap::Parser;
use propcast::cli::{self, Cli, Commands};
use propcast::config::AppConfig;
use propcast::logging::{init_logging, init_logging_simple};
use propcast::report::OutputMode;
use propcast::services::ProjectionRequest;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { json } => {
            init_logging_simple();
            cli::list_stats(OutputMode::from_json_flag(json))?;
        }
        Commands::Project {
            player,
            stat,
            games,
            samples,
            seed,
            order,
            json,
        } => {
            let config = AppConfig::load_validated(&cli.config)?;
            let _guard = init_logging(&config.logging.level);

            info!(
                "Projecting {} for '{}' ({} season)",
                stat, player, config.data_source.season
            );

            let request = ProjectionRequest {
                player,
                stat,
                games,
                samples,
                seed,
                order,
            };
            cli::run_project(&config, &request, OutputMode::from_json_flag(json)).await?;
        }
    }

    Ok(())
}
