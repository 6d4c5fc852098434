//! Request-scoped stat projection
//!
//! Resolves the player, pulls the recent game log, fits the trend and runs
//! the Monte Carlo estimate. Each call is independent.

use tracing::{debug, info, warn};

use crate::adapters::GameLogSource;
use crate::config::SimulationConfig;
use crate::domain::{GameSeries, SeriesOrder, StatKind};
use crate::error::{PropcastError, Result};
use crate::forecast::{
    fit_and_project, RandomProvider, SeededRandom, ThreadRandom, UncertaintyEstimator,
};
use crate::report::ProjectionReport;

/// Parameters of a single projection
#[derive(Debug, Clone, Default)]
pub struct ProjectionRequest {
    pub player: String,
    /// Stat code or name, e.g. "PA" or "points+assists"
    pub stat: String,
    /// Games to fit over; falls back to the configured default
    pub games: Option<usize>,
    /// Monte Carlo trials; falls back to the configured default
    pub samples: Option<usize>,
    /// Fixed seed for reproducible samples
    pub seed: Option<u64>,
    pub order: Option<SeriesOrder>,
}

pub struct ProjectionService<S> {
    source: S,
    settings: SimulationConfig,
}

impl<S: GameLogSource> ProjectionService<S> {
    pub fn new(source: S, settings: SimulationConfig) -> Self {
        Self { source, settings }
    }

    pub async fn project(&self, request: &ProjectionRequest) -> Result<ProjectionReport> {
        // Reject bad input before touching the network
        let stat: StatKind = request.stat.parse()?;
        let games_requested = request.games.unwrap_or(self.settings.default_games);
        if games_requested == 0 {
            return Err(PropcastError::InvalidGameCount(games_requested));
        }
        let estimator =
            UncertaintyEstimator::new(request.samples.unwrap_or(self.settings.sample_count))?;
        let order = request.order.unwrap_or(self.settings.order);

        let player = self
            .source
            .find_player(&request.player)
            .await?
            .ok_or_else(|| PropcastError::PlayerNotFound(request.player.clone()))?;
        debug!("Resolved '{}' to player {}", request.player, player.id);

        let games = self.source.recent_games(player.id, games_requested).await?;
        if !games.is_empty() && games.len() < games_requested {
            warn!(
                "Requested {} games for {} but only {} available",
                games_requested,
                player.full_name,
                games.len()
            );
        }

        let series = GameSeries::from_games(&games, stat, order)?;
        let (projection, trend) = fit_and_project(&series);

        let mut rng: Box<dyn RandomProvider> = match request.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(ThreadRandom::new()),
        };
        let simulation = estimator.simulate(&trend, &series, rng.as_mut());

        info!(
            player = %player.full_name,
            stat = %stat,
            games = series.len(),
            projection = projection.value,
            slope = trend.slope(),
            over = simulation.over_probability,
            under = simulation.under_probability,
            "Projection complete"
        );

        Ok(ProjectionReport {
            player,
            stat,
            order,
            games,
            series: series.values().to_vec(),
            projection,
            trend,
            simulation,
            seed: request.seed,
        })
    }
}
