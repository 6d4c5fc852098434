pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod logging;
pub mod report;
pub mod services;

pub use adapters::{GameLogSource, NbaStatsClient, PlayerRef};
pub use config::AppConfig;
pub use domain::{GameLogEntry, GameSeries, SeriesOrder, StatKind};
pub use error::{PropcastError, Result};
pub use forecast::{
    fit_and_project, FittedTrend, Projection, RandomProvider, SeededRandom, SimulationResult,
    ThreadRandom, UncertaintyEstimator,
};
pub use report::{Histogram, OutputMode, ProjectionReport};
pub use services::{ProjectionRequest, ProjectionService};
