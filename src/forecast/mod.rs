//! Forecasting core: trend fit plus Monte Carlo uncertainty

pub mod simulation;
pub mod trend;

pub use simulation::{
    RandomProvider, SeededRandom, SimulationResult, ThreadRandom, UncertaintyEstimator,
    DEFAULT_SAMPLE_COUNT,
};
pub use trend::{fit_and_project, FittedTrend, Projection};
