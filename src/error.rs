use thiserror::Error;

/// Main error type for stat projections
#[derive(Error, Debug)]
pub enum PropcastError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    Validation(String),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Data source errors
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Invalid data source response: {0}")]
    InvalidResponse(String),

    // Request errors
    #[error("Stat '{0}' not supported")]
    UnsupportedStatistic(String),

    #[error("Game count must be at least 1, got {0}")]
    InvalidGameCount(usize),

    #[error("Sample count must be at least 1, got {0}")]
    InvalidSampleCount(usize),

    // Series errors
    #[error("No game data found")]
    EmptySeries,

    #[error("Non-finite stat value at game {index}")]
    NonFiniteValue { index: usize },
}

/// Result type alias for PropcastError
pub type Result<T> = std::result::Result<T, PropcastError>;
