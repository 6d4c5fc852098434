use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::domain::SeriesOrder;
use crate::error::PropcastError;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data_source: DataSourceConfig,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceConfig {
    /// Base URL of the NBA stats API
    pub base_url: String,
    /// Season string in the API's format (e.g., "2022-23")
    pub season: String,
    /// Season type (e.g., "Regular Season", "Playoffs")
    #[serde(default = "default_season_type")]
    pub season_type: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_season_type() -> String {
    "Regular Season".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Monte Carlo trials per projection
    pub sample_count: usize,
    /// Games fetched when the request does not say
    pub default_games: usize,
    /// How game index 1..N maps onto the fetched log
    #[serde(default)]
    pub order: SeriesOrder,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sample_count: 1000,
            default_games: 5,
            order: SeriesOrder::MostRecentFirst,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("data_source.base_url", "https://stats.nba.com/stats")?
            .set_default("data_source.season", "2022-23")?
            .set_default("data_source.season_type", "Regular Season")?
            .set_default("data_source.timeout_secs", 30)?
            .set_default("simulation.sample_count", 1000)?
            .set_default("simulation.default_games", 5)?
            .set_default("simulation.order", "most-recent-first")?
            .set_default("logging.level", "info")?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("PROPCAST_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (PROPCAST_SIMULATION__SAMPLE_COUNT, etc.)
            .add_source(
                Environment::with_prefix("PROPCAST")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Load from `config_dir` and reject values that fail [`AppConfig::validate`]
    pub fn load_validated<P: AsRef<Path>>(config_dir: P) -> crate::error::Result<Self> {
        let config = Self::load_from(config_dir)?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Create a default configuration for CLI usage
    pub fn default_config() -> Self {
        Self {
            data_source: DataSourceConfig {
                base_url: "https://stats.nba.com/stats".to_string(),
                season: "2022-23".to_string(),
                season_type: default_season_type(),
                timeout_secs: default_timeout_secs(),
            },
            simulation: SimulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.simulation.sample_count == 0 {
            errors.push("sample_count must be at least 1".to_string());
        }

        if self.simulation.default_games == 0 {
            errors.push("default_games must be at least 1".to_string());
        }

        if self.data_source.timeout_secs == 0 {
            errors.push("timeout_secs must be positive".to_string());
        }

        if !self.data_source.base_url.starts_with("http") {
            errors.push(format!(
                "base_url must be an http(s) URL, got {}",
                self.data_source.base_url
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// [`AppConfig::validate`] folded into a single `Validation` error
    pub fn ensure_valid(&self) -> crate::error::Result<()> {
        self.validate()
            .map_err(|errors| PropcastError::Validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.sample_count, 1000);
        assert_eq!(config.simulation.default_games, 5);
        assert_eq!(config.simulation.order, SeriesOrder::MostRecentFirst);
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let config = AppConfig::load_from("does-not-exist").unwrap();
        assert_eq!(config.data_source.season_type, "Regular Season");
        assert_eq!(config.data_source.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = AppConfig::default_config();
        config.simulation.sample_count = 0;
        config.simulation.default_games = 0;
        config.data_source.base_url = "stats.nba.com".to_string();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("sample_count"));
    }

    #[test]
    fn test_ensure_valid_reports_every_problem() {
        let mut config = AppConfig::default_config();
        config.simulation.sample_count = 0;
        config.data_source.timeout_secs = 0;

        match config.ensure_valid() {
            Err(PropcastError::Validation(message)) => {
                assert_eq!(
                    message,
                    "sample_count must be at least 1; timeout_secs must be positive"
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_validated_rejects_bad_file() {
        let dir = std::env::temp_dir().join(format!("propcast-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("default.toml"),
            "[simulation]\nsample_count = 0\ndefault_games = 5\n",
        )
        .unwrap();

        let err = AppConfig::load_validated(&dir).unwrap_err();
        let _ = std::fs::remove_dir_all(&dir);

        assert!(matches!(err, PropcastError::Validation(ref m) if m.contains("sample_count")));
    }

    #[test]
    fn test_load_validated_accepts_defaults() {
        let config = AppConfig::load_validated("does-not-exist").unwrap();
        assert_eq!(config.simulation.sample_count, 1000);
    }
}
