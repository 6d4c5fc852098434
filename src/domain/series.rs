use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::stat::StatKind;
use crate::error::{PropcastError, Result};

/// One row of a player's game log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLogEntry {
    pub game_id: String,
    pub game_date: Option<NaiveDate>,
    pub matchup: String,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub threes_made: f64,
}

/// How game index 1..N maps onto the fetched log.
///
/// The stats API returns games newest first, so `MostRecentFirst` makes
/// game 1 the latest game played.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesOrder {
    #[default]
    MostRecentFirst,
    OldestFirst,
}

/// Ordered, non-empty per-game values of a single stat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSeries {
    values: Vec<f64>,
}

impl GameSeries {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(PropcastError::EmptySeries);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(PropcastError::NonFiniteValue { index: index + 1 });
        }
        Ok(Self { values })
    }

    /// Build a series from a newest-first game log
    pub fn from_games(games: &[GameLogEntry], stat: StatKind, order: SeriesOrder) -> Result<Self> {
        let mut values: Vec<f64> = games.iter().map(|g| stat.value_of(g)).collect();
        if order == SeriesOrder::OldestFirst {
            values.reverse();
        }
        Self::new(values)
    }

    /// Number of games, N
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series holds no games
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Population standard deviation (ddof = 0)
    pub fn std_dev(&self) -> f64 {
        let mean = self.mean();
        let variance = self
            .values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / self.values.len() as f64;
        variance.sqrt()
    }
}
