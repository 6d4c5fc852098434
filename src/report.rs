//! Rendering of projection results.
//!
//! Supports two modes: human-readable text with tables (default) and JSON (--json).

use serde::Serialize;
use std::fmt::Write as _;
use tabled::{Table, Tabled};

use crate::adapters::PlayerRef;
use crate::domain::{GameLogEntry, SeriesOrder, StatKind};
use crate::forecast::{FittedTrend, Projection, SimulationResult};

/// Edge count of the sample histogram
pub const HISTOGRAM_EDGES: usize = 50;

const BAR_WIDTH: usize = 40;

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }
}

/// Everything computed for one projection request
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport {
    pub player: PlayerRef,
    pub stat: StatKind,
    pub order: SeriesOrder,
    pub games: Vec<GameLogEntry>,
    /// Stat values in fitted order, index 1..N
    pub series: Vec<f64>,
    pub projection: Projection,
    pub trend: FittedTrend,
    pub simulation: SimulationResult,
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Tabled)]
struct GameRow {
    #[tabled(rename = "#")]
    index: usize,
    date: String,
    matchup: String,
    value: String,
}

impl ProjectionReport {
    /// One-line over/under/exact split
    pub fn summary_line(&self) -> String {
        let n = self.simulation.baseline;
        let col = self.stat.column();
        format!(
            "Over {n} {col}: {:.1}%, Under {n} {col}: {:.1}%, Exactly {n} {col}: {:.1}%",
            self.simulation.over_probability * 100.0,
            self.simulation.under_probability * 100.0,
            self.simulation.exact_probability * 100.0,
        )
    }

    /// Game log table in fitted order
    pub fn game_table(&self) -> String {
        let mut games: Vec<&GameLogEntry> = self.games.iter().collect();
        if self.order == SeriesOrder::OldestFirst {
            games.reverse();
        }

        let rows: Vec<GameRow> = games
            .iter()
            .zip(&self.series)
            .enumerate()
            .map(|(i, (game, value))| GameRow {
                index: i + 1,
                date: game
                    .game_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string()),
                matchup: game.matchup.clone(),
                value: format!("{value}"),
            })
            .collect();

        Table::new(rows).to_string()
    }

    pub fn histogram(&self) -> Option<Histogram> {
        Histogram::from_samples(&self.simulation.samples, HISTOGRAM_EDGES)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let col = self.stat.column();

        let _ = writeln!(out, "{} {} Projection", self.player.full_name, col);
        let _ = writeln!(out, "{}", self.game_table());
        let _ = writeln!(
            out,
            "Projected {} for game {}: {:.2} (slope {:+.3}, intercept {:.3})",
            col, self.projection.x, self.projection.value, self.trend.slope(), self.trend.intercept()
        );
        let _ = writeln!(
            out,
            "Noise scale {:.3}, residual MSE {:.3}",
            self.trend.noise_scale(),
            self.trend.residual_mse()
        );
        let _ = writeln!(out, "{}", self.summary_line());

        if let Some(hist) = self.histogram() {
            let _ = writeln!(
                out,
                "\n{} {} Distribution ({} simulations, mean {:.2})",
                self.player.full_name,
                col,
                self.simulation.sample_count(),
                self.simulation.mean()
            );
            out.push_str(&hist.render(BAR_WIDTH));
        }
        out
    }

    pub fn render(&self, mode: OutputMode) -> serde_json::Result<String> {
        match mode {
            OutputMode::Text => Ok(self.render_text()),
            OutputMode::Json => serde_json::to_string_pretty(self),
        }
    }
}

/// Equal-width bins over the simulated samples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges, ascending; bin i is [edges[i], edges[i + 1])
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins span `max(min_sample, 0)` to `max_sample` with `edge_count` evenly
    /// spaced edges. The last bin includes its right edge; samples below zero
    /// fall outside and are not counted.
    ///
    /// When every sample sits at one value the range collapses, so a single
    /// unit-wide bin centred on it is used instead.
    pub fn from_samples(samples: &[i64], edge_count: usize) -> Option<Self> {
        let min = *samples.iter().min()?;
        let max = *samples.iter().max()?;
        let lo = min.max(0) as f64;
        let hi = max as f64;

        if hi <= lo || edge_count < 2 {
            let center = hi.max(lo);
            let count = samples.iter().filter(|&&s| s as f64 == center).count();
            return Some(Self {
                edges: vec![center - 0.5, center + 0.5],
                counts: vec![count],
            });
        }

        let step = (hi - lo) / (edge_count - 1) as f64;
        let edges: Vec<f64> = (0..edge_count).map(|i| lo + step * i as f64).collect();
        let bins = edge_count - 1;
        let mut counts = vec![0usize; bins];

        for &s in samples {
            let v = s as f64;
            if v < lo || v > hi {
                continue;
            }
            let idx = (((v - lo) / step) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Text bars scaled to `width` characters; empty bins are skipped
    pub fn render(&self, width: usize) -> String {
        let peak = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let mut out = String::new();
        for (i, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let bar = "#".repeat((count * width).div_ceil(peak));
            let _ = writeln!(
                out,
                "{:>7.2} - {:<7.2} | {:<width$} {}",
                self.edges[i],
                self.edges[i + 1],
                bar,
                count,
                width = width
            );
        }
        out
    }
}
