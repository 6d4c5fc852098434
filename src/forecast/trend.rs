//! Linear trend projection over a game series
//!
//! Fits y = intercept + slope * x by ordinary least squares, where x is the
//! 1-based game index, and evaluates the line one game past the end.

use serde::{Deserialize, Serialize};

use crate::domain::GameSeries;

/// Least-squares line fitted to a game series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedTrend {
    slope: f64,
    intercept: f64,
    /// Number of games fitted, N
    n: usize,
    /// Population std dev of the raw values
    series_std_dev: f64,
    /// Mean squared residual of the fit
    residual_mse: f64,
}

/// Point estimate for the next game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Game index the line was evaluated at (N + 1)
    pub x: f64,
    pub value: f64,
}

impl FittedTrend {
    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Evaluate the fitted line at game index `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Index of the game being projected
    pub fn next_x(&self) -> f64 {
        (self.n + 1) as f64
    }

    pub fn series_std_dev(&self) -> f64 {
        self.series_std_dev
    }

    /// Diagnostic only: noise is drawn from the series spread, not the residuals
    pub fn residual_mse(&self) -> f64 {
        self.residual_mse
    }

    /// Std dev of the noise added to each simulated projection.
    ///
    /// This is the dispersion of the raw series. A residual-based scale would
    /// be the conventional choice; the raw spread keeps output consistent with
    /// earlier releases.
    pub fn noise_scale(&self) -> f64 {
        self.series_std_dev
    }
}

/// Fit a trend to `series` and project game N + 1.
///
/// A single game cannot determine a slope, so N = 1 yields a flat line
/// through that value (slope 0) and the projection equals the value.
pub fn fit_and_project(series: &GameSeries) -> (Projection, FittedTrend) {
    let values = series.values();
    let n = values.len();
    let n_f = n as f64;

    let (slope, intercept) = if n < 2 {
        (0.0, values[0])
    } else {
        // x = 1..=N
        let sum_x: f64 = (1..=n).map(|i| i as f64).sum();
        let sum_y: f64 = values.iter().sum();
        let sum_x2: f64 = (1..=n).map(|i| (i * i) as f64).sum();
        let sum_xy: f64 = values
            .iter()
            .enumerate()
            .map(|(i, &y)| (i + 1) as f64 * y)
            .sum();

        // Distinct integer x values keep this strictly positive for N >= 2
        let denominator = n_f * sum_x2 - sum_x * sum_x;
        let slope = (n_f * sum_xy - sum_x * sum_y) / denominator;
        (slope, (sum_y - slope * sum_x) / n_f)
    };

    let residual_mse = values
        .iter()
        .enumerate()
        .map(|(i, &y)| (y - (intercept + slope * (i + 1) as f64)).powi(2))
        .sum::<f64>()
        / n_f;

    let trend = FittedTrend {
        slope,
        intercept,
        n,
        series_std_dev: series.std_dev(),
        residual_mse,
    };

    let x = trend.next_x();
    let projection = Projection {
        x,
        value: trend.evaluate(x),
    };

    (projection, trend)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> GameSeries {
        GameSeries::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_linear_series() {
        let (projection, trend) = fit_and_project(&series(&[10.0, 12.0, 14.0, 16.0, 18.0]));

        assert!((trend.slope() - 2.0).abs() < 1e-9);
        assert!((trend.intercept() - 8.0).abs() < 1e-9);
        assert_eq!(projection.x, 6.0);
        assert!((projection.value - 20.0).abs() < 1e-9);
        assert!((trend.noise_scale() - 2.828_427).abs() < 1e-6);
        assert!(trend.residual_mse() < 1e-12);
    }

    #[test]
    fn test_constant_series_is_flat() {
        for n in 2..10 {
            let (projection, trend) = fit_and_project(&series(&vec![7.0; n]));
            assert!(trend.slope().abs() < 1e-9, "slope={} for n={}", trend.slope(), n);
            assert!((projection.value - 7.0).abs() < 1e-9);
            assert_eq!(trend.noise_scale(), 0.0);
        }
    }

    #[test]
    fn test_projection_matches_evaluate() {
        let (projection, trend) = fit_and_project(&series(&[31.0, 18.0, 27.0, 22.0, 40.0, 9.0]));
        assert_eq!(trend.evaluate(trend.next_x()), projection.value);
        assert_eq!(projection.x, 7.0);
    }

    #[test]
    fn test_single_game_fallback() {
        let (projection, trend) = fit_and_project(&series(&[5.0]));

        assert_eq!(trend.slope(), 0.0);
        assert_eq!(trend.intercept(), 5.0);
        assert_eq!(projection.value, 5.0);
        assert_eq!(projection.x, 2.0);
        assert_eq!(trend.noise_scale(), 0.0);
        assert_eq!(trend.residual_mse(), 0.0);
    }

    #[test]
    fn test_residual_mse_of_noisy_fit() {
        // Best fit through (1,1) (2,3) (3,2) is y = 1 + 0.5x
        let (_, trend) = fit_and_project(&series(&[1.0, 3.0, 2.0]));
        assert!((trend.slope() - 0.5).abs() < 1e-9);
        assert!((trend.intercept() - 1.0).abs() < 1e-9);
        // residuals: -0.5, 1, -0.5
        assert!((trend.residual_mse() - 0.5).abs() < 1e-9);
    }
}
