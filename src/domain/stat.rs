use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::series::GameLogEntry;
use crate::error::PropcastError;

/// Statistic a projection can be requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatKind {
    Points,
    Rebounds,
    Assists,
    PointsAssists,
    PointsRebounds,
    ThreesMade,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Points,
        StatKind::Rebounds,
        StatKind::Assists,
        StatKind::PointsAssists,
        StatKind::PointsRebounds,
        StatKind::ThreesMade,
    ];

    /// Short code used on the command line
    pub fn code(&self) -> &'static str {
        match self {
            StatKind::Points => "P",
            StatKind::Rebounds => "R",
            StatKind::Assists => "A",
            StatKind::PointsAssists => "PA",
            StatKind::PointsRebounds => "PR",
            StatKind::ThreesMade => "3P",
        }
    }

    /// Column label as it appears in the game log
    pub fn column(&self) -> &'static str {
        match self {
            StatKind::Points => "PTS",
            StatKind::Rebounds => "REB",
            StatKind::Assists => "AST",
            StatKind::PointsAssists => "PTS_AST",
            StatKind::PointsRebounds => "PTS_REB",
            StatKind::ThreesMade => "FG3M",
        }
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            StatKind::Points => "points",
            StatKind::Rebounds => "rebounds",
            StatKind::Assists => "assists",
            StatKind::PointsAssists => "points+assists",
            StatKind::PointsRebounds => "points+rebounds",
            StatKind::ThreesMade => "three-pointers made",
        }
    }

    /// Extract this stat from a single game. Combo stats are summed.
    pub fn value_of(&self, game: &GameLogEntry) -> f64 {
        match self {
            StatKind::Points => game.points,
            StatKind::Rebounds => game.rebounds,
            StatKind::Assists => game.assists,
            StatKind::PointsAssists => game.points + game.assists,
            StatKind::PointsRebounds => game.points + game.rebounds,
            StatKind::ThreesMade => game.threes_made,
        }
    }
}

impl FromStr for StatKind {
    type Err = PropcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        StatKind::ALL
            .into_iter()
            .find(|kind| {
                kind.code().eq_ignore_ascii_case(needle)
                    || kind.column().eq_ignore_ascii_case(needle)
                    || kind.long_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| PropcastError::UnsupportedStatistic(s.to_string()))
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn game(points: f64, rebounds: f64, assists: f64, threes: f64) -> GameLogEntry {
        GameLogEntry {
            game_id: "0022201200".into(),
            game_date: NaiveDate::from_ymd_opt(2023, 4, 9),
            matchup: "LAL vs. UTA".into(),
            points,
            rebounds,
            assists,
            threes_made: threes,
        }
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("P".parse::<StatKind>().unwrap(), StatKind::Points);
        assert_eq!("pa".parse::<StatKind>().unwrap(), StatKind::PointsAssists);
        assert_eq!("3P".parse::<StatKind>().unwrap(), StatKind::ThreesMade);
        assert_eq!("FG3M".parse::<StatKind>().unwrap(), StatKind::ThreesMade);
        assert_eq!("rebounds".parse::<StatKind>().unwrap(), StatKind::Rebounds);
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "STL".parse::<StatKind>().unwrap_err();
        assert!(matches!(err, PropcastError::UnsupportedStatistic(ref s) if s == "STL"));
        assert_eq!(err.to_string(), "Stat 'STL' not supported");
    }

    #[test]
    fn test_combo_stats_sum_components() {
        let g = game(25.0, 8.0, 7.0, 3.0);
        assert_eq!(StatKind::PointsAssists.value_of(&g), 32.0);
        assert_eq!(StatKind::PointsRebounds.value_of(&g), 33.0);
        assert_eq!(StatKind::ThreesMade.value_of(&g), 3.0);
    }

    #[test]
    fn test_code_round_trip() {
        for kind in StatKind::ALL {
            assert_eq!(kind.code().parse::<StatKind>().unwrap(), kind);
        }
    }
}
