//! NBA Stats API Client
//!
//! Looks up players and pulls per-game box score lines from stats.nba.com.
//! No API key required, but the endpoint rejects requests without
//! browser-like headers.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::DataSourceConfig;
use crate::domain::GameLogEntry;
use crate::error::{PropcastError, Result};

// ── Public types ────────────────────────────────────────────────

/// A player resolved from a name lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: i64,
    pub full_name: String,
}

/// Supplies recent game logs for a player
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameLogSource: Send + Sync {
    /// Resolve a player by full name (case-insensitive)
    async fn find_player(&self, name: &str) -> Result<Option<PlayerRef>>;

    /// Up to `count` most recent games, newest first
    async fn recent_games(&self, player_id: i64, count: usize) -> Result<Vec<GameLogEntry>>;
}

// ── Stats API JSON deserialization structs ───────────────────────

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| PropcastError::InvalidResponse(format!("missing column {name}")))
    }
}

impl StatsResponse {
    fn first_set(self) -> Result<ResultSet> {
        self.result_sets
            .into_iter()
            .next()
            .ok_or_else(|| PropcastError::InvalidResponse("no result sets".to_string()))
    }
}

// ── Client ──────────────────────────────────────────────────────

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// stats.nba.com client
pub struct NbaStatsClient {
    http: reqwest::Client,
    base_url: String,
    season: String,
    season_type: String,
}

impl NbaStatsClient {
    pub fn new(config: &DataSourceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            season: config.season.clone(),
            season_type: config.season_type.clone(),
        })
    }

    async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<StatsResponse> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn parse_players(data: StatsResponse) -> Result<Vec<PlayerRef>> {
        let set = data.first_set()?;
        let id_col = set.column("PERSON_ID")?;
        let name_col = set.column("DISPLAY_FIRST_LAST")?;

        let players = set
            .row_set
            .iter()
            .filter_map(|row| {
                let id = row.get(id_col).and_then(as_i64)?;
                let full_name = row.get(name_col)?.as_str()?.to_string();
                Some(PlayerRef { id, full_name })
            })
            .collect();
        Ok(players)
    }

    /// Exact name match wins; otherwise the first player whose name contains
    /// the query.
    fn match_player(players: Vec<PlayerRef>, name: &str) -> Option<PlayerRef> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let exact = players
            .iter()
            .position(|p| p.full_name.to_lowercase() == needle);
        match exact {
            Some(i) => players.into_iter().nth(i),
            None => players
                .into_iter()
                .find(|p| p.full_name.to_lowercase().contains(&needle)),
        }
    }

    fn parse_game_log(data: StatsResponse, count: usize) -> Result<Vec<GameLogEntry>> {
        let set = data.first_set()?;
        let game_id = set.column("Game_ID")?;
        let date = set.column("GAME_DATE")?;
        let matchup = set.column("MATCHUP")?;
        let pts = set.column("PTS")?;
        let reb = set.column("REB")?;
        let ast = set.column("AST")?;
        let fg3m = set.column("FG3M")?;

        let stat = |row: &[Value], col: usize| -> Result<f64> {
            row.get(col).and_then(Value::as_f64).ok_or_else(|| {
                PropcastError::InvalidResponse(format!(
                    "non-numeric {} in game log",
                    set.headers[col]
                ))
            })
        };

        set.row_set
            .iter()
            .take(count)
            .map(|row| {
                let row = row.as_slice();
                Ok(GameLogEntry {
                    game_id: row
                        .get(game_id)
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    game_date: row.get(date).and_then(Value::as_str).and_then(parse_game_date),
                    matchup: row
                        .get(matchup)
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    points: stat(row, pts)?,
                    rebounds: stat(row, reb)?,
                    assists: stat(row, ast)?,
                    threes_made: stat(row, fg3m)?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl GameLogSource for NbaStatsClient {
    async fn find_player(&self, name: &str) -> Result<Option<PlayerRef>> {
        let data = self
            .get(
                "commonallplayers",
                &[
                    ("LeagueID", "00"),
                    ("Season", self.season.as_str()),
                    ("IsOnlyCurrentSeason", "0"),
                ],
            )
            .await?;

        let players = Self::parse_players(data)?;
        debug!("NBA stats: {} players in index", players.len());
        Ok(Self::match_player(players, name))
    }

    async fn recent_games(&self, player_id: i64, count: usize) -> Result<Vec<GameLogEntry>> {
        let player_id = player_id.to_string();
        let data = self
            .get(
                "playergamelog",
                &[
                    ("PlayerID", player_id.as_str()),
                    ("Season", self.season.as_str()),
                    ("SeasonType", self.season_type.as_str()),
                ],
            )
            .await?;

        let games = Self::parse_game_log(data, count)?;
        debug!("NBA stats: fetched {} games for player {}", games.len(), player_id);
        Ok(games)
    }
}

/// Person ids come back as numbers, but tolerate strings
fn as_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

/// Parse "APR 09, 2023" or "2023-04-09"
fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%b %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}
