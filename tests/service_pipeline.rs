use async_trait::async_trait;
use propcast::config::SimulationConfig;
use propcast::{
    GameLogEntry, GameLogSource, OutputMode, PlayerRef, ProjectionRequest, ProjectionService,
    PropcastError, Result, SeriesOrder, StatKind,
};

/// In-memory game log keyed by a single player
struct FixedLog {
    player: PlayerRef,
    games: Vec<GameLogEntry>,
}

#[async_trait]
impl GameLogSource for FixedLog {
    async fn find_player(&self, name: &str) -> Result<Option<PlayerRef>> {
        Ok(self
            .player
            .full_name
            .eq_ignore_ascii_case(name)
            .then(|| self.player.clone()))
    }

    async fn recent_games(&self, player_id: i64, count: usize) -> Result<Vec<GameLogEntry>> {
        if player_id != self.player.id {
            return Ok(vec![]);
        }
        Ok(self.games.iter().take(count).cloned().collect())
    }
}

/// Newest-first log where threes climb by one each older game
fn curry_log() -> FixedLog {
    let games = (0..10)
        .map(|i| GameLogEntry {
            game_id: format!("00222011{i:02}"),
            game_date: None,
            matchup: "GSW vs. SAC".into(),
            points: 30.0 - i as f64,
            rebounds: 5.0,
            assists: 6.0,
            threes_made: 2.0 + i as f64,
        })
        .collect();

    FixedLog {
        player: PlayerRef {
            id: 201939,
            full_name: "Stephen Curry".into(),
        },
        games,
    }
}

fn request(stat: &str) -> ProjectionRequest {
    ProjectionRequest {
        player: "stephen curry".into(),
        stat: stat.into(),
        games: Some(5),
        samples: Some(2000),
        seed: Some(11),
        order: None,
    }
}

#[tokio::test]
async fn most_recent_first_projects_along_log_order() {
    let service = ProjectionService::new(curry_log(), SimulationConfig::default());
    let report = service.project(&request("3P")).await.unwrap();

    // Game 1 is the latest game (2 threes); index 6 extrapolates to 7
    assert_eq!(report.stat, StatKind::ThreesMade);
    assert_eq!(report.series, vec![2.0, 3.0, 4.0, 5.0, 6.0]);
    assert!((report.trend.slope() - 1.0).abs() < 1e-9);
    assert!((report.projection.value - 7.0).abs() < 1e-9);
    assert_eq!(report.simulation.sample_count(), 2000);
}

#[tokio::test]
async fn oldest_first_reverses_the_trend() {
    let service = ProjectionService::new(curry_log(), SimulationConfig::default());
    let mut req = request("3P");
    req.order = Some(SeriesOrder::OldestFirst);
    let report = service.project(&req).await.unwrap();

    assert_eq!(report.series, vec![6.0, 5.0, 4.0, 3.0, 2.0]);
    assert!((report.projection.value - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn report_renders_both_modes() {
    let service = ProjectionService::new(curry_log(), SimulationConfig::default());
    let report = service.project(&request("PR")).await.unwrap();

    let text = report.render(OutputMode::Text).unwrap();
    assert!(text.contains("Stephen Curry PTS_REB Projection"));
    assert!(text.contains("Over 5 PTS_REB:"));

    let json: serde_json::Value =
        serde_json::from_str(&report.render(OutputMode::Json).unwrap()).unwrap();
    assert_eq!(json["player"]["id"], 201939);
    assert_eq!(json["seed"], 11);
}

#[tokio::test]
async fn errors_surface_to_caller() {
    let service = ProjectionService::new(curry_log(), SimulationConfig::default());

    let err = service.project(&request("steals")).await.unwrap_err();
    assert!(matches!(err, PropcastError::UnsupportedStatistic(_)));

    let mut req = request("P");
    req.player = "Klay Thompson".into();
    let err = service.project(&req).await.unwrap_err();
    assert!(matches!(err, PropcastError::PlayerNotFound(_)));

    let mut req = request("P");
    req.samples = Some(0);
    let err = service.project(&req).await.unwrap_err();
    assert!(matches!(err, PropcastError::InvalidSampleCount(0)));
}
