use async_trait::async_trait;
use courtside::adapters::OddsSource;
use courtside::config::{AppConfig, FetchConfig};
use courtside::domain::GameRecord;
use courtside::engine::{rank_predictions, transform_batch, ConfidenceTier};
use courtside::services::{DataOrigin, FetchOrchestrator, FetchOutcome};
use courtside::Result;
use std::sync::Arc;

fn fixture_games() -> Vec<GameRecord> {
    serde_json::from_str(include_str!("fixtures/odds_response.json"))
        .expect("fixture should parse")
}

struct FixtureSource;

#[async_trait]
impl OddsSource for FixtureSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn fetch_games(&self) -> Result<Vec<GameRecord>> {
        Ok(fixture_games())
    }
}

#[test]
fn fixture_games_become_predictions() {
    let predictions = transform_batch(&fixture_games()).unwrap();
    assert_eq!(predictions.len(), 3);

    // First bookmaker only: DraftKings 1.38 / 3.10
    let magic = &predictions[0];
    assert_eq!(magic.predicted_winner.as_deref(), Some("Orlando Magic"));
    assert_eq!(magic.confidence, Some(69));
    assert_eq!(magic.home_odds, 1.38);

    let thunder = &predictions[1];
    assert_eq!(
        thunder.predicted_winner.as_deref(),
        Some("Oklahoma City Thunder")
    );
    assert_eq!(thunder.confidence, Some(63));
    assert_eq!(thunder.start_time.to_rfc3339(), "2026-01-10T00:30:00+00:00");

    let clippers = &predictions[2];
    assert_eq!(clippers.predicted_winner, None);
    assert_eq!(clippers.confidence, None);
    assert_eq!(ConfidenceTier::from_confidence(clippers.confidence), ConfidenceTier::NoData);
}

#[test]
fn ranking_puts_confident_games_first() {
    let mut predictions = transform_batch(&fixture_games()).unwrap();
    predictions.reverse();

    let ranked = rank_predictions(&predictions);
    let teams: Vec<&str> = ranked.iter().map(|p| p.home_team.as_str()).collect();
    assert_eq!(
        teams,
        vec!["Orlando Magic", "Detroit Pistons", "Los Angeles Clippers"]
    );
}

#[test]
fn prediction_json_uses_camel_case() {
    let predictions = transform_batch(&fixture_games()).unwrap();
    let json = serde_json::to_value(&predictions[0]).unwrap();

    assert_eq!(json["homeTeam"], "Orlando Magic");
    assert_eq!(json["confidencePercent"], 69);
    assert_eq!(json["homeDecimalOdds"], 1.38);
    assert!(json["startTime"].is_string());
    assert!(serde_json::to_value(&predictions[2]).unwrap()["confidencePercent"].is_null());
}

#[tokio::test]
async fn orchestrator_serves_fixture_as_live() {
    let orchestrator = FetchOrchestrator::new(Arc::new(FixtureSource), FetchConfig::default());

    match orchestrator.run_cycle(false, |_| {}).await {
        FetchOutcome::Success(batch) => {
            assert_eq!(batch.origin, DataOrigin::Live);
            assert_eq!(batch.predictions.len(), 3);
        }
        FetchOutcome::Failure(e) => panic!("cycle failed: {e}"),
    }
}

#[test]
fn bundled_config_loads_with_defaults() {
    let cfg = AppConfig::load_from(concat!(env!("CARGO_MANIFEST_DIR"), "/config")).unwrap();
    assert_eq!(cfg.source.sport, "basketball_nba");
    assert_eq!(cfg.fetch.request_timeout_ms, 20_000);
    assert_eq!(cfg.controller.poll_interval_secs, 900);
    assert!(cfg.source.mirrors.is_empty());
}
