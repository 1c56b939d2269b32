//! Embedded sample dataset
//!
//! Served when the user forces sample mode or when a live cycle fails with
//! auto-fallback enabled. Predictions go through the same normalizer as live
//! odds, so the two sources are indistinguishable apart from ids.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{PredictionRecord, Side};
use crate::engine::normalize;

struct SampleGame {
    home_team: &'static str,
    away_team: &'static str,
    home_odds: f64,
    away_odds: f64,
    hours_ahead: i64,
}

const SAMPLE_GAMES: [SampleGame; 8] = [
    SampleGame {
        home_team: "Los Angeles Lakers",
        away_team: "Golden State Warriors",
        home_odds: 1.75,
        away_odds: 2.15,
        hours_ahead: 3,
    },
    SampleGame {
        home_team: "Boston Celtics",
        away_team: "Brooklyn Nets",
        home_odds: 1.65,
        away_odds: 2.35,
        hours_ahead: 4,
    },
    SampleGame {
        home_team: "Miami Heat",
        away_team: "Philadelphia 76ers",
        home_odds: 2.10,
        away_odds: 1.75,
        hours_ahead: 6,
    },
    SampleGame {
        home_team: "Phoenix Suns",
        away_team: "Denver Nuggets",
        home_odds: 1.90,
        away_odds: 1.95,
        hours_ahead: 2,
    },
    SampleGame {
        home_team: "Milwaukee Bucks",
        away_team: "Chicago Bulls",
        home_odds: 1.40,
        away_odds: 2.90,
        hours_ahead: 5,
    },
    SampleGame {
        home_team: "Dallas Mavericks",
        away_team: "Houston Rockets",
        home_odds: 1.55,
        away_odds: 2.45,
        hours_ahead: 7,
    },
    SampleGame {
        home_team: "Toronto Raptors",
        away_team: "Cleveland Cavaliers",
        home_odds: 2.20,
        away_odds: 1.68,
        hours_ahead: 1,
    },
    SampleGame {
        home_team: "New York Knicks",
        away_team: "Atlanta Hawks",
        home_odds: 1.85,
        away_odds: 2.00,
        hours_ahead: 8,
    },
];

/// Sample predictions with start times relative to `now`.
pub fn sample_predictions(now: DateTime<Utc>) -> Vec<PredictionRecord> {
    SAMPLE_GAMES
        .iter()
        .enumerate()
        .map(|(idx, game)| {
            let prediction = normalize(game.home_odds, game.away_odds);
            PredictionRecord {
                id: format!("sample-{}", idx + 1),
                home_team: game.home_team.to_string(),
                away_team: game.away_team.to_string(),
                start_time: now + Duration::hours(game.hours_ahead),
                predicted_winner: prediction.winner.map(|side| match side {
                    Side::Home => game.home_team.to_string(),
                    Side::Away => game.away_team.to_string(),
                }),
                confidence: prediction.confidence,
                home_odds: game.home_odds,
                away_odds: game.away_odds,
            }
        })
        .collect()
}
