use chrono::{DateTime, Utc};

use super::normalizer::normalize;
use crate::domain::{GameRecord, PredictionRecord, Side};
use crate::error::{CourtsideError, Result};

/// Build a prediction for one upstream game.
///
/// Only the first bookmaker's h2h market is used. Missing bookmakers,
/// markets or outcomes leave that side unpriced; an unparseable start time
/// rejects the record.
pub fn transform_game(game: &GameRecord) -> Result<PredictionRecord> {
    let start_time = parse_commence_time(game)?;

    let market = game.primary_h2h_market();
    let home_odds = market
        .and_then(|m| m.price_for(&game.home_team))
        .unwrap_or(0.0);
    let away_odds = market
        .and_then(|m| m.price_for(&game.away_team))
        .unwrap_or(0.0);

    let prediction = normalize(home_odds, away_odds);
    let predicted_winner = prediction.winner.map(|side| match side {
        Side::Home => game.home_team.clone(),
        Side::Away => game.away_team.clone(),
    });

    Ok(PredictionRecord {
        id: game.id.clone(),
        home_team: game.home_team.clone(),
        away_team: game.away_team.clone(),
        start_time,
        predicted_winner,
        confidence: prediction.confidence,
        home_odds,
        away_odds,
    })
}

/// Transform a whole response. All-or-nothing: one malformed record fails
/// the batch rather than returning the remaining games.
pub fn transform_batch(games: &[GameRecord]) -> Result<Vec<PredictionRecord>> {
    games.iter().map(transform_game).collect()
}

fn parse_commence_time(game: &GameRecord) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(game.commence_time.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CourtsideError::MalformedRecord {
            game_id: game.id.clone(),
            reason: format!("invalid commence_time {:?}: {}", game.commence_time, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bookmaker, Market, Outcome};

    fn game(id: &str, commence_time: &str, prices: Option<(f64, f64)>) -> GameRecord {
        let bookmakers = prices
            .map(|(home, away)| {
                vec![Bookmaker {
                    key: "draftkings".into(),
                    title: "DraftKings".into(),
                    last_update: "2026-01-09T18:00:00Z".into(),
                    markets: vec![Market {
                        key: "h2h".into(),
                        outcomes: vec![
                            Outcome {
                                name: "Golden State Warriors".into(),
                                price: away,
                            },
                            Outcome {
                                name: "Los Angeles Lakers".into(),
                                price: home,
                            },
                        ],
                    }],
                }]
            })
            .unwrap_or_default();

        GameRecord {
            id: id.to_string(),
            sport_key: "basketball_nba".into(),
            sport_title: "NBA".into(),
            commence_time: commence_time.to_string(),
            home_team: "Los Angeles Lakers".into(),
            away_team: "Golden State Warriors".into(),
            bookmakers,
        }
    }

    #[test]
    fn test_transform_priced_game() {
        let record = transform_game(&game("g1", "2026-01-10T03:30:00Z", Some((1.75, 2.15)))).unwrap();

        assert_eq!(record.id, "g1");
        assert_eq!(record.predicted_winner.as_deref(), Some("Los Angeles Lakers"));
        assert_eq!(record.confidence, Some(55));
        assert_eq!(record.home_odds, 1.75);
        assert_eq!(record.away_odds, 2.15);
        assert_eq!(record.start_time.to_rfc3339(), "2026-01-10T03:30:00+00:00");
    }

    #[test]
    fn test_missing_bookmaker_is_unpriced() {
        let record = transform_game(&game("g2", "2026-01-10T03:30:00Z", None)).unwrap();

        assert_eq!(record.predicted_winner, None);
        assert_eq!(record.confidence, None);
        assert_eq!(record.home_odds, 0.0);
        assert_eq!(record.away_odds, 0.0);
    }

    #[test]
    fn test_missing_outcome_leaves_one_side_unpriced() {
        let mut g = game("g3", "2026-01-10T03:30:00Z", Some((1.75, 2.15)));
        g.bookmakers[0].markets[0]
            .outcomes
            .retain(|o| o.name != "Los Angeles Lakers");

        let record = transform_game(&g).unwrap();
        assert_eq!(record.home_odds, 0.0);
        assert_eq!(record.predicted_winner.as_deref(), Some("Golden State Warriors"));
        assert_eq!(record.confidence, Some(100));
    }

    #[test]
    fn test_offset_timestamp_is_converted_to_utc() {
        let record = transform_game(&game("g4", "2026-01-09T22:30:00-05:00", None)).unwrap();
        assert_eq!(record.start_time.to_rfc3339(), "2026-01-10T03:30:00+00:00");
    }

    #[test]
    fn test_malformed_time_fails_record() {
        let err = transform_game(&game("bad", "tomorrow night", Some((1.9, 1.9)))).unwrap_err();
        match err {
            CourtsideError::MalformedRecord { game_id, .. } => assert_eq!(game_id, "bad"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_one_malformed_record_fails_batch() {
        let games = vec![
            game("g1", "2026-01-10T00:00:00Z", Some((1.5, 2.6))),
            game("g2", "not-a-date", Some((1.5, 2.6))),
            game("g3", "2026-01-10T02:00:00Z", Some((1.5, 2.6))),
        ];
        assert!(matches!(
            transform_batch(&games),
            Err(CourtsideError::MalformedRecord { ref game_id, .. }) if game_id == "g2"
        ));
    }

    #[test]
    fn test_batch_preserves_order() {
        let games = vec![
            game("g1", "2026-01-10T05:00:00Z", Some((1.5, 2.6))),
            game("g2", "2026-01-10T01:00:00Z", None),
        ];
        let records = transform_batch(&games).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2"]);
        assert!(transform_batch(&[]).unwrap().is_empty());
    }
}
