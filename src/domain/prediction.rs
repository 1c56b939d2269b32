use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a head-to-head market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// Normalized prediction for one game, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
    /// None when neither side is priced
    pub predicted_winner: Option<String>,
    /// Percentage in [50, 100]; None when neither side is priced
    #[serde(rename = "confidencePercent")]
    pub confidence: Option<u8>,
    #[serde(rename = "homeDecimalOdds")]
    pub home_odds: f64,
    #[serde(rename = "awayDecimalOdds")]
    pub away_odds: f64,
}

impl PredictionRecord {
    pub fn has_prediction(&self) -> bool {
        self.predicted_winner.is_some()
    }

    /// Confidence for display, "no data" when undefined.
    pub fn confidence_label(&self) -> String {
        match self.confidence {
            Some(pct) => format!("{pct}%"),
            None => "no data".to_string(),
        }
    }

    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_confidence_serializes_as_null() {
        let record = PredictionRecord {
            id: "g1".into(),
            home_team: "Utah Jazz".into(),
            away_team: "Orlando Magic".into(),
            start_time: DateTime::parse_from_rfc3339("2026-01-10T02:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            predicted_winner: None,
            confidence: None,
            home_odds: 0.0,
            away_odds: 0.0,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["confidencePercent"].is_null());
        assert!(json["predictedWinner"].is_null());
        assert_eq!(json["homeTeam"], "Utah Jazz");
        assert_eq!(record.confidence_label(), "no data");
        assert!(!record.has_prediction());
    }
}
