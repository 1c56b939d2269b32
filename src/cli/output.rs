//! Output formatting for `courtside predict` and `courtside sample`.
//!
//! Supports two modes: human-readable tables (default) and JSON (--json).

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::domain::PredictionRecord;
use crate::error::CourtsideError;
use crate::engine::{format_american_odds, ConfidenceTier};

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

/// One table line per game
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PredictionRow {
    #[tabled(rename = "Start (UTC)")]
    pub start: String,
    #[tabled(rename = "Matchup")]
    pub matchup: String,
    #[tabled(rename = "Pick")]
    pub pick: String,
    #[tabled(rename = "Confidence")]
    pub confidence: String,
    #[tabled(rename = "Tier")]
    pub tier: String,
    #[tabled(rename = "Home")]
    pub home_odds: String,
    #[tabled(rename = "Away")]
    pub away_odds: String,
}

impl From<&PredictionRecord> for PredictionRow {
    fn from(record: &PredictionRecord) -> Self {
        Self {
            start: record.start_time.format("%a %d %b %H:%M").to_string(),
            matchup: record.matchup(),
            pick: record
                .predicted_winner
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            confidence: record.confidence_label(),
            tier: ConfidenceTier::from_confidence(record.confidence).to_string(),
            home_odds: odds_cell(record.home_odds),
            away_odds: odds_cell(record.away_odds),
        }
    }
}

fn odds_cell(decimal: f64) -> String {
    if decimal > 1.0 {
        format!("{:.2} ({})", decimal, format_american_odds(decimal))
    } else {
        "-".to_string()
    }
}

/// Print a vec of Tabled + Serialize items in the chosen mode.
pub fn print_items<T: Tabled + Serialize>(items: &[T], mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            if items.is_empty() {
                println!("(no results)");
            } else {
                let table = Table::new(items).to_string();
                println!("{table}");
            }
        }
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(items)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Print predictions as a table, or the raw records as JSON.
pub fn print_predictions(records: &[PredictionRecord], mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table if records.is_empty() => {
            println!("No upcoming games found");
            Ok(())
        }
        OutputMode::Table => {
            let rows: Vec<PredictionRow> = records.iter().map(PredictionRow::from).collect();
            print_items(&rows, mode)
        }
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
            Ok(())
        }
    }
}

/// Print a warning message.
pub fn print_warn(msg: &str) {
    println!("\x1b[33m{msg}\x1b[0m");
}

/// Error returned from a failed command: the user-facing message on top,
/// the underlying kind as its cause. Printed once, by `main`.
pub fn failure_report(err: CourtsideError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(confidence: Option<u8>, home_odds: f64, away_odds: f64) -> PredictionRecord {
        PredictionRecord {
            id: "g1".into(),
            home_team: "Memphis Grizzlies".into(),
            away_team: "Indiana Pacers".into(),
            start_time: Utc.with_ymd_and_hms(2026, 1, 10, 1, 0, 0).unwrap(),
            predicted_winner: confidence.map(|_| "Memphis Grizzlies".to_string()),
            confidence,
            home_odds,
            away_odds,
        }
    }

    #[test]
    fn test_row_formats_priced_game() {
        let row = PredictionRow::from(&record(Some(72), 1.40, 3.00));
        assert_eq!(row.matchup, "Indiana Pacers @ Memphis Grizzlies");
        assert_eq!(row.pick, "Memphis Grizzlies");
        assert_eq!(row.confidence, "72%");
        assert_eq!(row.tier, ConfidenceTier::High.to_string());
        assert_eq!(row.home_odds, "1.40 (-250)");
        assert_eq!(row.away_odds, "3.00 (+200)");
        assert_eq!(row.start, "Sat 10 Jan 01:00");
    }

    #[test]
    fn test_row_formats_unpriced_game() {
        let row = PredictionRow::from(&record(None, 0.0, 0.0));
        assert_eq!(row.pick, "-");
        assert_eq!(row.confidence, "no data");
        assert_eq!(row.home_odds, "-");
    }

    #[test]
    fn test_failure_report_carries_message_and_cause() {
        let report = failure_report(CourtsideError::Unauthorized("401".into()));

        assert_eq!(
            report.to_string(),
            "API key unauthorized. Please check your API key."
        );
        let causes: Vec<String> = report.chain().map(|c| c.to_string()).collect();
        assert_eq!(causes.len(), 2);
        assert_eq!(causes[1], "Unauthorized: 401");
    }

    #[test]
    fn test_output_mode_from_flag() {
        assert_eq!(OutputMode::from_json_flag(true), OutputMode::Json);
        assert_eq!(OutputMode::from_json_flag(false), OutputMode::Table);
    }
}
