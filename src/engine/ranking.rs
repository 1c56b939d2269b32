use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::domain::PredictionRecord;

/// Display bucket for a confidence percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    NoData,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: Option<u8>) -> Self {
        match confidence {
            Some(pct) if pct >= 70 => ConfidenceTier::High,
            Some(pct) if pct >= 55 => ConfidenceTier::Medium,
            Some(_) => ConfidenceTier::Low,
            None => ConfidenceTier::NoData,
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceTier::High => write!(f, "high"),
            ConfidenceTier::Medium => write!(f, "medium"),
            ConfidenceTier::Low => write!(f, "low"),
            ConfidenceTier::NoData => write!(f, "no data"),
        }
    }
}

/// Order predictions for display: most confident first, then earliest start.
/// Games without a prediction rank as 0% confidence.
pub fn rank_predictions(predictions: &[PredictionRecord]) -> Vec<PredictionRecord> {
    let mut ranked = predictions.to_vec();
    ranked.sort_by(compare_for_display);
    ranked
}

fn compare_for_display(a: &PredictionRecord, b: &PredictionRecord) -> Ordering {
    let a_conf = a.confidence.unwrap_or(0);
    let b_conf = b.confidence.unwrap_or(0);
    b_conf
        .cmp(&a_conf)
        .then_with(|| a.start_time.cmp(&b.start_time))
}

/// Render a decimal price in American (moneyline) notation.
pub fn format_american_odds(decimal: f64) -> String {
    if !decimal.is_finite() || decimal <= 1.0 {
        return "-".to_string();
    }
    if decimal >= 2.0 {
        format!("+{}", ((decimal - 1.0) * 100.0).round() as i64)
    } else {
        format!("{}", (-100.0 / (decimal - 1.0)).round() as i64)
    }
}
