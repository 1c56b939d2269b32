use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::prediction::PredictionRecord;

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// A fetch cycle is in flight
    Loading,
    /// Predictions are available
    Ready,
    /// The last cycle failed and no fallback was applied
    Error,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Loading => "LOADING",
            Phase::Ready => "READY",
            Phase::Error => "ERROR",
        }
    }

    /// Check if this phase can transition to another phase
    pub fn can_transition_to(&self, target: Phase) -> bool {
        use Phase::*;

        match (self, target) {
            // Cycle completion
            (Loading, Ready) => true,
            (Loading, Error) => true,

            // Manual retry, mode toggle or poll tick
            (Ready, Loading) => true,
            (Error, Loading) => true,

            // A newer cycle superseding one still in flight
            (Loading, Loading) => true,

            _ => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session state owned by the prediction controller
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub predictions: Vec<PredictionRecord>,
    pub phase: Phase,
    pub error: Option<String>,
    /// Predictions currently shown come from the sample dataset
    pub using_fallback: bool,
    /// User asked for sample data instead of live odds
    pub forced_fallback: bool,
    /// Retries made by the current cycle
    pub retry_attempt: u32,
    pub last_updated: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn new(forced_fallback: bool) -> Self {
        Self {
            predictions: Vec::new(),
            phase: Phase::Loading,
            error: None,
            using_fallback: false,
            forced_fallback,
            retry_attempt: 0,
            last_updated: None,
        }
    }

    pub fn is_live_mode(&self) -> bool {
        !self.forced_fallback
    }

    /// Consumer-facing projection of the session
    pub fn view(&self) -> PredictionView {
        PredictionView {
            predictions: self.predictions.clone(),
            phase: self.phase,
            using_fallback: self.using_fallback,
            is_live_mode: self.is_live_mode(),
            error: self.error.clone(),
            retry_attempt: self.retry_attempt,
        }
    }
}

/// Read surface handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionView {
    pub predictions: Vec<PredictionRecord>,
    pub phase: Phase,
    pub using_fallback: bool,
    pub is_live_mode: bool,
    pub error: Option<String>,
    pub retry_attempt: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(Phase::Loading.can_transition_to(Phase::Ready));
        assert!(Phase::Loading.can_transition_to(Phase::Error));
        assert!(Phase::Ready.can_transition_to(Phase::Loading));
        assert!(Phase::Error.can_transition_to(Phase::Loading));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!Phase::Ready.can_transition_to(Phase::Error));
        assert!(!Phase::Error.can_transition_to(Phase::Ready));
        assert!(!Phase::Ready.can_transition_to(Phase::Ready));
    }

    #[test]
    fn test_new_session_starts_loading() {
        let state = SessionState::new(true);
        assert_eq!(state.phase, Phase::Loading);
        assert!(!state.is_live_mode());
        assert!(state.view().predictions.is_empty());
    }
}
