//! Fetch Orchestrator
//!
//! Runs one fetch cycle: pull games from the odds source with a per-attempt
//! timeout, retry transient failures with a fixed delay, transform the batch,
//! and fall back to the embedded sample set when configured to.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::sample_data::sample_predictions;
use crate::adapters::OddsSource;
use crate::config::FetchConfig;
use crate::domain::{GameRecord, PredictionRecord};
use crate::engine::transform_batch;
use crate::error::{CourtsideError, Result};

/// Where a batch of predictions came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Live odds from the upstream source
    Live,
    /// Sample data substituted after a failed cycle
    Fallback,
    /// Sample data requested by the user
    Forced,
}

impl DataOrigin {
    pub fn is_sample(&self) -> bool {
        !matches!(self, DataOrigin::Live)
    }
}

impl std::fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataOrigin::Live => write!(f, "live"),
            DataOrigin::Fallback => write!(f, "fallback"),
            DataOrigin::Forced => write!(f, "sample"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredictionBatch {
    pub predictions: Vec<PredictionRecord>,
    pub origin: DataOrigin,
}

/// Result of one fetch cycle
#[derive(Debug)]
pub enum FetchOutcome {
    Success(PredictionBatch),
    Failure(CourtsideError),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }
}

pub struct FetchOrchestrator {
    source: Arc<dyn OddsSource>,
    config: FetchConfig,
}

impl FetchOrchestrator {
    pub fn new(source: Arc<dyn OddsSource>, config: FetchConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Run one cycle. `on_retry` is called with the 1-based retry number
    /// before each retry delay.
    pub async fn run_cycle<F>(&self, force_sample: bool, on_retry: F) -> FetchOutcome
    where
        F: Fn(u32) + Send + Sync,
    {
        if force_sample {
            debug!("Sample mode forced, skipping {}", self.source.name());
            return FetchOutcome::Success(PredictionBatch {
                predictions: sample_predictions(Utc::now()),
                origin: DataOrigin::Forced,
            });
        }

        info!(
            source = self.source.name(),
            max_retries = self.config.max_retries,
            "Starting fetch cycle"
        );

        match self.fetch_with_retry(&on_retry).await {
            Ok(predictions) => {
                info!(count = predictions.len(), "Fetch cycle succeeded");
                FetchOutcome::Success(PredictionBatch {
                    predictions,
                    origin: DataOrigin::Live,
                })
            }
            Err(e) if self.config.auto_fallback => {
                warn!(error = %e, "Fetch cycle failed, serving sample data");
                FetchOutcome::Success(PredictionBatch {
                    predictions: sample_predictions(Utc::now()),
                    origin: DataOrigin::Fallback,
                })
            }
            Err(e) => {
                error!(error = %e, "Fetch cycle failed");
                FetchOutcome::Failure(e)
            }
        }
    }

    async fn fetch_with_retry<F>(&self, on_retry: &F) -> Result<Vec<PredictionRecord>>
    where
        F: Fn(u32) + Send + Sync,
    {
        let attempts = self.config.max_retries.saturating_add(1);
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!(attempt, attempts, "Fetching odds");

            let err = match self.attempt().await {
                Ok(games) => return transform_batch(&games),
                Err(e) => e,
            };

            if !err.is_retryable() {
                warn!(attempt, error = %err, "Non-retryable fetch failure");
                return Err(err);
            }

            if attempt >= attempts {
                return Err(CourtsideError::Exhausted {
                    attempts,
                    last: Box::new(err),
                });
            }

            let retry = attempt;
            warn!(
                retry,
                delay_ms = self.config.retry_delay_ms,
                error = %err,
                "Fetch attempt failed, retrying"
            );
            on_retry(retry);
            tokio::time::sleep(self.config.retry_delay()).await;
        }
    }

    async fn attempt(&self) -> Result<Vec<GameRecord>> {
        let timeout = self.config.request_timeout();
        match tokio::time::timeout(timeout, self.source.fetch_games()).await {
            Ok(result) => result,
            Err(_) => Err(CourtsideError::Timeout {
                after_ms: self.config.request_timeout_ms,
            }),
        }
    }
}
