pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod services;

pub use adapters::{OddsApiClient, OddsSource};
pub use config::AppConfig;
pub use domain::{Phase, PredictionRecord, PredictionView, SessionState};
pub use error::{CourtsideError, Result};
pub use services::{FetchOrchestrator, FetchOutcome, PredictionController};
