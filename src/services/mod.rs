pub mod controller;
pub mod orchestrator;
pub mod sample_data;

pub use controller::PredictionController;
pub use orchestrator::{DataOrigin, FetchOrchestrator, FetchOutcome, PredictionBatch};
pub use sample_data::sample_predictions;
