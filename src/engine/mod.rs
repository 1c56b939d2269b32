//! Prediction engine
//!
//! Pure functions only: no I/O, no clocks, no shared state. Safe to call from
//! any task without synchronization.

pub mod normalizer;
pub mod ranking;
pub mod transformer;

pub use normalizer::{
    implied_probability, is_priced, normalize, overround, MarketQuote, NormalizedProbabilities,
    Prediction,
};
pub use ranking::{format_american_odds, rank_predictions, ConfidenceTier};
pub use transformer::{transform_batch, transform_game};
