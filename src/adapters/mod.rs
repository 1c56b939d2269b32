pub mod odds_api;
pub mod source;

pub use odds_api::OddsApiClient;
pub use source::OddsSource;

#[cfg(test)]
pub use source::MockOddsSource;
