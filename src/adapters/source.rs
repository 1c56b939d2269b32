use async_trait::async_trait;

use crate::domain::GameRecord;
use crate::error::Result;

/// Anything that can produce the upstream list of scheduled games.
///
/// Implementations classify failures into the `CourtsideError` kinds the
/// orchestrator's retry policy understands (Unauthorized, RateLimited,
/// Transport, Upstream). Timeouts are enforced by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Short name used in log events
    fn name(&self) -> &'static str;

    async fn fetch_games(&self) -> Result<Vec<GameRecord>>;
}
