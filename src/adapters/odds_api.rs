// The Odds API integration
// Fetches head-to-head decimal odds for one sport, trying mirrors in order

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use super::source::OddsSource;
use crate::config::SourceConfig;
use crate::domain::{GameRecord, H2H_MARKET};
use crate::error::{CourtsideError, Result};

const USER_AGENT: &str = "courtside/0.1";
const ERROR_BODY_LIMIT: usize = 220;

/// The Odds API client for fetching sports betting odds
pub struct OddsApiClient {
    client: Client,
    endpoints: Vec<String>,
    sport: String,
    regions: String,
    api_key: Option<String>,
}

impl OddsApiClient {
    /// Create new odds client. A missing API key is not an error here: live
    /// requests fail as unauthorized instead, so sample data can take over.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CourtsideError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoints: config.endpoints(),
            sport: config.sport.clone(),
            regions: config.regions.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    fn odds_url(&self, base: &str) -> String {
        format!("{}/sports/{}/odds", base, self.sport)
    }

    async fn fetch_from(&self, base: &str, api_key: &str) -> Result<Vec<GameRecord>> {
        let url = self.odds_url(base);
        debug!("Fetching odds from: {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("apiKey", api_key),
                ("regions", self.regions.as_str()),
                ("markets", H2H_MARKET),
                ("oddsFormat", "decimal"),
            ])
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let body = response.text().await.map_err(classify_transport)?;
        let games = parse_games(status, &body)?;

        info!("Fetched {} {} games with odds", games.len(), self.sport);
        Ok(games)
    }
}

#[async_trait]
impl OddsSource for OddsApiClient {
    fn name(&self) -> &'static str {
        "the-odds-api"
    }

    async fn fetch_games(&self) -> Result<Vec<GameRecord>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(CourtsideError::Unauthorized(
                "ODDS_API_KEY not configured".to_string(),
            ));
        };

        let mut last_err = None;
        for (idx, base) in self.endpoints.iter().enumerate() {
            match self.fetch_from(base, api_key).await {
                Ok(games) => return Ok(games),
                // Credentials are the same on every mirror.
                Err(e @ CourtsideError::Unauthorized(_)) => return Err(e),
                Err(e) => {
                    if idx + 1 < self.endpoints.len() {
                        warn!("Odds endpoint {} failed, trying next: {}", base, e);
                    }
                    last_err = Some(e);
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| CourtsideError::Internal("no odds endpoints configured".into())))
    }
}

/// Map a non-2xx response to the retry policy's error kinds.
pub fn classify_status(status: StatusCode, body: &str) -> CourtsideError {
    match status {
        StatusCode::UNAUTHORIZED => {
            CourtsideError::Unauthorized(format!("odds API rejected key: {}", snippet(body)))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            CourtsideError::RateLimited(format!("odds API quota: {}", snippet(body)))
        }
        other => CourtsideError::Upstream {
            status: other.as_u16(),
            body: snippet(body),
        },
    }
}

/// Decode a 2xx body. A body that is not a JSON array is treated as a
/// garbled upstream response (retryable); an array element that does not fit
/// `GameRecord` rejects the batch as a malformed record.
pub fn parse_games(status: StatusCode, body: &str) -> Result<Vec<GameRecord>> {
    let items: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| CourtsideError::Upstream {
            status: status.as_u16(),
            body: format!("unparseable odds payload ({}): {}", e, snippet(body)),
        })?;

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let game_id = item
                .get("id")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{idx}"));
            serde_json::from_value(item)
                .map_err(|e| CourtsideError::MalformedRecord {
                    game_id,
                    reason: e.to_string(),
                })
        })
        .collect()
}

fn classify_transport(err: reqwest::Error) -> CourtsideError {
    if err.is_decode() {
        return CourtsideError::Internal(format!("failed reading odds body: {}", err));
    }
    // Strip the URL: it carries the API key in the query string.
    CourtsideError::Transport(err.without_url().to_string())
}

fn snippet(body: &str) -> String {
    body.trim()
        .replace(['\n', '\r'], " ")
        .chars()
        .take(ERROR_BODY_LIMIT)
        .collect()
}
