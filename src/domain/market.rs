use serde::{Deserialize, Serialize};

/// Market key for head-to-head (moneyline) prices
pub const H2H_MARKET: &str = "h2h";

/// A scheduled game as returned by the odds API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    #[serde(default)]
    pub sport_key: String,
    #[serde(default)]
    pub sport_title: String,
    /// ISO-8601 start time, parsed by the transformer
    pub commence_time: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

/// One bookmaker's markets for a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmaker {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub last_update: String,
    #[serde(default)]
    pub markets: Vec<Market>,
}

/// Market odds (h2h, spreads, totals)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

/// Decimal price for a single outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    pub price: f64,
}

impl GameRecord {
    /// Head-to-head market of the first listed bookmaker.
    pub fn primary_h2h_market(&self) -> Option<&Market> {
        self.bookmakers
            .first()?
            .markets
            .iter()
            .find(|m| m.key == H2H_MARKET)
    }
}

impl Market {
    /// Price of the outcome whose name equals `team` exactly.
    pub fn price_for(&self, team: &str) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|o| o.name == team)
            .map(|o| o.price)
    }
}
