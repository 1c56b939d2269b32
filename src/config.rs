use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ODDS_API_BASE: &str = "https://api.the-odds-api.com/v4";
const MIN_API_KEY_LEN: usize = 10;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Odds API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Mirror base URLs tried in order when the primary fails
    #[serde(default)]
    pub mirrors: Vec<String>,
    /// Sport key (e.g., "basketball_nba")
    #[serde(default = "default_sport")]
    pub sport: String,
    /// Bookmaker region filter
    #[serde(default = "default_regions")]
    pub regions: String,
    /// API key; falls back to ODDS_API_KEY / THE_ODDS_API_KEY
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_ODDS_API_BASE.to_string()
}

fn default_sport() -> String {
    "basketball_nba".to_string()
}

fn default_regions() -> String {
    "us".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mirrors: Vec::new(),
            sport: default_sport(),
            regions: default_regions(),
            api_key: None,
        }
    }
}

impl SourceConfig {
    /// Primary endpoint followed by mirrors.
    pub fn endpoints(&self) -> Vec<String> {
        std::iter::once(&self.base_url)
            .chain(self.mirrors.iter())
            .map(|u| u.trim_end_matches('/').to_string())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-attempt timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Serve sample data when a cycle fails
    #[serde(default = "default_true")]
    pub auto_fallback: bool,
}

fn default_request_timeout_ms() -> u64 {
    20_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    2_000
}

fn default_true() -> bool {
    true
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            auto_fallback: true,
        }
    }
}

impl FetchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Automatic refresh interval in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Delay before reloading after switching back to live data
    #[serde(default = "default_toggle_debounce_ms")]
    pub toggle_debounce_ms: u64,
    /// Start with sample data instead of live odds
    #[serde(default)]
    pub start_in_sample_mode: bool,
}

fn default_poll_interval_secs() -> u64 {
    15 * 60
}

fn default_toggle_debounce_ms() -> u64 {
    100
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            toggle_debounce_ms: default_toggle_debounce_ms(),
            start_in_sample_mode: false,
        }
    }
}

impl ControllerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn toggle_debounce(&self) -> Duration {
        Duration::from_millis(self.toggle_debounce_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("fetch.auto_fallback", true)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("COURTSIDE_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (COURTSIDE__FETCH__MAX_RETRIES, etc.)
            .add_source(
                Environment::with_prefix("COURTSIDE")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: AppConfig = builder.build()?.try_deserialize()?;
        if cfg.source.api_key.is_none() {
            cfg.source.api_key = api_key_from_env();
        }
        Ok(cfg)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for endpoint in self.source.endpoints() {
            if let Err(e) = url::Url::parse(&endpoint) {
                errors.push(format!("invalid odds endpoint {endpoint:?}: {e}"));
            }
        }

        if self.source.sport.trim().is_empty() {
            errors.push("source.sport must not be empty".to_string());
        }

        if let Some(key) = &self.source.api_key {
            if key.len() < MIN_API_KEY_LEN {
                errors.push(format!(
                    "source.api_key looks invalid (expected at least {MIN_API_KEY_LEN} characters)"
                ));
            }
        }

        if self.fetch.request_timeout_ms == 0 {
            errors.push("fetch.request_timeout_ms must be positive".to_string());
        }

        if self.controller.poll_interval_secs == 0 {
            errors.push("controller.poll_interval_secs must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Effective configuration as TOML with the API key masked
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        let mut shown = self.clone();
        if let Some(key) = shown.source.api_key.as_mut() {
            *key = redact(key);
        }
        toml::to_string_pretty(&shown)
    }
}

fn api_key_from_env() -> Option<String> {
    ["ODDS_API_KEY", "THE_ODDS_API_KEY"]
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(3).collect();
    format!("{prefix}…")
}
