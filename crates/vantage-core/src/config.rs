use std::env;

use tracing::warn;

use crate::ValidationError;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_API_KEY: &str = "demo";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const API_KEY_ENV: &str = "VANTAGE_API_KEY";
pub const BASE_URL_ENV: &str = "VANTAGE_BASE_URL";
pub const TIMEOUT_ENV: &str = "VANTAGE_TIMEOUT_MS";

/// Connection settings for [`crate::AlphaVantageClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            api_key: String::from(DEFAULT_API_KEY),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `VANTAGE_API_KEY`, `VANTAGE_BASE_URL`, and
    /// `VANTAGE_TIMEOUT_MS`. Unparseable timeouts fall back to the default
    /// with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var(BASE_URL_ENV).unwrap_or(defaults.base_url),
            api_key: env::var(API_KEY_ENV).unwrap_or(defaults.api_key),
            timeout_ms: timeout_from(env::var(TIMEOUT_ENV).ok().as_deref()),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::EmptyApiKey);
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        }
        Ok(())
    }
}

fn timeout_from(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return DEFAULT_TIMEOUT_MS;
    };
    match raw.trim().parse() {
        Ok(timeout_ms) => timeout_ms,
        Err(_) => {
            warn!(
                variable = TIMEOUT_ENV,
                value = raw,
                default = DEFAULT_TIMEOUT_MS,
                "ignoring unparseable timeout"
            );
            DEFAULT_TIMEOUT_MS
        }
    }
}

// The api key stays out of debug output and therefore out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}
