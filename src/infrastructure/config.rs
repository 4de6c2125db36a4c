use crate::domain::error::{SuiteError, SuiteResult};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://reqres.in/";
pub const DEFAULT_MAX_LATENCY: Duration = Duration::from_millis(2000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const BASE_URL_VAR: &str = "REQRES_BASE_URL";
pub const API_KEY_VAR: &str = "REQRES_API_KEY";
pub const MAX_LATENCY_VAR: &str = "REQRES_MAX_LATENCY_MS";

/// Settings shared by every scenario of a run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub base_url: Url,
    pub api_key: Option<String>,
    pub max_latency: Duration,
    pub request_timeout: Duration,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            api_key: None,
            max_latency: DEFAULT_MAX_LATENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SuiteConfig {
    pub fn with_base_url(base_url: &str) -> SuiteResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Reads overrides from the process environment (and `.env`, if present).
    pub fn from_env() -> SuiteResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> SuiteResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.base_url = parse_base_url(&base_url)?;
        }

        config.api_key = lookup(API_KEY_VAR).filter(|key| !key.trim().is_empty());

        if let Some(raw) = lookup(MAX_LATENCY_VAR) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                SuiteError::Config(format!("{} must be a number of milliseconds, got '{}'", MAX_LATENCY_VAR, raw))
            })?;
            config.max_latency = Duration::from_millis(millis);
        }

        debug!(
            has_api_key = config.api_key.is_some(),
            "Resolved suite configuration overrides"
        );
        info!(
            base_url = %config.base_url,
            max_latency_ms = config.max_latency.as_millis(),
            "Suite configuration loaded"
        );
        Ok(config)
    }
}

/// Parses a base URL, forcing a trailing slash so relative paths join under it.
pub fn parse_base_url(raw: &str) -> SuiteResult<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|e| SuiteError::Config(format!("invalid base URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(SuiteError::Config(format!("'{}' cannot be used as a base URL", raw)));
    }
    Ok(url)
}
