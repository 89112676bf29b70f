//! Backend configuration read from the environment

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::cache::DEFAULT_CACHE_TTL;

pub const BASE_URL_VAR: &str = "NEO_API_BASE_URL";
pub const ENDPOINT_VAR: &str = "NEO_API_ENDPOINT";
pub const CACHE_TTL_VAR: &str = "NEO_CACHE_TTL";
pub const REQUEST_TIMEOUT_VAR: &str = "NEO_REQUEST_TIMEOUT";
pub const PROBE_INTERVAL_VAR: &str = "NEO_PROBE_INTERVAL";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_ENDPOINT: &str = "neos";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(10);

/// Configuration errors, reported once at startup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid URL ({value}): {reason}")]
    InvalidUrl { var: &'static str, value: String, reason: String },

    #[error("{var} is not a valid duration ({value}): {reason}")]
    InvalidDuration { var: &'static str, value: String, reason: String },
}

/// Where and how to reach the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://neo.example.org/api`
    pub base_url: String,

    /// Endpoint path appended to the base URL
    pub endpoint: String,

    /// Idle time after which unused cache entries are dropped
    pub cache_ttl: Duration,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// How often an unreachable backend is probed
    pub probe_interval: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_interval: DEFAULT_PROBE_INTERVAL,
        }
    }
}

impl ApiConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let config = Self {
            base_url: value(BASE_URL_VAR).unwrap_or(defaults.base_url),
            endpoint: value(ENDPOINT_VAR).unwrap_or(defaults.endpoint),
            cache_ttl: parse_duration(CACHE_TTL_VAR, value(CACHE_TTL_VAR), defaults.cache_ttl)?,
            request_timeout: parse_duration(
                REQUEST_TIMEOUT_VAR,
                value(REQUEST_TIMEOUT_VAR),
                defaults.request_timeout,
            )?,
            probe_interval: parse_duration(
                PROBE_INTERVAL_VAR,
                value(PROBE_INTERVAL_VAR),
                defaults.probe_interval,
            )?,
        };

        config.endpoint_url()?;
        Ok(config)
    }

    /// Full endpoint URL, joining base and path with a single slash
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let base = self.base_url.trim().trim_end_matches('/');
        let path = self.endpoint.trim().trim_start_matches('/');
        let joined = if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        };

        let url = Url::parse(&joined).map_err(|e| ConfigError::InvalidUrl {
            var: BASE_URL_VAR,
            value: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl {
                var: BASE_URL_VAR,
                value: self.base_url.clone(),
                reason: "expected an http(s) URL with a host".to_string(),
            });
        }
        Ok(url)
    }

    /// `host:port` of the backend, used for connectivity probes
    pub fn probe_address(&self) -> Result<String, ConfigError> {
        let url = self.endpoint_url()?;
        let host = url.host_str().unwrap_or_default();
        let port = url.port_or_known_default().unwrap_or(80);
        Ok(format!("{}:{}", host, port))
    }
}

fn parse_duration(
    var: &'static str,
    raw: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match raw {
        None => Ok(default),
        Some(raw) => humantime::parse_duration(raw.trim()).map_err(|e| ConfigError::InvalidDuration {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
