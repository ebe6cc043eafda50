//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration. The
//! legacy `WS_SERVER_URL`/`API_SERVER_URL` names are honored for
//! compatibility with existing backend test setups.

#![allow(dead_code)]

use std::env;

use super::AppConfig;

/// Environment variable prefix
const ENV_PREFIX: &str = "WS_HARNESS";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Endpoint from WS_HARNESS_WS_URL (or legacy WS_SERVER_URL)
    pub ws_url: Option<String>,
    /// Endpoint from WS_HARNESS_API_URL (or legacy API_SERVER_URL)
    pub api_url: Option<String>,
    /// Timeout from WS_HARNESS_TIMEOUT_MS
    pub timeout_ms: Option<u64>,
    /// Settle delay from WS_HARNESS_SETTLE_MS
    pub settle_ms: Option<u64>,
    /// Output format from WS_HARNESS_FORMAT
    pub format: Option<String>,
    /// Verbose from WS_HARNESS_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            ws_url: get_env("WS_URL").or_else(|| env::var("WS_SERVER_URL").ok()),
            api_url: get_env("API_URL").or_else(|| env::var("API_SERVER_URL").ok()),
            timeout_ms: get_env_parse("TIMEOUT_MS"),
            settle_ms: get_env_parse("SETTLE_MS"),
            format: get_env("FORMAT"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.ws_url.is_some()
            || self.api_url.is_some()
            || self.timeout_ms.is_some()
            || self.settle_ms.is_some()
            || self.format.is_some()
            || self.verbose.is_some()
    }

    /// Overlay the set variables onto a config
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(ws_url) = &self.ws_url {
            config.ws_url = ws_url.clone();
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(settle_ms) = self.settle_ms {
            config.settle_ms = settle_ms;
        }
        if let Some(format) = &self.format {
            config.format = format.clone();
        }
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get and parse environment variable
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get boolean environment variable
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_onto_config() {
        let overrides = EnvConfig {
            ws_url: Some("ws://staging:8001/ws".to_string()),
            timeout_ms: Some(2500),
            ..EnvConfig::default()
        };

        let mut config = AppConfig::default();
        overrides.apply(&mut config);

        assert_eq!(config.ws_url, "ws://staging:8001/ws");
        assert_eq!(config.timeout_ms, 2500);
        // Untouched fields keep their defaults
        assert_eq!(config.settle_ms, 100);
    }

    #[test]
    fn empty_env_has_nothing() {
        let overrides = EnvConfig::default();
        assert!(!overrides.has_any());
    }

    #[test]
    fn load_reads_prefixed_vars() {
        env::set_var("WS_HARNESS_SETTLE_MS", "250");
        env::set_var("WS_HARNESS_VERBOSE", "true");

        let overrides = EnvConfig::load();
        assert_eq!(overrides.settle_ms, Some(250));
        assert_eq!(overrides.verbose, Some(true));
        assert!(overrides.has_any());

        env::remove_var("WS_HARNESS_SETTLE_MS");
        env::remove_var("WS_HARNESS_VERBOSE");
    }
}
