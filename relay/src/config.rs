//! Configuration module for environment variable parsing.
//!
//! Reads all configuration from environment variables. A `.env` file is
//! loaded best-effort at startup; already-set variables always win.

use std::env;
use std::str::FromStr;
use tracing::warn;

/// Default LINE Notify endpoint. Overridable via `NOTIFY_API_URL`.
pub const DEFAULT_NOTIFY_API_URL: &str = "https://notify-api.line.me/api/notify";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// LINE Notify bearer token. Secret: never logged, only its presence.
    pub access_token: Option<String>,

    /// Outbound notification endpoint URL
    pub notify_api_url: String,

    /// HTTP request timeout in milliseconds for the outbound call
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: parse_env("PORT", 8080),

            access_token: env::var("LINE_NOTIFY_ACCESS_TOKEN")
                .ok()
                .filter(|v| !v.is_empty()),

            notify_api_url: env::var("NOTIFY_API_URL")
                .unwrap_or_else(|_| DEFAULT_NOTIFY_API_URL.to_string()),

            request_timeout_ms: parse_env("REQUEST_TIMEOUT_MS", 8000),
        }
    }
}

/// Parse a numeric environment variable, warning when a set value is invalid.
fn parse_env<T: FromStr + Copy>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_valid() {
        env::set_var("TEST_TIMEOUT", "2500");
        let result: u64 = parse_env("TEST_TIMEOUT", 8000);
        assert_eq!(result, 2500);
        env::remove_var("TEST_TIMEOUT");
    }

    #[test]
    fn test_parse_env_invalid_falls_back() {
        env::set_var("TEST_PORT", "not-a-number");
        let result: u16 = parse_env("TEST_PORT", 8080);
        assert_eq!(result, 8080);
        env::remove_var("TEST_PORT");
    }

    #[test]
    fn test_parse_env_default() {
        let result: u64 = parse_env("NONEXISTENT_VAR", 8000);
        assert_eq!(result, 8000);
    }

    #[test]
    fn test_empty_token_treated_as_missing() {
        env::set_var("LINE_NOTIFY_ACCESS_TOKEN", "");
        let config = Config::from_env();
        assert!(config.access_token.is_none());
        env::remove_var("LINE_NOTIFY_ACCESS_TOKEN");
    }
}
