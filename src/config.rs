use crate::retry::RetryConfig;
use anyhow::{Context, Result};
use std::time::Duration;

/// Public host serving all three endpoints
pub const DEFAULT_BASE_URL: &str = "https://translate.google.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme and host the endpoint paths are appended to
    pub base_url: String,

    /// Timeout for the text and info endpoints
    pub request_timeout: Duration,

    /// Timeout for speech synthesis, which is slower upstream
    pub audio_timeout: Duration,

    /// Spacing between attempts
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            audio_timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Create a config pointing at a different host (mock servers, proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let request_timeout = match std::env::var("TRANSLATE_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(
                v.parse()
                    .context("TRANSLATE_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            Err(_) => defaults.request_timeout,
        };

        let audio_timeout = match std::env::var("TRANSLATE_AUDIO_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(
                v.parse()
                    .context("TRANSLATE_AUDIO_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            Err(_) => defaults.audio_timeout,
        };

        let retry = match std::env::var("TRANSLATE_RETRY_DELAY_MS") {
            Ok(v) => RetryConfig::new(Duration::from_millis(
                v.parse()
                    .context("TRANSLATE_RETRY_DELAY_MS must be a whole number of milliseconds")?,
            )),
            Err(_) => defaults.retry,
        };

        Ok(Self {
            base_url: std::env::var("TRANSLATE_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            request_timeout,
            audio_timeout,
            retry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: [&str; 4] = [
        "TRANSLATE_BASE_URL",
        "TRANSLATE_TIMEOUT_SECS",
        "TRANSLATE_AUDIO_TIMEOUT_SECS",
        "TRANSLATE_RETRY_DELAY_MS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_points_at_public_host() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://translate.google.com");
        assert!(config.audio_timeout > config.request_timeout);
    }

    #[test]
    fn test_with_base_url_keeps_other_defaults() {
        let config = Config::with_base_url("http://127.0.0.1:9999");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.audio_timeout, Duration::from_secs(30));
    }

    // ==================== from_env Tests ====================

    #[test]
    #[serial]
    fn test_from_env_without_vars_uses_defaults() {
        clear_env();

        let config = Config::from_env().expect("Should load defaults");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.audio_timeout, Duration::from_secs(30));
        assert_eq!(config.retry, RetryConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_all_vars() {
        clear_env();
        std::env::set_var("TRANSLATE_BASE_URL", "http://localhost:8080/");
        std::env::set_var("TRANSLATE_TIMEOUT_SECS", "3");
        std::env::set_var("TRANSLATE_AUDIO_TIMEOUT_SECS", "45");
        std::env::set_var("TRANSLATE_RETRY_DELAY_MS", "100");

        let config = Config::from_env().expect("Should load from env");
        clear_env();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.audio_timeout, Duration::from_secs(45));
        assert_eq!(config.retry.initial_delay, Duration::from_millis(100));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_timeout() {
        clear_env();
        std::env::set_var("TRANSLATE_TIMEOUT_SECS", "ten");

        let err = Config::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("TRANSLATE_TIMEOUT_SECS"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_retry_delay() {
        clear_env();
        std::env::set_var("TRANSLATE_RETRY_DELAY_MS", "-5");

        let err = Config::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("TRANSLATE_RETRY_DELAY_MS"));
    }
}
