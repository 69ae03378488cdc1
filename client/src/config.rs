/// Runtime configuration read from the environment.
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the reupload backend.
    pub api_base: String,
    /// Period of the task status polling loop.
    pub poll_interval: Duration,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let api_base = std::env::var("REELAY_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let poll_ms: u64 = std::env::var("REELAY_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_MS.to_string())
            .parse()
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);

        Config {
            api_base,
            poll_interval: Duration::from_millis(poll_ms),
        }
    }
}
