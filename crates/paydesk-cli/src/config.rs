//! Dashboard configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Platform API used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";

/// Longest accepted poll interval, matching the poller's clamp.
pub const MAX_POLL_INTERVAL_SECS: u64 = paydesk_events::MAX_POLL_INTERVAL.as_secs();

/// Longest accepted HTTP timeout.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Locations searched for the secrets file, in order.
const SECRET_PATHS: [&str; 2] = [".secrets/paydesk.json", "../.secrets/paydesk.json"];

/// Dashboard configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Platform API base URL (default: `http://localhost:4000/api`).
    pub api_url: String,

    /// Merchant bearer token.
    pub token: Option<String>,

    /// Directory holding the shared payment event record and catalog caches
    /// (default: ".paydesk").
    pub data_dir: PathBuf,

    /// Seconds between polls of the payment event record (default: 2).
    pub poll_interval_secs: u64,

    /// HTTP request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

/// Secrets file structure.
#[derive(Debug, Default, Deserialize)]
struct PaydeskSecrets {
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl CliConfig {
    /// Load configuration from the secrets file and environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let secrets = SECRET_PATHS
            .iter()
            .find_map(|path| match load_secrets_file(Path::new(path)) {
                Ok(secrets) => {
                    tracing::info!(path = %path, "Loaded paydesk secrets from file");
                    Some(secrets)
                }
                Err(_) => None,
            })
            .unwrap_or_default();

        Self::from_sources(secrets, |name| std::env::var(name).ok())
    }

    /// Build from an explicit secrets file and variable lookup.
    fn from_sources(secrets: PaydeskSecrets, var: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Self {
            api_url: non_blank(secrets.api_url)
                .or_else(|| non_blank(var("PAYDESK_API_URL")))
                .unwrap_or_else(|| DEFAULT_API_URL.into()),
            token: non_blank(secrets.token).or_else(|| non_blank(var("PAYDESK_TOKEN"))),
            data_dir: var("PAYDESK_DATA_DIR")
                .map_or_else(|| PathBuf::from(".paydesk"), PathBuf::from),
            poll_interval_secs: var("PAYDESK_POLL_INTERVAL_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|secs| (1..=MAX_POLL_INTERVAL_SECS).contains(secs))
                .unwrap_or(2),
            timeout_secs: var("PAYDESK_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|secs| (1..=MAX_TIMEOUT_SECS).contains(secs))
                .unwrap_or(30),
        }
    }

    /// Poll interval as a duration.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            token: None,
            data_dir: PathBuf::from(".paydesk"),
            poll_interval_secs: 2,
            timeout_secs: 30,
        }
    }
}

/// Load secrets from a JSON file.
fn load_secrets_file(path: &Path) -> Result<PaydeskSecrets, std::io::Error> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
