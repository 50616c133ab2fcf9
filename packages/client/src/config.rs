use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_STORAGE_PATH: &str = "janggi-client.json";

pub const BASE_URL_VAR: &str = "JANGGI_API_BASE_URL";
pub const STORAGE_PATH_VAR: &str = "JANGGI_STORAGE_PATH";
pub const REQUEST_TIMEOUT_VAR: &str = "JANGGI_REQUEST_TIMEOUT_SECS";

#[derive(Debug)]
pub enum ConfigError {
    Invalid { variable: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid { variable, value } => {
                write!(f, "Invalid value for {}: {:?}", variable, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for the game client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the game server
    pub base_url: String,
    /// Where the player name, token and dark mode flag are persisted
    pub storage_path: PathBuf,
    /// Per-request timeout. `None` leaves it to the transport defaults.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Local server on the default port
    pub fn development() -> Self {
        Self::default()
    }

    /// Reads overrides from the environment; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_VAR) {
            let trimmed = base_url.trim().trim_end_matches('/');
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    variable: BASE_URL_VAR.to_string(),
                    value: base_url,
                });
            }
            config.base_url = trimmed.to_string();
        }

        if let Some(path) = lookup(STORAGE_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.storage_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(REQUEST_TIMEOUT_VAR) {
            let seconds: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                variable: REQUEST_TIMEOUT_VAR.to_string(),
                value: raw.clone(),
            })?;
            config.request_timeout = Some(Duration::from_secs(seconds));
        }

        Ok(config)
    }
}
