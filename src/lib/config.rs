//! Client configuration for the backend base URL, request timeout and the
//! directory holding persisted session state. Values come from defaults, then
//! overrides collected by the CLI from flags or `AUTHFLOW_*` variables.
//! Configuration values are public; do not store secrets here.

use super::errors::AppError;
use std::{env, path::PathBuf, time::Duration};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://smartloansbackend.azurewebsites.net";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

pub const ENV_API_URL: &str = "AUTHFLOW_API_URL";
pub const ENV_TIMEOUT: &str = "AUTHFLOW_TIMEOUT";
pub const ENV_STATE_DIR: &str = "AUTHFLOW_STATE_DIR";

/// Runtime configuration shared by the HTTP client and the session store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub state_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            state_dir: default_state_dir(),
        }
    }
}

/// Optional values layered on top of the defaults.
/// The `ENV_*` names above are the variables the CLI reads them from.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub state_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Builds a config from the defaults and the given overrides.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] when the resulting values are invalid.
    pub fn with_overrides(overrides: ConfigOverrides) -> Result<Self, AppError> {
        let mut config = Self::default();
        apply_overrides(&mut config, overrides);
        config.validate()?;
        Ok(config)
    }

    /// Checks that the base URL is an absolute http(s) URL and the timeout is non-zero.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), AppError> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported API URL scheme: {}",
                url.scheme()
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(AppError::Config(
                "Request timeout must be greater than zero.".to_string(),
            ));
        }
        Ok(())
    }

    /// Location of the persisted session document.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }
}

fn apply_overrides(config: &mut AppConfig, overrides: ConfigOverrides) {
    if let Some(value) = overrides.api_base_url.and_then(|v| normalize_value(&v)) {
        config.api_base_url = value;
    }
    if let Some(seconds) = overrides.timeout_seconds {
        config.request_timeout = Duration::from_secs(seconds);
    }
    if let Some(dir) = overrides.state_dir {
        config.state_dir = dir;
    }
}

fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join(env!("CARGO_PKG_NAME"))
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
