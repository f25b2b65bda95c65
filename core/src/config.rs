//! Run-wide settings for the REST API steps.
//!
//! Loaded once per test run from TOML, then optionally overridden by
//! environment variables so CI can point the same suite at another host.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const ENV_BASE_URL: &str = "RESTAPI_BASE_URL";
pub const ENV_CONTENT_INSPECTION: &str = "RESTAPI_CONTENT_INSPECTION";
pub const ENV_TIMEOUT_MS: &str = "RESTAPI_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RestApiConfig {
    pub base_url: String,
    /// Forward every response body to the attached content inspector.
    #[serde(default = "default_true")]
    pub enable_content_inspection: bool,
    /// Global request timeout enforced by the transport. `None` waits forever.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl RestApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            enable_content_inspection: true,
            timeout_ms: None,
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Apply `RESTAPI_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_CONTENT_INSPECTION) {
            self.enable_content_inspection = match raw.trim() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: ENV_CONTENT_INSPECTION,
                        value: raw,
                    })
                }
            };
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let ms = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_TIMEOUT_MS,
                value: raw.clone(),
            })?;
            self.timeout_ms = Some(ms);
        }
        Ok(self)
    }
}
