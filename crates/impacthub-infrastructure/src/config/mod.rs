mod timeouts;

use std::path::PathBuf;

use impacthub_domain::DomainError;
use url::Url;

pub use timeouts::TimeoutConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_GATEWAY_SCRIPT_URL: &str = "https://checkout.razorpay.com/v1/checkout.js";
pub const DEFAULT_GATEWAY_FIELD_PREFIX: &str = "razorpay";

pub const ENV_API_BASE_URL: &str = "IMPACTHUB_API_URL";
pub const ENV_GATEWAY_SCRIPT_URL: &str = "IMPACTHUB_GATEWAY_SCRIPT_URL";
pub const ENV_GATEWAY_FIELD_PREFIX: &str = "IMPACTHUB_GATEWAY_FIELD_PREFIX";
pub const ENV_DATA_DIR: &str = "IMPACTHUB_DATA_DIR";

/// Runtime settings for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_base_url: String,
    gateway_script_url: String,
    gateway_field_prefix: String,
    data_dir: PathBuf,
    timeouts: TimeoutConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            gateway_script_url: DEFAULT_GATEWAY_SCRIPT_URL.to_string(),
            gateway_field_prefix: DEFAULT_GATEWAY_FIELD_PREFIX.to_string(),
            data_dir: default_data_dir(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `IMPACTHUB_*` environment variables
    pub fn from_env() -> Result<Self, DomainError> {
        let mut config = Self::default();

        if let Some(url) = env_value(ENV_API_BASE_URL) {
            config = config.with_api_base_url(url)?;
        }
        if let Some(url) = env_value(ENV_GATEWAY_SCRIPT_URL) {
            config = config.with_gateway_script_url(url)?;
        }
        if let Some(prefix) = env_value(ENV_GATEWAY_FIELD_PREFIX) {
            config = config.with_gateway_field_prefix(prefix);
        }
        if let Some(dir) = env_value(ENV_DATA_DIR) {
            config = config.with_data_dir(PathBuf::from(dir));
        }

        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Result<Self, DomainError> {
        let url = url.into();
        validate_url(&url)?;
        self.api_base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_gateway_script_url(mut self, url: impl Into<String>) -> Result<Self, DomainError> {
        let url = url.into();
        validate_url(&url)?;
        self.gateway_script_url = url;
        Ok(self)
    }

    pub fn with_gateway_field_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.gateway_field_prefix = prefix.into();
        self
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = dir;
        self
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn gateway_script_url(&self) -> &str {
        &self.gateway_script_url
    }

    pub fn gateway_field_prefix(&self) -> &str {
        &self.gateway_field_prefix
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("session.db")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn timeouts(&self) -> &TimeoutConfig {
        &self.timeouts
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_url(url: &str) -> Result<(), DomainError> {
    let parsed = Url::parse(url)
        .map_err(|e| DomainError::Validation(format!("Invalid URL '{}': {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DomainError::Validation(format!(
            "Unsupported URL scheme '{}' in '{}'",
            other, url
        ))),
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("impacthub")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url(), "http://localhost:8000/api");
        assert_eq!(config.gateway_field_prefix(), "razorpay");
        assert!(config.database_path().ends_with("impacthub/session.db"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig::default()
            .with_api_base_url("https://impact.example.org/api/")
            .unwrap();
        assert_eq!(config.api_base_url(), "https://impact.example.org/api");
    }

    #[test]
    fn test_invalid_urls_rejected() {
        assert!(ClientConfig::default().with_api_base_url("not a url").is_err());
        assert!(ClientConfig::default()
            .with_gateway_script_url("ftp://example.org/checkout.js")
            .is_err());
    }
}
