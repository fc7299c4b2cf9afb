//! Client configuration

use std::time::Duration;

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No base URL was given
    #[error("missing base URL")]
    MissingBaseUrl,

    /// Base URL is not http(s)
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl ClientConfig {
    /// Start building a configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// API base URL, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let base_url = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        Ok(ClientConfig {
            base_url,
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:3000/")
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "http://localhost:3000");
        assert_eq!(config.url("/user/profil"), "http://localhost:3000/user/profil");
        assert_eq!(config.url("produit"), "http://localhost:3000/produit");
    }

    #[test]
    fn test_missing_and_invalid_url() {
        assert_eq!(
            ClientConfig::builder().build().unwrap_err(),
            ConfigError::MissingBaseUrl
        );
        assert!(matches!(
            ClientConfig::builder().base_url("localhost:3000").build(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_default_timeouts() {
        let config = ClientConfig::builder()
            .base_url("https://api.fitnessdev.fr")
            .request_timeout(Duration::from_secs(10))
            .build()
            .unwrap();
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }
}
