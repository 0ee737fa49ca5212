//! Configuration structures for Cribl API clients.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Connection settings for a single Cribl API client.
///
/// A configuration is immutable once a client has been built from it. Switching
/// authentication mode means building a new client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CriblClientConfig {
    /// Base URL of the API (e.g. `https://main-acme.cribl.cloud/api/v1`)
    #[validate(url)]
    pub server_url: String,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl CriblClientConfig {
    /// Create a new client configuration for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(server_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            server_url: server_url.into(),
            tls_verify: default_tls_verify(),
            request_timeout_secs: default_request_timeout_secs(),
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse the server URL into a base suitable for [`Url::join`].
    ///
    /// The returned URL always ends with `/` so relative paths are appended
    /// rather than replacing the last segment (`/api/v1` + `groups` must yield
    /// `/api/v1/groups`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_server_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.server_url)
            .map_err(|e| Error::ConfigError(format!("Invalid server URL: {e}")))?;

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}

/// Whether `url` uses the `https` scheme (case-insensitive).
#[must_use]
pub fn is_https_url(url: &str) -> bool {
    url.get(..8)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"))
}
