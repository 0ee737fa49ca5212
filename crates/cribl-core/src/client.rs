//! Shared HTTP client used by every Cribl API crate.
//!
//! [`ServiceClient`] owns a `reqwest::Client`, a base URL and an optional
//! [`Security`] scheme. It never retries and never follows pagination: each
//! call is exactly one request.

use crate::config::CriblClientConfig;
use crate::security::{Security, TokenCache};
use crate::types::CriblApi;
use crate::{Error, Result};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use validator::Validate;

/// Default timeout for control-plane requests (seconds)
pub const CONTROL_PLANE_DEFAULT_TIMEOUT: u64 = 30;

/// Default timeout for management-plane requests (seconds)
pub const MGMT_PLANE_DEFAULT_TIMEOUT: u64 = 30;

/// Default TCP/TLS connect timeout (seconds)
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Default idle timeout for connection pools (seconds)
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Round a timeout up to whole seconds so sub-second values never become zero.
fn whole_seconds(timeout: Duration) -> u64 {
    timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0)
}

/// Builder for [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct ServiceClientBuilder {
    api: CriblApi,
    config: CriblClientConfig,
    security: Option<Security>,
    user_agent: String,
}

impl ServiceClientBuilder {
    /// Create a builder for the given API and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not a valid absolute URL.
    pub fn new(api: CriblApi, base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let config = CriblClientConfig::new(base_url.as_ref())?.with_timeout(whole_seconds(timeout));

        Ok(Self {
            api,
            config,
            security: None,
            user_agent: concat!("cribl-core/", env!("CARGO_PKG_VERSION")).to_string(),
        })
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Attach a security scheme.
    #[must_use]
    pub fn with_security(mut self, security: Security) -> Self {
        self.security = Some(security);
        self
    }

    /// Set whether to verify TLS certificates for this client only.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.config = self.config.with_tls_verify(verify);
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(whole_seconds(timeout));
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation (including a
    /// timeout outside 1..=300 seconds), the base URL cannot be parsed or the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<ServiceClient> {
        self.config.validate()?;
        let base_url = self.config.parse_server_url()?;

        let mut builder = ClientBuilder::new()
            .user_agent(self.user_agent)
            .timeout(self.config.timeout())
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT))
            .pool_idle_timeout(Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT));

        if !self.config.tls_verify {
            warn!(api = %self.api, "TLS certificate verification disabled for this client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().map_err(|err| {
            Error::ConfigError(format!("Failed to build {} HTTP client: {err}", self.api))
        })?;

        Ok(ServiceClient {
            api: self.api,
            http,
            base_url,
            security: self.security,
            tls_verify: self.config.tls_verify,
            tokens: Arc::new(TokenCache::default()),
        })
    }
}

/// Asynchronous HTTP client bound to one Cribl API.
#[derive(Clone)]
pub struct ServiceClient {
    api: CriblApi,
    http: Client,
    base_url: Url,
    security: Option<Security>,
    tls_verify: bool,
    tokens: Arc<TokenCache>,
}

impl ServiceClient {
    /// Base URL (always ending in `/`).
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether TLS certificates are verified.
    #[must_use]
    pub const fn tls_verify(&self) -> bool {
        self.tls_verify
    }

    /// Whether a security scheme is attached.
    #[must_use]
    pub const fn has_security(&self) -> bool {
        self.security.is_some()
    }

    /// Resolve a relative path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path.trim_start_matches('/')).map_err(|err| {
            Error::InvalidEndpoint(format!("Invalid {} path `{path}`: {err}", self.api))
        })
    }

    /// Issue a `GET` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status or an
    /// undecodable body.
    pub async fn get_json<T>(&self, path: &str, params: &[(&'static str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.send_json::<(), T>(Method::GET, path, None, params)
            .await
    }

    /// Issue a request with an optional JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status or an
    /// undecodable body.
    pub async fn send_json<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        params: &[(&'static str, String)],
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .execute(method, path, params, |mut request| {
                request = request.header("Accept", "application/json");
                if let Some(payload) = body {
                    request = request.json(payload);
                }
                request
            })
            .await?;

        response.json::<R>().await.map_err(|err| {
            Error::ResponseParse(format!(
                "Failed to parse {} response for `{path}`: {err}",
                self.api
            ))
        })
    }

    /// Send a single request and map non-success statuses to [`Error`].
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn execute<F>(
        &self,
        method: Method,
        path: &str,
        params: &[(&'static str, String)],
        configure: F,
    ) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.build_url(path)?;
        let mut request = self.http.request(method.clone(), url);
        if !params.is_empty() {
            request = request.query(params);
        }
        request = self.authorize(request).await?;
        request = configure(request);

        debug!(api = %self.api, %method, path = %path, ?params, "Sending request");

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(map_status_to_error(self.api, status, text))
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match &self.security {
            None => Ok(request),
            Some(Security::BearerAuth(token)) => Ok(request.bearer_auth(token.expose_secret())),
            Some(Security::ClientOauth(scheme)) => {
                let token = self.tokens.get_or_fetch(&self.http, scheme).await?;
                Ok(request.bearer_auth(token.expose()))
            }
        }
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("api", &self.api)
            .field("base_url", &self.base_url.as_str())
            .field("security", &self.security)
            .field("tls_verify", &self.tls_verify)
            .finish_non_exhaustive()
    }
}

/// Map a non-success HTTP status to the shared error type.
#[must_use]
pub fn map_status_to_error(api: CriblApi, status: StatusCode, text: String) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(text),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::Unauthorized(format!("{api} rejected credentials ({status}): {text}"))
        }
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            Error::ServiceUnavailable(format!("{api} temporarily unavailable: {text}"))
        }
        status if status.is_server_error() => {
            Error::ServiceUnavailable(format!("{api} server error {status}: {text}"))
        }
        _ => Error::HttpError(format!("{api} error {status}: {text}")),
    }
}
