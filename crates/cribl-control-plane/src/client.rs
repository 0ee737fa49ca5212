//! Asynchronous control-plane client implementation.

use crate::models::{AuthToken, AuthTokenResponse, LoginInfo, Product};
use crate::Result;
use cribl_core::client::{ServiceClient, ServiceClientBuilder, CONTROL_PLANE_DEFAULT_TIMEOUT};
use cribl_core::{CriblApi, Entity, Error, ListResponse, Security};
use reqwest::Method;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const USER_AGENT: &str = concat!("cribl-control-plane/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ControlPlaneClient`].
#[derive(Debug, Clone)]
pub struct ControlPlaneClientBuilder {
    inner: ServiceClientBuilder,
}

impl ControlPlaneClientBuilder {
    /// Create a builder for the specified base URL (e.g. `https://leader:9000/api/v1`).
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            CriblApi::ControlPlane,
            base_url,
            Duration::from_secs(CONTROL_PLANE_DEFAULT_TIMEOUT),
        )?
        .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Attach a security scheme (OAuth client credentials or bearer token).
    #[must_use]
    pub fn with_security(mut self, security: Security) -> Self {
        self.inner = self.inner.with_security(security);
        self
    }

    /// Set whether TLS certificates are verified for this client.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.inner = self.inner.with_tls_verify(verify);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ControlPlaneClient> {
        let inner = self.inner.build()?;
        Ok(ControlPlaneClient { inner })
    }
}

/// Asynchronous control-plane client.
#[derive(Debug, Clone)]
pub struct ControlPlaneClient {
    inner: ServiceClient,
}

impl ControlPlaneClient {
    /// Construct an unauthenticated client directly from the base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        ControlPlaneClientBuilder::new(base_url)?.build()
    }

    /// Start a builder for the base URL.
    pub fn builder(base_url: impl AsRef<str>) -> Result<ControlPlaneClientBuilder> {
        ControlPlaneClientBuilder::new(base_url)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Whether TLS certificates are verified.
    #[must_use]
    pub const fn tls_verify(&self) -> bool {
        self.inner.tls_verify()
    }

    /// Whether the client carries credentials.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.inner.has_security()
    }

    /// Exchange a username and password for a bearer token (`POST /auth/login`).
    pub async fn auth_tokens_get(&self, login: &LoginInfo) -> Result<AuthToken> {
        info!(username = %login.username, "Requesting control-plane login token");

        let response: AuthTokenResponse = self
            .inner
            .send_json(Method::POST, "auth/login", Some(&login.as_request()), &[])
            .await?;

        let token = response.into_token().ok_or_else(|| {
            Error::Unauthorized("No token received from authentication".to_string())
        })?;

        debug!(
            force_password_change = token.force_password_change,
            "Login token issued"
        );
        Ok(token)
    }

    /// List worker groups for a product (`GET /products/{product}/groups`).
    ///
    /// Only the first page returned by the server is surfaced.
    pub async fn groups_list(&self, product: Product) -> Result<ListResponse<Entity>> {
        let path = format!("products/{product}/groups");
        self.inner.get_json(&path, &[]).await
    }
}
