//! Two-phase login against an on-premise leader.
//!
//! [`UnauthenticatedSession`] can only log in; listing is only reachable on the
//! [`AuthenticatedSession`] that login produces.

use cribl_control_plane::{ControlPlaneClient, LoginInfo, Product};
use cribl_core::{Entity, ListResponse, Result, Security};
use tracing::debug;
use url::Url;

/// Client built without credentials, used only for the token exchange.
#[derive(Debug)]
pub struct UnauthenticatedSession {
    client: ControlPlaneClient,
    base_url: String,
    tls_verify: bool,
}

impl UnauthenticatedSession {
    /// Build the unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn connect(base_url: impl Into<String>, tls_verify: bool) -> Result<Self> {
        let base_url = base_url.into();
        let client = ControlPlaneClient::builder(&base_url)?
            .with_tls_verify(tls_verify)
            .build()?;

        Ok(Self {
            client,
            base_url,
            tls_verify,
        })
    }

    /// Resolved control-plane base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.client.base_url()
    }

    /// Whether certificates are verified.
    #[must_use]
    pub const fn tls_verify(&self) -> bool {
        self.tls_verify
    }

    /// Exchange the login for a token and rebuild the client around it.
    ///
    /// # Errors
    ///
    /// Returns an error if the login is rejected, no token is returned, or
    /// the authenticated client cannot be built.
    pub async fn authenticate(self, login: &LoginInfo) -> Result<AuthenticatedSession> {
        let token = self.client.auth_tokens_get(login).await?;
        debug!("rebuilding control-plane client with bearer token");

        let client = ControlPlaneClient::builder(&self.base_url)?
            .with_tls_verify(self.tls_verify)
            .with_security(Security::BearerAuth(token.token))
            .build()?;

        Ok(AuthenticatedSession { client })
    }
}

/// Client carrying a bearer token.
#[derive(Debug)]
pub struct AuthenticatedSession {
    client: ControlPlaneClient,
}

impl AuthenticatedSession {
    /// The token-bearing client.
    #[must_use]
    pub const fn client(&self) -> &ControlPlaneClient {
        &self.client
    }

    /// List worker groups with the bearer token attached.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn list_worker_groups(&self, product: Product) -> Result<ListResponse<Entity>> {
        self.client.groups_list(product).await
    }
}
