//! Asynchronous management-plane client implementation.

use crate::Result;
use cribl_core::client::{ServiceClient, ServiceClientBuilder, MGMT_PLANE_DEFAULT_TIMEOUT};
use cribl_core::{CriblApi, Entity, Error, ListResponse, Security};
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("cribl-mgmt-plane/", env!("CARGO_PKG_VERSION"));

/// Builder for [`MgmtPlaneClient`].
#[derive(Debug, Clone)]
pub struct MgmtPlaneClientBuilder {
    inner: ServiceClientBuilder,
}

impl MgmtPlaneClientBuilder {
    /// Create a builder for the specified server URL (e.g. `https://gateway.cribl.cloud`).
    pub fn new(server_url: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            CriblApi::ManagementPlane,
            server_url,
            Duration::from_secs(MGMT_PLANE_DEFAULT_TIMEOUT),
        )?
        .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Attach a security scheme.
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
    pub fn build(self) -> Result<MgmtPlaneClient> {
        let inner = self.inner.build()?;
        Ok(MgmtPlaneClient { inner })
    }
}

/// Asynchronous management-plane client.
#[derive(Debug, Clone)]
pub struct MgmtPlaneClient {
    inner: ServiceClient,
}

impl MgmtPlaneClient {
    /// Start a builder for the server URL.
    pub fn builder(server_url: impl AsRef<str>) -> Result<MgmtPlaneClientBuilder> {
        MgmtPlaneClientBuilder::new(server_url)
    }

    /// Return the server URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// List the workspaces of an organization
    /// (`GET /v1/organizations/{organizationId}/workspaces`).
    pub async fn workspaces_list(&self, organization_id: &str) -> Result<ListResponse<Entity>> {
        if !is_valid_organization_id(organization_id) {
            return Err(Error::ValidationError(format!(
                "Invalid organization id `{organization_id}`"
            )));
        }

        debug!(organization_id, "Listing workspaces");
        let path = format!("v1/organizations/{organization_id}/workspaces");
        self.inner.get_json(&path, &[]).await
    }
}

/// Organization ids are a single path segment of ASCII letters, digits, `-` and `_`.
fn is_valid_organization_id(organization_id: &str) -> bool {
    !organization_id.is_empty()
        && organization_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use cribl_core::SchemeClientOauth;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn oauth_client(server: &MockServer) -> MgmtPlaneClient {
        let scheme = SchemeClientOauth::new(
            "client-123",
            "s3cret",
            format!("{}/oauth/token", server.uri()),
            "https://api.cribl.cloud",
        );
        MgmtPlaneClient::builder(server.uri())
            .unwrap()
            .with_security(Security::ClientOauth(scheme))
            .build()
            .unwrap()
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "mgmt-token",
                "expires_in": 86400
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn workspaces_list_success() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/organizations/acme/workspaces"))
            .and(header("Authorization", "Bearer mgmt-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "items": [{
                    "workspaceId": "main",
                    "region": "us-west-2",
                    "leaderFQDN": "main-acme.cribl.cloud",
                    "state": "Workspace-Active"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let workspaces = oauth_client(&server)
            .workspaces_list("acme")
            .await
            .unwrap()
            .into_items();
        assert_eq!(workspaces.len(), 1);
        assert_eq!(
            workspaces[0].display_field("workspaceId").as_deref(),
            Some("main")
        );
    }

    #[tokio::test]
    async fn workspaces_list_without_items() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/organizations/acme/workspaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let workspaces = oauth_client(&server).workspaces_list("acme").await.unwrap();
        assert!(workspaces.into_items().is_empty());
    }

    #[tokio::test]
    async fn unknown_organization_is_not_found() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/organizations/ghost/workspaces"))
            .respond_with(ResponseTemplate::new(404).set_body_string("organization not found"))
            .mount(&server)
            .await;

        let err = oauth_client(&server)
            .workspaces_list("ghost")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_organization_id_is_rejected_locally() {
        let server = MockServer::start().await;
        let err = oauth_client(&server)
            .workspaces_list("acme/../admin")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn organization_id_cannot_reshape_the_path() {
        let server = MockServer::start().await;
        let client = oauth_client(&server);

        for organization_id in ["acme?x=1", "acme#frag", "..", "", "acme corp", "acme%2F"] {
            let err = client.workspaces_list(organization_id).await.unwrap_err();
            assert!(
                matches!(err, Error::ValidationError(_)),
                "{organization_id:?} should be rejected"
            );
        }
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn organization_id_charset() {
        assert!(is_valid_organization_id("acme"));
        assert!(is_valid_organization_id("cool-org_42"));
        assert!(!is_valid_organization_id("acme.corp"));
        assert!(!is_valid_organization_id("acme/../admin"));
    }
}
