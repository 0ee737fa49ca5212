//! Typed settings for each example variant.

use crate::credentials::{Credentials, EnvVar, MissingCredentials};
use crate::env::EnvSource;
use cribl_core::config::is_https_url;
use cribl_core::SchemeClientOauth;
use secrecy::{ExposeSecret, SecretString};

/// Cribl.Cloud organization id.
pub const CRIBL_ORG_ID: &str = "CRIBL_ORG_ID";
/// OAuth client id issued for the organization.
pub const CRIBL_CLIENT_ID: &str = "CRIBL_CLIENT_ID";
/// OAuth client secret issued for the organization.
pub const CRIBL_CLIENT_SECRET: &str = "CRIBL_CLIENT_SECRET";
/// Cloud workspace name.
pub const CRIBL_WORKSPACE_NAME: &str = "CRIBL_WORKSPACE_NAME";
/// Cloud domain.
pub const CRIBL_DOMAIN: &str = "CRIBL_DOMAIN";
/// On-premise leader URL.
pub const CRIBL_SERVER_URL: &str = "CRIBL_SERVER_URL";
/// On-premise account name.
pub const CRIBL_USERNAME: &str = "CRIBL_USERNAME";
/// On-premise account password.
pub const CRIBL_PASSWORD: &str = "CRIBL_PASSWORD";
/// Accept self-signed leader certificates.
pub const CRIBL_INSECURE_TLS: &str = "CRIBL_INSECURE_TLS";

/// Variables read by the cloud worker-group example.
pub const CLOUD_VARS: &[EnvVar] = &[
    EnvVar::required(CRIBL_ORG_ID, "your-org-id"),
    EnvVar::required(CRIBL_CLIENT_ID, "your-client-id"),
    EnvVar::required(CRIBL_CLIENT_SECRET, "your-client-secret"),
    EnvVar::optional(CRIBL_WORKSPACE_NAME, "main"),
    EnvVar::optional(CRIBL_DOMAIN, "cribl.cloud"),
];

/// Variables read by the workspace example.
pub const MGMT_VARS: &[EnvVar] = &[
    EnvVar::required(CRIBL_ORG_ID, "your-org-id"),
    EnvVar::required(CRIBL_CLIENT_ID, "your-client-id"),
    EnvVar::required(CRIBL_CLIENT_SECRET, "your-client-secret"),
    EnvVar::optional(CRIBL_DOMAIN, "cribl.cloud"),
];

/// Variables read by the on-premise worker-group example.
pub const ONPREM_VARS: &[EnvVar] = &[
    EnvVar::required(CRIBL_SERVER_URL, "http://localhost:19000"),
    EnvVar::optional(CRIBL_USERNAME, "admin"),
    EnvVar::optional(CRIBL_PASSWORD, "admin"),
    EnvVar::optional(CRIBL_INSECURE_TLS, "false"),
];

/// OAuth token endpoint for a cloud domain.
#[must_use]
pub fn token_url(domain: &str) -> String {
    format!("https://login.{domain}/oauth/token")
}

/// OAuth audience for a cloud domain.
#[must_use]
pub fn audience(domain: &str) -> String {
    format!("https://api.{domain}")
}

/// Parse a boolean flag (`true`, `1`, `yes`, `on`); anything else is false.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Service credentials for a Cribl.Cloud workspace leader.
#[derive(Debug, Clone)]
pub struct CloudSettings {
    /// Organization id.
    pub org_id: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: SecretString,
    /// Workspace name.
    pub workspace: String,
    /// Cloud domain.
    pub domain: String,
}

impl CloudSettings {
    /// Load and validate from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`MissingCredentials`] when a required value is unset or a placeholder.
    pub fn from_env(env: &dyn EnvSource) -> Result<Self, MissingCredentials> {
        let creds = Credentials::load(CLOUD_VARS, env);
        creds.validate()?;

        Ok(Self {
            org_id: creds.value(CRIBL_ORG_ID).to_string(),
            client_id: creds.value(CRIBL_CLIENT_ID).to_string(),
            client_secret: SecretString::from(creds.value(CRIBL_CLIENT_SECRET).to_string()),
            workspace: creds.value(CRIBL_WORKSPACE_NAME).to_string(),
            domain: creds.value(CRIBL_DOMAIN).to_string(),
        })
    }

    /// Control-plane base URL of the workspace leader.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "https://{}-{}.{}/api/v1",
            self.workspace, self.org_id, self.domain
        )
    }

    /// OAuth client-credentials scheme for this organization.
    #[must_use]
    pub fn oauth_scheme(&self) -> SchemeClientOauth {
        SchemeClientOauth::new(
            self.client_id.clone(),
            self.client_secret.expose_secret(),
            token_url(&self.domain),
            audience(&self.domain),
        )
    }
}

/// Service credentials for the organization management plane.
#[derive(Debug, Clone)]
pub struct MgmtSettings {
    /// Organization id.
    pub org_id: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: SecretString,
    /// Cloud domain.
    pub domain: String,
}

impl MgmtSettings {
    /// Load and validate from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`MissingCredentials`] when a required value is unset or a placeholder.
    pub fn from_env(env: &dyn EnvSource) -> Result<Self, MissingCredentials> {
        let creds = Credentials::load(MGMT_VARS, env);
        creds.validate()?;

        Ok(Self {
            org_id: creds.value(CRIBL_ORG_ID).to_string(),
            client_id: creds.value(CRIBL_CLIENT_ID).to_string(),
            client_secret: SecretString::from(creds.value(CRIBL_CLIENT_SECRET).to_string()),
            domain: creds.value(CRIBL_DOMAIN).to_string(),
        })
    }

    /// Management-plane gateway URL.
    #[must_use]
    pub fn server_url(&self) -> String {
        format!("https://gateway.{}", self.domain)
    }

    /// OAuth client-credentials scheme for this organization.
    #[must_use]
    pub fn oauth_scheme(&self) -> SchemeClientOauth {
        SchemeClientOauth::new(
            self.client_id.clone(),
            self.client_secret.expose_secret(),
            token_url(&self.domain),
            audience(&self.domain),
        )
    }
}

/// Username/password access to an on-premise leader.
#[derive(Debug, Clone)]
pub struct OnPremSettings {
    /// Leader URL as configured (without `/api/v1`).
    pub server_url: String,
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: SecretString,
    /// Whether self-signed certificates were explicitly allowed.
    pub insecure_tls: bool,
}

impl OnPremSettings {
    /// Load and validate from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`MissingCredentials`] when the server URL is unset or a placeholder.
    pub fn from_env(env: &dyn EnvSource) -> Result<Self, MissingCredentials> {
        let creds = Credentials::load(ONPREM_VARS, env);
        creds.validate()?;

        Ok(Self {
            server_url: creds.value(CRIBL_SERVER_URL).to_string(),
            username: creds.value(CRIBL_USERNAME).to_string(),
            password: SecretString::from(creds.value(CRIBL_PASSWORD).to_string()),
            insecure_tls: parse_flag(creds.value(CRIBL_INSECURE_TLS)),
        })
    }

    /// Control-plane base URL (`{server}/api/v1`).
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}/api/v1", self.server_url.trim_end_matches('/'))
    }

    /// Whether certificate validation is relaxed for this leader.
    ///
    /// Only true when the flag was set and the leader is reached over HTTPS.
    #[must_use]
    pub fn accepts_invalid_certs(&self) -> bool {
        self.insecure_tls && is_https_url(&self.server_url)
    }
}
