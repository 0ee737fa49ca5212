//! Authentication schemes understood by the Cribl APIs.
//!
//! Two schemes are supported:
//!
//! - [`Security::ClientOauth`]: service credentials exchanged for an access
//!   token at an OAuth token endpoint using the client-credentials grant.
//! - [`Security::BearerAuth`]: an already-issued bearer token, typically the
//!   result of a username/password login against an on-premise leader.

use crate::error::{error_chain, Error, Result};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Access tokens are refreshed this long before their advertised expiry.
pub const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Security configuration attached to a client.
#[derive(Debug, Clone)]
pub enum Security {
    /// OAuth client-credentials grant.
    ClientOauth(SchemeClientOauth),
    /// Static bearer token.
    BearerAuth(SecretString),
}

impl Security {
    /// Convenience constructor for a bearer token.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerAuth(SecretString::from(token.into()))
    }
}

/// Parameters for the OAuth client-credentials grant.
#[derive(Debug, Clone)]
pub struct SchemeClientOauth {
    /// OAuth client identifier.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: SecretString,
    /// Token endpoint (e.g. `https://login.cribl.cloud/oauth/token`).
    pub token_url: String,
    /// Audience requested for the token (e.g. `https://api.cribl.cloud`).
    pub audience: String,
}

impl SchemeClientOauth {
    /// Create a new client-credentials scheme.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            token_url: token_url.into(),
            audience: audience.into(),
        }
    }
}

#[derive(Serialize)]
struct ClientCredentialsRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    audience: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// An access token together with the instant it stops being usable.
#[derive(Debug, Clone)]
pub(crate) struct AccessToken {
    value: SecretString,
    expires_at: Option<Instant>,
}

impl AccessToken {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at
            .map_or(true, |expires_at| now + TOKEN_REFRESH_MARGIN < expires_at)
    }

    pub(crate) fn expose(&self) -> &str {
        self.value.expose_secret()
    }
}

/// Holds the most recent OAuth access token for one client.
#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    slot: Mutex<Option<AccessToken>>,
}

impl TokenCache {
    /// Return a usable token, fetching a new one when absent or about to expire.
    pub(crate) async fn get_or_fetch(
        &self,
        http: &Client,
        scheme: &SchemeClientOauth,
    ) -> Result<AccessToken> {
        let mut slot = self.slot.lock().await;
        if let Some(token) = slot.as_ref() {
            if token.is_fresh(Instant::now()) {
                return Ok(token.clone());
            }
            debug!("cached access token expired, requesting a new one");
        }

        let token = fetch_client_credentials_token(http, scheme).await?;
        *slot = Some(token.clone());
        Ok(token)
    }
}

async fn fetch_client_credentials_token(
    http: &Client,
    scheme: &SchemeClientOauth,
) -> Result<AccessToken> {
    let body = ClientCredentialsRequest {
        grant_type: "client_credentials",
        client_id: &scheme.client_id,
        client_secret: scheme.client_secret.expose_secret(),
        audience: &scheme.audience,
    };

    info!(token_url = %scheme.token_url, client_id = %scheme.client_id, "Requesting OAuth access token");

    let response = http
        .post(&scheme.token_url)
        .header("Accept", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|err| match Error::from(err) {
            Error::HttpError(message) => Error::TokenExchange(message),
            other => other,
        })?;

    let status = response.status();
    if !status.is_success() {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Error::Unauthorized(format!("OAuth token request rejected: {text}"))
            }
            _ => Error::TokenExchange(format!("token endpoint returned {status}: {text}")),
        });
    }

    let token: TokenResponse = response.json().await.map_err(|err| {
        Error::TokenExchange(format!(
            "unreadable token endpoint response: {}",
            error_chain(&err)
        ))
    })?;

    if token.access_token.is_empty() {
        return Err(Error::TokenExchange(
            "token endpoint returned an empty access_token".to_string(),
        ));
    }

    Ok(AccessToken {
        value: SecretString::from(token.access_token),
        expires_at: token
            .expires_in
            .map(|secs| Instant::now() + Duration::from_secs(secs)),
    })
}
