//! Control-plane request and response models.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product family whose worker groups are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    /// Cribl Stream worker groups
    #[default]
    Stream,
    /// Cribl Edge fleets
    Edge,
}

impl Product {
    /// Path segment used by the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Edge => "edge",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Username/password pair exchanged for a bearer token.
#[derive(Debug, Clone)]
pub struct LoginInfo {
    /// Local account name.
    pub username: String,
    /// Account password.
    pub password: SecretString,
}

impl LoginInfo {
    /// Create login credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub(crate) fn as_request(&self) -> LoginRequest<'_> {
        LoginRequest {
            username: &self.username,
            password: self.password.expose_secret(),
        }
    }
}

/// Wire form of [`LoginInfo`]; only built for the duration of one request.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Bearer token issued by `POST /auth/login`.
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// Token value without any `Bearer ` prefix.
    pub token: SecretString,
    /// Whether the server requires the password to be changed.
    pub force_password_change: bool,
}

impl AuthToken {
    /// Expose the raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.token.expose_secret()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthTokenResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub force_password_change: Option<bool>,
}

impl AuthTokenResponse {
    /// Convert into an [`AuthToken`], stripping a leading `Bearer ` scheme.
    pub(crate) fn into_token(self) -> Option<AuthToken> {
        let raw = self.token?;
        let trimmed = raw.trim();
        let value = match (trimmed.get(..6), trimmed.get(6..)) {
            (Some(scheme), Some(rest))
                if scheme.eq_ignore_ascii_case("bearer")
                    && (rest.is_empty() || rest.starts_with(char::is_whitespace)) =>
            {
                rest.trim_start()
            }
            _ => trimmed,
        };

        if value.is_empty() {
            return None;
        }

        Some(AuthToken {
            token: SecretString::from(value.to_string()),
            force_password_change: self.force_password_change.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(token: Option<&str>) -> AuthTokenResponse {
        AuthTokenResponse {
            token: token.map(str::to_string),
            force_password_change: None,
        }
    }

    #[test]
    fn product_path_segments() {
        assert_eq!(Product::Stream.as_str(), "stream");
        assert_eq!(Product::Edge.to_string(), "edge");
        assert_eq!(Product::default(), Product::Stream);
    }

    #[test]
    fn login_request_serializes_plain_credentials() {
        let login = LoginInfo::new("admin", "hunter2");
        let json = serde_json::to_value(login.as_request()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"username": "admin", "password": "hunter2"})
        );
        assert!(!format!("{login:?}").contains("hunter2"));
    }

    #[test]
    fn token_prefix_is_stripped() {
        let token = response(Some("Bearer eyJabc")).into_token().unwrap();
        assert_eq!(token.expose(), "eyJabc");

        let token = response(Some("eyJdef")).into_token().unwrap();
        assert_eq!(token.expose(), "eyJdef");
    }

    #[test]
    fn missing_or_blank_token_is_rejected() {
        assert!(response(None).into_token().is_none());
        assert!(response(Some("")).into_token().is_none());
        assert!(response(Some("Bearer ")).into_token().is_none());
    }

    #[test]
    fn force_password_change_defaults_to_false() {
        let parsed: AuthTokenResponse =
            serde_json::from_str(r#"{"token": "abc", "forcePasswordChange": true}"#).unwrap();
        assert!(parsed.into_token().unwrap().force_password_change);

        let parsed: AuthTokenResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert!(!parsed.into_token().unwrap().force_password_change);
    }
}
