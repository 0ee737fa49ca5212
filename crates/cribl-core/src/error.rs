//! Error types for Cribl API operations.
//!
//! A single error enum is shared by every API crate so that callers can match
//! on transport, authentication and decoding failures uniformly.

use thiserror::Error;

/// Main error type for Cribl API operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Remote service is unreachable or reported a transient failure
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials were rejected by the remote service
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// OAuth token endpoint refused or returned an unusable response
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    ResponseParse(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for Cribl API operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::TokenExchange(_) => "TOKEN_EXCHANGE",
            Self::ResponseParse(_) => "RESPONSE_PARSE",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_) | Self::ResponseParse(_) | Self::InvalidEndpoint(_)
        )
    }
}

/// Render an error together with every `source()` beneath it.
///
/// reqwest hides TLS and connector failures in the source chain, so the
/// top-level `Display` alone would drop the certificate details.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let message = error_chain(&err);
        if err.is_timeout() {
            Self::Timeout(message)
        } else if err.is_connect() {
            Self::ServiceUnavailable(message)
        } else if err.is_decode() {
            Self::ResponseParse(message)
        } else {
            Self::HttpError(message)
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ResponseParse(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
