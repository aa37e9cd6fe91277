//! Error types for the bark client
//!
//! Every failed operation surfaces as exactly one of four kinds: configuration,
//! validation, network or server. Configuration and validation errors are raised
//! before any network access; network and server errors only after an attempt.

use std::path::PathBuf;
use thiserror::Error;

use crate::response::GatewayResponse;

/// Main error type returned by every client operation
#[derive(Error, Debug)]
pub enum BarkError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Network error: {message}")]
    Network {
        message: String,
        timed_out: bool,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

/// Convenience type alias for Results using BarkError
pub type BarkResult<T> = Result<T, BarkError>;

/// Problems with the client setup or the persisted configuration file
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("bark key cannot be empty")]
    EmptyKey,

    #[error("bark key cannot be '{key}'")]
    DotSegmentKey { key: String },

    #[error("invalid server URL '{url}'")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("server URL '{url}' must be an absolute http or https URL")]
    UnsupportedServerUrl { url: String },

    #[error("failed to build HTTP client")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to start async runtime")]
    Runtime {
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    #[error("config file '{path}': failed to {operation}")]
    ConfigFile {
        path: PathBuf,
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("unknown configuration key: {key}")]
    UnknownKey { key: String },

    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Client-side request validation failures
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("notification body cannot be empty")]
    EmptyBody,

    #[error("invalid level value '{value}'. must be one of: active, timeSensitive, passive, critical")]
    InvalidLevel { value: String },

    /// `.` and `..` are removed by URL path normalization, so they cannot be
    /// sent as path segments. Use the POST form for such text.
    #[error("{field} cannot be '{value}' when sending with GET")]
    DotSegment { field: &'static str, value: String },

    #[error("failed to encode request body")]
    Encoding {
        #[source]
        source: serde_json::Error,
    },
}

/// Which stage of response classification rejected the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerErrorKind {
    /// The HTTP status was not 200; `raw_body` holds the reply text.
    HttpStatus,
    /// The reply was not a valid gateway JSON document.
    InvalidResponse,
    /// The gateway answered with a `code` other than 200; `response` is populated.
    Gateway,
}

/// Failure reported by (or about) the gateway's reply
#[derive(Error, Debug)]
#[error("{message} (Status code: {status_code})")]
pub struct ServerError {
    pub kind: ServerErrorKind,
    pub status_code: u16,
    pub message: String,
    pub raw_body: Option<String>,
    pub response: Option<GatewayResponse>,
}

impl ServerError {
    /// Non-success HTTP status; the body may not be JSON so it is kept verbatim
    pub fn http_status(status_code: u16, raw_body: impl Into<String>) -> Self {
        let raw_body = raw_body.into();
        Self {
            kind: ServerErrorKind::HttpStatus,
            status_code,
            message: format!("server returned error: {}", raw_body.trim()),
            raw_body: Some(raw_body),
            response: None,
        }
    }

    /// HTTP success but the body could not be parsed
    pub fn invalid_response(
        status_code: u16,
        detail: impl std::fmt::Display,
        raw_body: impl Into<String>,
    ) -> Self {
        Self {
            kind: ServerErrorKind::InvalidResponse,
            status_code,
            message: format!("failed to parse response: {detail}"),
            raw_body: Some(raw_body.into()),
            response: None,
        }
    }

    /// HTTP success but the gateway rejected the notification
    pub fn gateway(status_code: u16, response: GatewayResponse) -> Self {
        Self {
            kind: ServerErrorKind::Gateway,
            status_code,
            message: format!("API error: {}", response.message),
            raw_body: None,
            response: Some(response),
        }
    }
}

impl BarkError {
    /// Create a new Network error with source
    pub fn network(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: message.into(),
            timed_out: false,
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Validation(_) => "validation",
            Self::Network { .. } => "network",
            Self::Server(_) => "server",
        }
    }

    /// Whether a caller-side retry could plausibly succeed.
    ///
    /// The client itself never retries; this only informs callers that layer
    /// their own resilience on top.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Server(err) => {
                err.kind == ServerErrorKind::HttpStatus
                    && (err.status_code >= 500 || err.status_code == 408 || err.status_code == 429)
            }
            _ => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { timed_out: true, .. })
    }

    /// HTTP status attached to a server error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Server(err) => Some(err.status_code),
            _ => None,
        }
    }

    pub fn as_server_error(&self) -> Option<&ServerError> {
        match self {
            Self::Server(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BarkError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out"
        } else if err.is_connect() {
            "connection failed"
        } else if err.is_body() || err.is_decode() {
            "failed to read response body"
        } else {
            "request failed"
        };

        Self::Network {
            message: message.to_string(),
            timed_out: err.is_timeout(),
            source: Some(Box::new(err)),
        }
    }
}
