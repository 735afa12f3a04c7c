//! Error taxonomy for the request pipeline
//!
//! Every failure that crosses the pipeline boundary is an [`Error`]. It carries an
//! HTTP-like status (`0` for client-side conditions), a human-readable message and a
//! machine-readable [`ErrorKind`]. Callers should branch on [`Error::kind`], never on
//! the raw status: status `0` is shared by timeouts and network failures, which need
//! different messaging.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a pipeline error.
pub type Result<T> = std::result::Result<T, Error>;

/// Fallback message when the server supplies nothing usable.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// Message for [`ErrorKind::Timeout`].
pub const TIMEOUT_MESSAGE: &str = "The request timed out. Please check your connection and try again.";

/// Message for [`ErrorKind::NetworkError`].
pub const NETWORK_ERROR_MESSAGE: &str =
    "No internet connection. Please check your network and try again.";

/// Message for [`ErrorKind::AuthExpired`].
pub const AUTH_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// Message for [`ErrorKind::RateLimited`] when the server sends no message.
pub const RATE_LIMITED_MESSAGE: &str = "You've reached your limit for now. Please try again later.";

/// Message for [`ErrorKind::FeatureDisabled`]. The server's own message is never shown.
pub const FEATURE_DISABLED_MESSAGE: &str = "This feature is coming soon.";

/// Machine-readable classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The timeout budget elapsed before a response arrived.
    Timeout,
    /// A transport failure survived the single network retry.
    NetworkError,
    /// A 401 that credential refresh could not recover.
    AuthExpired,
    /// HTTP 429.
    RateLimited,
    /// HTTP 500.
    ServerError,
    /// HTTP 503: the endpoint exists but is not enabled for this client yet.
    FeatureDisabled,
    /// Any other failure. The server message (and code, if any) is passed through.
    Generic,
}

impl ErrorKind {
    /// Stable string code for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::NetworkError => "NETWORK_ERROR",
            ErrorKind::AuthExpired => "AUTH_EXPIRED",
            ErrorKind::RateLimited => "RATE_LIMITED",
            ErrorKind::ServerError => "SERVER_ERROR",
            ErrorKind::FeatureDisabled => "FEATURE_DISABLED",
            ErrorKind::Generic => "GENERIC",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The call was cancelled after the timeout budget elapsed.
    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout(Duration),

    /// Transport-level failure (connection refused, reset, DNS, ...) after one retry.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network(String),

    /// The session could not be recovered by a forced credential refresh.
    #[error("{}", AUTH_EXPIRED_MESSAGE)]
    AuthExpired,

    /// Rate limit or daily quota exceeded (429).
    #[error("{message}")]
    RateLimited {
        /// Server message, or [`RATE_LIMITED_MESSAGE`]
        message: String,
        /// Parsed `retry-after` header, informational only
        retry_after: Option<Duration>,
    },

    /// Internal server error (500). Also reported to the observability sink.
    #[error("{message}")]
    ServerError {
        /// Server message, or [`DEFAULT_ERROR_MESSAGE`]
        message: String,
        /// Request ID for support, if the server sent one
        request_id: Option<String>,
    },

    /// Feature not yet enabled for this client (503).
    #[error("{}", FEATURE_DISABLED_MESSAGE)]
    FeatureDisabled,

    /// Any other non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server `error` or `message` field, or [`DEFAULT_ERROR_MESSAGE`]
        message: String,
        /// Endpoint-specific code from the server's `code` field
        code: Option<String>,
    },

    /// A success response whose body is not the expected JSON.
    #[error("Failed to parse response body (status {status}): {source}")]
    Decode {
        /// HTTP status code of the response
        status: u16,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Request body serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// A required piece of client configuration was not supplied.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl Error {
    /// Classify a non-success HTTP response.
    ///
    /// Priority is fixed: 429, then 500, then 503, then everything else. A 401 that
    /// reaches this point is treated like any other status; auth expiry is decided by
    /// the executor, not here.
    pub fn from_response(status: u16, body: &[u8], headers: &http::HeaderMap) -> Self {
        let payload = ErrorPayload::parse(body);

        match status {
            429 => Error::RateLimited {
                message: payload
                    .message
                    .unwrap_or_else(|| RATE_LIMITED_MESSAGE.to_string()),
                retry_after: headers
                    .get(http::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .map(Duration::from_secs),
            },
            500 => Error::ServerError {
                message: payload
                    .message
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
                request_id: headers
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from),
            },
            503 => Error::FeatureDisabled,
            _ => Error::Api {
                status,
                message: payload
                    .message
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
                code: payload.code,
            },
        }
    }

    /// The taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Timeout(_) => ErrorKind::Timeout,
            Error::Network(_) => ErrorKind::NetworkError,
            Error::AuthExpired => ErrorKind::AuthExpired,
            Error::RateLimited { .. } => ErrorKind::RateLimited,
            Error::ServerError { .. } => ErrorKind::ServerError,
            Error::FeatureDisabled => ErrorKind::FeatureDisabled,
            _ => ErrorKind::Generic,
        }
    }

    /// HTTP-like status. `0` for failures that never produced a response.
    pub fn status(&self) -> u16 {
        match self {
            Error::AuthExpired => 401,
            Error::RateLimited { .. } => 429,
            Error::ServerError { .. } => 500,
            Error::FeatureDisabled => 503,
            Error::Api { status, .. } | Error::Decode { status, .. } => *status,
            _ => 0,
        }
    }

    /// Human-readable message suitable for display.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Endpoint-specific code supplied by the server, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// True for the two status-0 conditions: timeout and network failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Timeout(_) | Error::Network(_))
    }

    /// Get retry delay hint if this is a rate limit error with `retry-after`.
    pub fn retry_after(&self) -> Option<Duration> {
        if let Error::RateLimited { retry_after, .. } = self {
            *retry_after
        } else {
            None
        }
    }
}

/// Fields the backend may put in an error body.
///
/// Anything unparseable yields an empty payload so callers fall back to defaults.
#[derive(Debug, Default)]
struct ErrorPayload {
    message: Option<String>,
    code: Option<String>,
}

impl ErrorPayload {
    fn parse(body: &[u8]) -> Self {
        let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
            return Self::default();
        };

        let field = |name: &str| {
            value
                .get(name)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            message: field("error").or_else(|| field("message")),
            code: field("code"),
        }
    }
}
