//! Centralized observability utilities for structured logging and error reporting
//!
//! All calls are logged through this layer. Server errors additionally go to an
//! [`ErrorReporter`], the hook where hosts plug in their crash/error reporting sink.

use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// HTTP request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path
    pub path: String,
    /// Request body size in bytes (optional)
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Create new request metadata
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body_size: None,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log an attempt being sent
    pub fn log_attempt(&self, attempt: u32) {
        debug!(
            method = %self.method,
            path = %self.path,
            body_size = self.body_size,
            attempt,
            "Sending HTTP request"
        );
    }
}

/// HTTP response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code (0 when no response was received)
    pub status: u16,
    /// Time elapsed for the whole logical call
    pub elapsed: Duration,
    /// Number of retries taken (if any)
    pub retries: u32,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: u16, elapsed: Duration) -> Self {
        Self {
            status,
            elapsed,
            retries: 0,
        }
    }

    /// Set the number of retries
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Log successful response
    pub fn log_success(&self, request: &RequestMetadata) {
        info!(
            method = %request.method,
            path = %request.path,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            retries = self.retries,
            "HTTP request succeeded"
        );
    }

    /// Log failed response
    pub fn log_error(&self, request: &RequestMetadata, kind: &str, error: &str) {
        warn!(
            method = %request.method,
            path = %request.path,
            status = self.status,
            kind = %kind,
            elapsed_ms = self.elapsed.as_millis(),
            error = %error,
            retries = self.retries,
            "HTTP request failed"
        );
    }
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A server error worth a durable record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerErrorEvent {
    /// HTTP method of the failed call
    pub method: String,
    /// Request path of the failed call
    pub path: String,
    /// HTTP status (500)
    pub status: u16,
    /// Message the caller was given
    pub message: String,
    /// Server request ID, if any
    pub request_id: Option<String>,
}

/// The reporting sink itself failed.
#[derive(Debug, Error)]
#[error("Error reporter failed: {message}")]
pub struct ReportError {
    message: String,
}

impl ReportError {
    /// Create a report error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sink for server errors.
///
/// Called synchronously from the response path, so implementations should hand the
/// event off (queue, channel, spawned task) rather than do network I/O inline. A
/// returned error is logged and never changes the call's outcome.
pub trait ErrorReporter: Send + Sync + fmt::Debug {
    /// Record a server error.
    fn report(&self, event: &ServerErrorEvent) -> Result<(), ReportError>;
}

/// Default reporter: emits the event as a structured `error!` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, event: &ServerErrorEvent) -> Result<(), ReportError> {
        error!(
            method = %event.method,
            path = %event.path,
            status = event.status,
            message = %event.message,
            request_id = event.request_id.as_deref(),
            "Server error"
        );
        Ok(())
    }
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `lifeline=info`).
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "trace")]
pub fn init_tracing() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lifeline=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_metadata_creation() {
        let metadata = RequestMetadata::new("POST", "/conversations/c_1/messages");
        assert_eq!(metadata.method, "POST");
        assert_eq!(metadata.path, "/conversations/c_1/messages");
        assert_eq!(metadata.body_size, None);
    }

    #[test]
    fn test_request_metadata_with_body_size() {
        let metadata = RequestMetadata::new("POST", "/analytics/events").with_body_size(1024);
        assert_eq!(metadata.body_size, Some(1024));
    }

    #[test]
    fn test_response_metadata_with_retries() {
        let elapsed = Duration::from_millis(500);
        let metadata = ResponseMetadata::new(200, elapsed).with_retries(1);
        assert_eq!(metadata.status, 200);
        assert_eq!(metadata.elapsed, elapsed);
        assert_eq!(metadata.retries, 1);
    }

    #[test]
    fn test_request_timer() {
        let timer = RequestTimer::start();
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed().as_millis() >= 10);
    }

    #[test]
    fn test_tracing_reporter_never_fails() {
        let event = ServerErrorEvent {
            method: "GET".to_string(),
            path: "/profile".to_string(),
            status: 500,
            message: "Something went wrong".to_string(),
            request_id: None,
        };
        assert!(TracingReporter.report(&event).is_ok());
    }

    #[test]
    fn test_report_error_display() {
        let error = ReportError::new("queue full");
        assert_eq!(error.to_string(), "Error reporter failed: queue full");
    }
}
