//! HTTP response handling and outcome resolution

use crate::error::{Error, Result};
use crate::observability::{ErrorReporter, RequestMetadata, ServerErrorEvent};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// A complete HTTP response, body fully read.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the body as JSON.
    ///
    /// An empty body is read as JSON `null`, so endpoints that answer `204 No Content`
    /// can be decoded into `()` or `Option<T>`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let body: &[u8] = if self.body.is_empty() {
            b"null"
        } else {
            &self.body
        };

        serde_json::from_slice(body).map_err(|source| Error::Decode {
            status: self.status.as_u16(),
            source,
        })
    }
}

/// Turns a completed response into a decoded payload or a taxonomy error.
///
/// Server errors (500) are also handed to the [`ErrorReporter`]. The reporter's own
/// failures are logged and otherwise ignored: the caller always receives the same
/// `ServerError` either way.
#[derive(Debug, Clone)]
pub struct ResponseResolver {
    reporter: Arc<dyn ErrorReporter>,
}

impl ResponseResolver {
    /// Create a resolver that reports server errors to `reporter`.
    pub fn new(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { reporter }
    }

    /// Resolve `response` for the call described by `request`.
    pub fn resolve<T: DeserializeOwned>(
        &self,
        request: &RequestMetadata,
        response: Response,
    ) -> Result<T> {
        if response.is_success() {
            return response.json();
        }

        let error = Error::from_response(
            response.status().as_u16(),
            response.body(),
            response.headers(),
        );

        if let Error::ServerError {
            message,
            request_id,
        } = &error
        {
            let event = ServerErrorEvent {
                method: request.method.clone(),
                path: request.path.clone(),
                status: response.status().as_u16(),
                message: message.clone(),
                request_id: request_id.clone(),
            };

            if let Err(report_error) = self.reporter.report(&event) {
                tracing::warn!(
                    path = %request.path,
                    error = %report_error,
                    "Failed to report server error"
                );
            }
        }

        Err(error)
    }
}
