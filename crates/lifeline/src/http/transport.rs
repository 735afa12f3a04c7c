//! HTTP transport abstraction
//!
//! The executor talks to the network through the [`Transport`] trait so that the
//! retry and timeout policy is independent of the HTTP client. [`ReqwestTransport`]
//! is the default implementation.

use super::{PreparedRequest, Response};
use crate::config::ConnectionPoolConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Failure below the HTTP layer: no status line was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The client itself gave up waiting.
    #[error("Request timed out")]
    Timeout,

    /// Network or connection error (refused, reset, DNS, broken body stream, ...).
    #[error("Connection error: {0}")]
    Connection(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Connection(error.to_string())
        }
    }
}

/// Sends a fully prepared request and returns the complete response.
///
/// Implementations must not retry or apply their own timeout policy; the executor
/// owns both. Dropping the returned future must abort the underlying call.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send one physical request, reading the whole body.
    async fn send(&self, request: PreparedRequest) -> std::result::Result<Response, TransportError>;

    /// Transport name for debugging/logging.
    fn name(&self) -> &'static str;
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from connection pool settings.
    ///
    /// No client-level timeout is set; the executor enforces the timeout budget.
    pub fn new(pool: &ConnectionPoolConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(format!("lifeline-rust/{}", crate::VERSION))
            .pool_max_idle_per_host(pool.max_idle_per_host)
            .pool_idle_timeout(pool.idle_timeout)
            .tcp_keepalive(pool.tcp_keepalive);

        if let Some(connect_timeout) = pool.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        Ok(Self { http_client })
    }

    /// Wrap an existing client, e.g. one shared with other parts of the host.
    pub fn from_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> std::result::Result<Response, TransportError> {
        let PreparedRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut req = self.http_client.request(method, url).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        Ok(Response::new(status, headers, body))
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}
