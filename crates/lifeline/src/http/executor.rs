//! Request executor
//!
//! Every backend call goes through [`RequestExecutor::execute`]. One logical call runs
//! this state machine:
//!
//! ```text
//! INITIAL ─▶ AWAIT_TOKEN ─▶ IN_FLIGHT ─┬─▶ SUCCESS / OTHER_FAILURE   (resolver, no retry)
//!                ▲                     ├─▶ TIMEOUT                   (terminal)
//!                │                     ├─▶ NETWORK_FAILURE ─▶ wait, IN_FLIGHT once more
//!                └── forced refresh ◀──┴─▶ AUTH_EXPIRED (401)        (refresh once, else end session)
//! ```
//!
//! Attempts within a call are strictly sequential. Calls share no mutable state: two
//! calls that both see a 401 each run their own forced refresh.

use super::retry::AttemptBudget;
use super::{ApiRequest, PreparedRequest, Response, ResponseResolver, Transport, TransportError};
use crate::config::{ClientConfig, PLATFORM_HEADER};
use crate::credentials::{Credential, CredentialProvider};
use crate::error::{Error, Result};
use crate::observability::{ErrorReporter, RequestMetadata, RequestTimer, ResponseMetadata};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Orchestrates credential attachment, timeout, retries and resolution.
#[derive(Debug)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialProvider>,
    resolver: ResponseResolver,
    base_url: Url,
    default_headers: HeaderMap,
    timeout: Duration,
    network_retry_delay: Duration,
}

impl RequestExecutor {
    /// Build an executor from configuration and its collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is missing, empty, unparseable or not `http`/`https`
    /// - The platform header value is invalid
    pub fn new(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialProvider>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Result<Self> {
        let base_url = parse_base_url(config.base_url.as_deref())?;

        let mut default_headers = config.default_headers.clone();
        default_headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        default_headers.insert(
            HeaderName::from_static(PLATFORM_HEADER),
            HeaderValue::from_str(&config.platform)
                .map_err(|_| Error::InvalidHeaderValue(config.platform.clone()))?,
        );

        Ok(Self {
            transport,
            credentials,
            resolver: ResponseResolver::new(reporter),
            base_url,
            default_headers,
            timeout: config.timeout,
            network_retry_delay: config.network_retry_delay,
        })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The per-attempt timeout budget.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Name of the underlying transport.
    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Run one logical call and decode its success payload.
    ///
    /// # Errors
    ///
    /// Returns a taxonomy error ([`Error::kind`]) for every failure class; see the
    /// module docs for which ones are retried.
    pub async fn execute<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let mut metadata = RequestMetadata::new(request.method().as_str(), request.path());
        if let Some(body) = request.body() {
            metadata = metadata.with_body_size(body.len());
        }

        let timer = RequestTimer::start();
        let mut budget = AttemptBudget::new();

        let result = self.run::<T>(request, &metadata, &mut budget).await;

        match &result {
            Ok((status, _)) => ResponseMetadata::new(status.as_u16(), timer.elapsed())
                .with_retries(budget.retries())
                .log_success(&metadata),
            Err(error) => ResponseMetadata::new(error.status(), timer.elapsed())
                .with_retries(budget.retries())
                .log_error(&metadata, error.kind().as_str(), &error.to_string()),
        }

        result.map(|(_, payload)| payload)
    }

    async fn run<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        metadata: &RequestMetadata,
        budget: &mut AttemptBudget,
    ) -> Result<(StatusCode, T)> {
        let url = request.url(&self.base_url)?;
        let mut credential = self.credentials.get_token(false).await;

        loop {
            let prepared = self.prepare(request, &url, credential.as_ref())?;
            let response = self.send_with_network_retry(prepared, metadata, budget).await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                let fresh = self.recover_credential(metadata, budget, credential).await?;
                credential = Some(fresh);
                continue;
            }

            return self
                .resolver
                .resolve(metadata, response)
                .map(|payload| (status, payload));
        }
    }

    /// Handle a 401: one forced refresh, and only if it yields a different token.
    async fn recover_credential(
        &self,
        metadata: &RequestMetadata,
        budget: &mut AttemptBudget,
        previous: Option<Credential>,
    ) -> Result<Credential> {
        if !budget.take_auth_retry() {
            warn!(path = %metadata.path, "401 after credential refresh; ending session");
            return Err(self.expire_session());
        }

        match self.credentials.get_token(true).await {
            Some(fresh) if previous.as_ref() != Some(&fresh) => {
                debug!(path = %metadata.path, "Credential refreshed; retrying request");
                Ok(fresh)
            }
            _ => {
                warn!(
                    path = %metadata.path,
                    "Forced refresh returned no new credential; ending session"
                );
                Err(self.expire_session())
            }
        }
    }

    fn expire_session(&self) -> Error {
        self.credentials.end_session();
        Error::AuthExpired
    }

    /// Send under the timeout budget, retrying a transport failure once.
    ///
    /// On timeout the in-flight future is dropped, which aborts the call.
    async fn send_with_network_retry(
        &self,
        prepared: PreparedRequest,
        metadata: &RequestMetadata,
        budget: &mut AttemptBudget,
    ) -> Result<Response> {
        loop {
            budget.record_attempt();
            metadata.log_attempt(budget.attempts());

            let attempt = self.transport.send(prepared.clone());
            match tokio::time::timeout(self.timeout, attempt).await {
                Ok(Ok(response)) => return Ok(response),
                Ok(Err(TransportError::Timeout)) | Err(_) => {
                    warn!(
                        path = %metadata.path,
                        timeout_ms = self.timeout.as_millis(),
                        "Request timed out"
                    );
                    return Err(Error::Timeout(self.timeout));
                }
                Ok(Err(TransportError::Connection(detail))) => {
                    if !budget.take_network_retry() {
                        return Err(Error::Network(detail));
                    }
                    warn!(
                        path = %metadata.path,
                        error = %detail,
                        delay_ms = self.network_retry_delay.as_millis(),
                        "Transport failure; retrying once"
                    );
                    tokio::time::sleep(self.network_retry_delay).await;
                }
            }
        }
    }

    fn prepare(
        &self,
        request: &ApiRequest,
        url: &Url,
        credential: Option<&Credential>,
    ) -> Result<PreparedRequest> {
        let mut headers = self.default_headers.clone();
        for (key, value) in request.headers() {
            headers.insert(key.clone(), value.clone());
        }

        // Sent even when empty; the backend reads an empty bearer as unauthenticated.
        let token = credential.map(Credential::expose).unwrap_or_default();
        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::InvalidHeaderValue("authorization".to_string()))?;
        authorization.set_sensitive(true);
        headers.insert(http::header::AUTHORIZATION, authorization);

        Ok(PreparedRequest {
            method: request.method().clone(),
            url: url.clone(),
            headers,
            body: request.body().cloned(),
        })
    }
}

fn parse_base_url(base_url: Option<&str>) -> Result<Url> {
    let base_url = base_url.ok_or_else(|| Error::InvalidUrl("Base URL is required".to_string()))?;

    if base_url.trim().is_empty() {
        return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
    }

    let url: Url = base_url
        .parse()
        .map_err(|e| Error::InvalidUrl(format!("{}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::InvalidUrl(format!(
            "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
            scheme
        ))),
    }
}
