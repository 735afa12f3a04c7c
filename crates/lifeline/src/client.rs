//! Main client implementation

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{
    config::{ClientConfig, ConnectionPoolConfig},
    credentials::CredentialProvider,
    error::{Error, Result},
    http::{ApiRequest, ReqwestTransport, RequestExecutor, Transport},
    observability::{ErrorReporter, TracingReporter},
    resources::{Analytics, Coaches, Conversations, Profile},
};

/// Entry point for every backend call.
///
/// Cloning is cheap; clones share the executor, the transport's connection pool and
/// the lazily created resources.
///
/// # Example
///
/// ```rust,no_run
/// use lifeline::{Client, StaticCredentials};
/// use std::sync::Arc;
///
/// # fn example() -> lifeline::Result<()> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")
///     .platform("ios")
///     .credentials(Arc::new(StaticCredentials::new("token")))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    executor: Arc<RequestExecutor>,

    // Lazy-initialized resources
    coaches: OnceLock<Coaches>,
    profile: OnceLock<Profile>,
    conversations: OnceLock<Conversations>,
    analytics: OnceLock<Analytics>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url().as_str())
            .field("transport", &self.inner.executor.transport_name())
            .finish()
    }
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client around an existing executor.
    pub fn from_executor(executor: Arc<RequestExecutor>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                executor,
                coaches: OnceLock::new(),
                profile: OnceLock::new(),
                conversations: OnceLock::new(),
                analytics: OnceLock::new(),
            }),
        }
    }

    /// Access the coach directory.
    pub fn coaches(&self) -> &Coaches {
        self.inner
            .coaches
            .get_or_init(|| Coaches::new(self.inner.executor.clone()))
    }

    /// Access the user's profile.
    pub fn profile(&self) -> &Profile {
        self.inner
            .profile
            .get_or_init(|| Profile::new(self.inner.executor.clone()))
    }

    /// Access conversations and messages.
    pub fn conversations(&self) -> &Conversations {
        self.inner
            .conversations
            .get_or_init(|| Conversations::new(self.inner.executor.clone()))
    }

    /// Access analytics ingestion.
    pub fn analytics(&self) -> &Analytics {
        self.inner
            .analytics
            .get_or_init(|| Analytics::new(self.inner.executor.clone()))
    }

    /// Send a custom request through the same pipeline as the typed endpoints.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use lifeline::{Client, http::ApiRequest};
    /// # async fn example(client: Client) -> lifeline::Result<()> {
    /// let flags: serde_json::Value = client
    ///     .execute(&ApiRequest::get("/feature-flags").build())
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        self.inner.executor.execute(request).await
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &url::Url {
        self.inner.executor.base_url()
    }
}

/// Builder for creating a configured [`Client`].
///
/// A credential provider is required. The reporter defaults to [`TracingReporter`] and
/// the transport to a [`ReqwestTransport`] built from the connection pool settings.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    credentials: Option<Arc<dyn CredentialProvider>>,
    reporter: Option<Arc<dyn ErrorReporter>>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Start from an existing configuration, e.g. [`ClientConfig::from_env`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the platform header value.
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.config.platform = platform.into();
        self
    }

    /// Set the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the delay before the single network retry.
    pub fn network_retry_delay(mut self, delay: Duration) -> Self {
        self.config.network_retry_delay = delay;
        self
    }

    /// Add a custom default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|e| Error::HttpClient(format!("Invalid header name '{}': {}", key_str, e)))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Set connection pool configuration for the default transport.
    pub fn connection_pool(mut self, pool: ConnectionPoolConfig) -> Self {
        self.config.connection_pool = pool;
        self
    }

    /// Set the credential provider.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the sink for server errors.
    pub fn reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Replace the HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No credential provider was set
    /// - The base URL is missing or invalid
    /// - The default transport cannot be constructed
    pub fn build(self) -> Result<Client> {
        let credentials = self
            .credentials
            .ok_or_else(|| Error::MissingConfig("credential provider".to_string()))?;

        let reporter = self
            .reporter
            .unwrap_or_else(|| Arc::new(TracingReporter));

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.config.connection_pool)?),
        };

        let executor = RequestExecutor::new(&self.config, transport, credentials, reporter)?;
        Ok(Client::from_executor(Arc::new(executor)))
    }
}
