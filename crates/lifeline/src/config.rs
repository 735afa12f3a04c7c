//! Configuration for the client

use crate::http::retry::NETWORK_RETRY_DELAY;
use http::HeaderMap;
use std::time::Duration;

/// Default timeout budget for one physical attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default value of the platform header.
pub const DEFAULT_PLATFORM: &str = "rust";

/// Name of the header identifying the calling platform.
pub const PLATFORM_HEADER: &str = "x-client-platform";

/// Configuration for the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is appended to
    pub base_url: Option<String>,

    /// Value of the platform header (`ios`, `android`, `web`, ...)
    pub platform: String,

    /// Timeout budget per physical attempt
    pub timeout: Duration,

    /// Fixed delay before the single network retry
    pub network_retry_delay: Duration,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,

    /// Connection pool configuration
    pub connection_pool: ConnectionPoolConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            platform: DEFAULT_PLATFORM.to_string(),
            timeout: DEFAULT_TIMEOUT,
            network_retry_delay: NETWORK_RETRY_DELAY,
            default_headers: HeaderMap::new(),
            connection_pool: ConnectionPoolConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration for `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables (and a `.env` file if present).
    ///
    /// This will look for:
    /// - `LIFELINE_BASE_URL` for the API base URL
    /// - `LIFELINE_PLATFORM` for the platform header value
    /// - `LIFELINE_TIMEOUT_SECS` for the per-attempt timeout (in seconds)
    /// - `LIFELINE_RETRY_DELAY_MS` for the network retry delay (in milliseconds)
    ///
    /// Unparseable numbers are ignored and the default is kept.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        // A missing .env file is not an error
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(base_url) = env::var("LIFELINE_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(platform) = env::var("LIFELINE_PLATFORM") {
            config.platform = platform;
        }

        if let Ok(timeout_str) = env::var("LIFELINE_TIMEOUT_SECS")
            && let Ok(timeout_secs) = timeout_str.parse::<u64>()
        {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(delay_str) = env::var("LIFELINE_RETRY_DELAY_MS")
            && let Ok(delay_ms) = delay_str.parse::<u64>()
        {
            config.network_retry_delay = Duration::from_millis(delay_ms);
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    ///
    /// Fields still at their default value in `other` do not override.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.platform != DEFAULT_PLATFORM {
            self.platform = other.platform;
        }
        if other.timeout != DEFAULT_TIMEOUT {
            self.timeout = other.timeout;
        }
        if other.network_retry_delay != NETWORK_RETRY_DELAY {
            self.network_retry_delay = other.network_retry_delay;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }

        self
    }
}

/// Configuration for HTTP connection pooling.
#[derive(Debug, Clone)]
pub struct ConnectionPoolConfig {
    /// Maximum number of idle connections per host
    pub max_idle_per_host: usize,

    /// Idle connection timeout
    pub idle_timeout: Duration,

    /// TCP keep-alive interval
    pub tcp_keepalive: Option<Duration>,

    /// Limit on establishing a connection; the overall budget still applies
    pub connect_timeout: Option<Duration>,
}

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 10,
            idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Some(Duration::from_secs(60)),
            connect_timeout: None,
        }
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
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

    /// Set the network retry delay.
    pub fn network_retry_delay(mut self, delay: Duration) -> Self {
        self.config.network_retry_delay = delay;
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> crate::Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str.parse().map_err(|e| {
            crate::Error::HttpClient(format!("Invalid header name '{}': {}", key_str, e))
        })?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| crate::Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Set connection pool configuration.
    pub fn connection_pool(mut self, config: ConnectionPoolConfig) -> Self {
        self.config.connection_pool = config;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
