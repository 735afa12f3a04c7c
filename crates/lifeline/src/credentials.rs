//! Credential provider binding
//!
//! The pipeline never issues or stores tokens. The host application supplies a
//! [`CredentialProvider`] once, at client construction, and the executor reads a
//! token from it on every logical call.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Mutex;

/// An opaque bearer token.
///
/// The value is held in a [`SecretString`] so it never shows up in `Debug` output
/// or logs. Two credentials are equal when their token strings are equal, which is
/// what the executor uses to detect a refresh that changed nothing.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wrap a bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into().into_boxed_str()))
    }

    /// The raw token, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Credential {}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// Source of bearer tokens, implemented by the host's session system.
///
/// # Contract
///
/// - `get_token` may be slow. With `force_refresh = true` it should bypass any cache,
///   but it is allowed to fail silently and hand back the same token (or none). The
///   executor detects that and ends the session instead of retrying.
/// - `end_session` is fire-and-forget: the executor calls it and immediately raises
///   its own auth-expired error without waiting for sign-out to finish. Providers
///   that need async work should spawn it.
///
/// # Example
///
/// ```rust
/// use lifeline::credentials::{Credential, CredentialProvider};
///
/// #[derive(Debug)]
/// struct Session;
///
/// #[async_trait::async_trait]
/// impl CredentialProvider for Session {
///     async fn get_token(&self, _force_refresh: bool) -> Option<Credential> {
///         Some(Credential::new("token-from-keychain"))
///     }
///
///     fn end_session(&self) {}
/// }
/// ```
#[async_trait]
pub trait CredentialProvider: Send + Sync + fmt::Debug {
    /// Return the current bearer token, optionally forcing a refresh.
    async fn get_token(&self, force_refresh: bool) -> Option<Credential>;

    /// Terminate the session.
    fn end_session(&self);
}

/// A fixed token with no refresh capability.
///
/// Useful for scripts, tests, and service accounts. A forced refresh returns the same
/// token, so a 401 always ends the session. `end_session` drops the token and later
/// calls go out unauthenticated.
#[derive(Debug, Default)]
pub struct StaticCredentials {
    token: Mutex<Option<Credential>>,
}

impl StaticCredentials {
    /// Create a provider that always returns `token`.
    pub fn new(token: impl Into<Credential>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    /// Create a provider with no token. Requests are sent with an empty bearer.
    pub fn anonymous() -> Self {
        Self::default()
    }

    fn current(&self) -> Option<Credential> {
        match self.token.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn get_token(&self, _force_refresh: bool) -> Option<Credential> {
        self.current()
    }

    fn end_session(&self) {
        tracing::debug!("Static credentials cleared");
        match self.token.lock() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}
