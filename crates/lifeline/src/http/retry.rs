//! Attempt budgets for a logical call
//!
//! A logical call gets at most one network retry and at most one auth-refresh retry.
//! The two budgets are independent, so a call makes at most three physical attempts.
//! These ceilings are fixed; only the backoff delay is configurable.

use std::time::Duration;

/// Physical attempts allowed for transport failures (initial + one retry).
pub const MAX_NETWORK_ATTEMPTS: u32 = 2;

/// Physical attempts allowed across auth refreshes (initial + one retry).
pub const MAX_AUTH_ATTEMPTS: u32 = 2;

/// Default fixed delay before the network retry.
pub const NETWORK_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Per-call bookkeeping of which retries have been spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptBudget {
    attempts: u32,
    network_attempts: u32,
    auth_attempts: u32,
}

impl Default for AttemptBudget {
    fn default() -> Self {
        Self::new()
    }
}

impl AttemptBudget {
    /// A fresh budget for a new logical call.
    pub fn new() -> Self {
        Self {
            attempts: 0,
            network_attempts: 1,
            auth_attempts: 1,
        }
    }

    /// Record that a physical attempt is about to be sent.
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Spend the network retry. Returns `false` once the ceiling is reached.
    pub fn take_network_retry(&mut self) -> bool {
        if self.network_attempts >= MAX_NETWORK_ATTEMPTS {
            return false;
        }
        self.network_attempts += 1;
        true
    }

    /// Spend the auth-refresh retry. Returns `false` once the ceiling is reached.
    pub fn take_auth_retry(&mut self) -> bool {
        if self.auth_attempts >= MAX_AUTH_ATTEMPTS {
            return false;
        }
        self.auth_attempts += 1;
        true
    }

    /// True once the auth-refresh retry has been spent.
    pub fn auth_retried(&self) -> bool {
        self.auth_attempts > 1
    }

    /// Physical attempts sent so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Retries taken so far (0 if the first attempt settled the call).
    pub fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }
}
